#![cfg(test)]

use tempfile::tempdir;

use super::{compile_test_plugin, read_sink, scoped_service_name};
use crate::provider::contract::CAPABILITY_UNSUPPORTED;
use crate::provider::error::StatusCallError;
use crate::provider::loader::ServiceStatusProvider;
use crate::provider::registry::ProviderCollection;
use crate::status::{HealthState, OperatingStatus};

#[test]
fn status_bytes_round_trip_through_the_plugin_sink() {
    let (lib_path, _target) = compile_test_plugin("file_sink_plugin");
    let sinks = tempdir().expect("tempdir");
    let service = scoped_service_name(sinks.path(), "round-trip");

    let provider = ServiceStatusProvider::load(&service, &lib_path).expect("load fixture plugin");

    provider
        .set_operating_status(OperatingStatus::InService)
        .expect("deliver operating status");
    assert_eq!(read_sink(&service, "operating").as_deref(), Some("16"));

    provider
        .set_health_state(HealthState::Ok)
        .expect("deliver health state");
    assert_eq!(read_sink(&service, "health").as_deref(), Some("5"));
}

#[test]
fn unsupported_capability_returns_the_sentinel_without_calling_the_plugin() {
    let (lib_path, _target) = compile_test_plugin("health_only_plugin");
    let sinks = tempdir().expect("tempdir");
    let service = scoped_service_name(sinks.path(), "sentinel");

    let provider = ServiceStatusProvider::load(&service, &lib_path).expect("load fixture plugin");

    let err = provider
        .set_operating_status(OperatingStatus::Starting)
        .expect_err("operating status is not supported by this fixture");
    assert_eq!(
        err,
        StatusCallError::Unsupported {
            operation: "setOperatingStatus"
        }
    );
    assert_eq!(err.code(), CAPABILITY_UNSUPPORTED);
    // No entry point ran, so no sink file may exist.
    assert_eq!(read_sink(&service, "operating"), None);

    // The capability the module does have still works.
    provider
        .set_health_state(HealthState::Warning)
        .expect("deliver health state");
    assert_eq!(read_sink(&service, "health").as_deref(), Some("10"));
}

#[test]
fn plugin_error_codes_are_propagated_verbatim() {
    let (lib_path, _target) = compile_test_plugin("error_code_plugin");
    let provider =
        ServiceStatusProvider::load("test-service", &lib_path).expect("load fixture plugin");

    let err = provider
        .set_health_state(HealthState::Ok)
        .expect_err("fixture always fails");
    assert_eq!(
        err,
        StatusCallError::Plugin {
            operation: "setHealthState",
            code: 42
        }
    );
    assert_eq!(err.code(), 42);
    assert_eq!(provider.last_error().as_deref(), Some("simulated sink failure"));
}

/// Gate for the subprocess half of the panicking-plugin test below.
const PANIC_RUNNER_ENV: &str = "OPSTATUS_RUN_PANICKING_PLUGIN";

#[test]
fn panicking_plugin_never_reports_success() {
    if std::env::var_os(PANIC_RUNNER_ENV).is_some() {
        // Child half: actually drive the unwinding fixture. Exit code 7 is
        // reserved for the one forbidden outcome, a success report.
        let (lib_path, _target) = compile_test_plugin("panicking_plugin");
        let provider =
            ServiceStatusProvider::load("test-service", &lib_path).expect("load fixture plugin");
        match provider.set_health_state(HealthState::Ok) {
            Ok(()) => std::process::exit(7),
            Err(_) => std::process::exit(0),
        }
    }

    // Parent half: run the child in its own process so an aborting runtime
    // cannot take the rest of the suite with it.
    let exe = std::env::current_exe().expect("test binary path");
    let output = std::process::Command::new(exe)
        .args([
            "provider::tests::roundtrip_tests::panicking_plugin_never_reports_success",
            "--exact",
            "--nocapture",
            "--test-threads=1",
        ])
        .env(PANIC_RUNNER_ENV, "1")
        .output()
        .expect("re-run test binary");

    // An unwinding plugin is out of contract: the child either observes the
    // error (clean exit) or its runtime aborts on a foreign exception
    // (signal, no exit code). Both are acceptable outcomes.
    assert_ne!(
        output.status.code(),
        Some(7),
        "a panicking plugin must never be reported as a successful call"
    );
}

#[test]
fn bulk_apply_touches_only_providers_with_the_capability() {
    let (status_lib, _t1) = compile_test_plugin("status_only_plugin");
    let (health_lib, _t2) = compile_test_plugin("health_only_plugin");
    let sinks = tempdir().expect("tempdir");
    let service = scoped_service_name(sinks.path(), "bulk");

    let mut collection = ProviderCollection::new(&service);
    collection.add_path(&status_lib).expect("add status-only provider");
    collection.add_path(&health_lib).expect("add health-only provider");
    assert_eq!(collection.len(), 2);

    collection.set_all_health_state(HealthState::Warning);
    assert_eq!(read_sink(&service, "health").as_deref(), Some("10"));
    assert_eq!(
        read_sink(&service, "operating"),
        None,
        "the status-only sink must be untouched by a health broadcast"
    );

    collection.set_all_operating_status(OperatingStatus::InService);
    assert_eq!(read_sink(&service, "operating").as_deref(), Some("16"));
}
