#![cfg(test)]

mod roundtrip_tests;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::{tempdir, TempDir};

/// Compile one of the fixture plugin crates under `tests/test_plugins/` and
/// return the path to the built shared library. The `TempDir` holds the cargo
/// target directory and must stay alive as long as the library is used.
pub(crate) fn compile_test_plugin(crate_name: &str) -> (PathBuf, TempDir) {
    let base_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let project_path = base_dir.join("tests/test_plugins").join(crate_name);

    let target_dir = tempdir().expect("create temp target dir for plugin compilation");

    let output = Command::new("cargo")
        .current_dir(&project_path)
        .arg("build")
        .arg("--target-dir")
        .arg(target_dir.path())
        .output()
        .unwrap_or_else(|e| panic!("failed to run cargo build for {}: {}", crate_name, e));

    if !output.status.success() {
        panic!(
            "failed to compile fixture plugin {}:\n{}",
            crate_name,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    let lib_filename = if cfg!(target_os = "windows") {
        format!("{}.dll", crate_name)
    } else if cfg!(target_os = "macos") {
        format!("lib{}.dylib", crate_name)
    } else {
        format!("lib{}.so", crate_name)
    };

    let lib_path = target_dir.path().join("debug").join(&lib_filename);
    assert!(
        lib_path.exists(),
        "compiled fixture plugin not found at {}",
        lib_path.display()
    );
    (lib_path, target_dir)
}

/// A service "name" pointing into `dir`, so the file-sink fixture plugins
/// write their `<serviceName>.operating` / `<serviceName>.health` files into
/// a scratch directory instead of the working directory.
pub(crate) fn scoped_service_name(dir: &Path, service: &str) -> String {
    dir.join(service).display().to_string()
}

/// Read back the byte a file-sink fixture plugin recorded for `service`.
pub(crate) fn read_sink(service: &str, kind: &str) -> Option<String> {
    fs::read_to_string(format!("{}.{}", service, kind)).ok()
}
