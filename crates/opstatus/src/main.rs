use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info};

use opstatus_core::utils::fs::platform_module_pattern;
use opstatus_core::{HealthState, OperatingStatus, ProviderCollection};

/// opstatus: report a service's status through dynamically loaded plugins
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Service name the providers report for
    #[arg(long, default_value = "opstatus")]
    service: String,

    /// Directory scanned for provider plugin modules
    #[arg(long)]
    plugin_dir: PathBuf,

    /// Glob matched against module file names (defaults to the platform's
    /// shared library extension)
    #[arg(long)]
    pattern: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the loaded providers and their capabilities
    List,
    /// Broadcast an operating status wire value to every provider
    SetOperating {
        /// Raw status byte, e.g. 16 for InService
        value: u8,
    },
    /// Broadcast a health state wire value to every provider
    SetHealth {
        /// Raw state byte, e.g. 5 for Ok
        value: u8,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = CliArgs::parse();

    let pattern = args
        .pattern
        .as_deref()
        .unwrap_or_else(|| platform_module_pattern());

    let mut collection = ProviderCollection::new(&args.service);
    let report = match collection.add_matching(&args.plugin_dir, pattern) {
        Ok(report) => report,
        Err(err) => {
            error!("cannot scan {}: {}", args.plugin_dir.display(), err);
            return ExitCode::FAILURE;
        }
    };
    info!(
        "loaded {} provider(s) from {} ({} failed)",
        report.loaded,
        args.plugin_dir.display(),
        report.failures.len()
    );

    match args.command {
        Commands::List => {
            println!(
                "{} provider(s) for service '{}'",
                collection.len(),
                collection.service_name()
            );
            for (path, provider) in collection.iter() {
                println!(
                    "  {} (operating: {}, health: {}, name: {})",
                    path.display(),
                    provider.supports_operating_status(),
                    provider.supports_health_state(),
                    provider.plugin_name().unwrap_or("<unnamed>")
                );
            }
        }
        Commands::SetOperating { value } => {
            let Some(status) = OperatingStatus::from_u8(value) else {
                error!("{} is not a known operating status value", value);
                return ExitCode::FAILURE;
            };
            collection.set_all_operating_status(status);
            println!("broadcast operating status {} ({})", status, value);
        }
        Commands::SetHealth { value } => {
            let Some(state) = HealthState::from_u8(value) else {
                error!("{} is not a known health state value", value);
                return ExitCode::FAILURE;
            };
            collection.set_all_health_state(state);
            println!("broadcast health state {} ({})", state, value);
        }
    }

    ExitCode::SUCCESS
}
