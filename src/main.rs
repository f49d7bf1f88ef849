//! USDA importer
//!
//! Imports one USDA dataset (survey or branded) into the food store.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use usda_import::build_info;
use usda_import::config::{ImportConfig, ImportMode};
use usda_import::import::CancelFlag;
use usda_import::runner::{run_import, RunError};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Type of import
    #[arg(long = "type", value_enum)]
    import_type: ImportMode,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("usda_import=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let config = match ImportConfig::from_env(cli.import_type) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            return Err(e.into());
        }
    };

    let cancel = CancelFlag::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current record");
            on_signal.cancel();
        }
    });

    let outcome = tokio::task::spawn_blocking(move || run_import(&config, cancel)).await?;

    match outcome {
        Ok(report) => {
            report.log();
            Ok(())
        }
        Err(RunError::Interrupted { report, error }) => {
            tracing::error!("Import failed: {}", error);
            report.log();
            Err(error.into())
        }
        Err(e) => {
            tracing::error!("{}", e);
            Err(e.into())
        }
    }
}
