//! migrate: move homeowners from the spreadsheet export into Clerk.
//!
//! Usage:
//!   migrate [--skip-users] [--data-dir <path>] [--lock-file <path>]
//!
//! Exit codes: 0 on completion (individual users may still have failed, see
//! the logs), 1 on a fatal startup error, 130 on Ctrl-C (SIGINT), 143 on
//! SIGTERM. The lock file is removed in every case except a hard kill.

use anyhow::Context;
use clap::Parser;
use homeowner_migration::cli::Cli;
use homeowner_migration::config::{self, MigrationConfig};
use homeowner_migration::{Migration, RunOutcome, ShutdownSignal};
use std::process::ExitCode;
use tracing::Instrument;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<ExitCode> {
    let root = std::env::current_dir().context("unable to determine the working directory")?;
    // Before parsing so that MIGRATION_* values in .env feed the CLI defaults.
    config::load_dotenv(&root)?;
    let cli = Cli::parse();

    let mut config = MigrationConfig::from_env(&root)?;
    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(path) = &cli.lock_file {
        config = config.with_lock_file(path);
    }

    let mut shutdown = ShutdownSignal::install().context("unable to install signal handlers")?;
    let migration = Migration::new(config)?;
    let options = cli.options();
    let span = tracing::info_span!("migration", run_id = %uuid::Uuid::new_v4());

    let outcome = migration
        .run_until(&options, shutdown.recv())
        .instrument(span)
        .await?;
    Ok(match outcome {
        RunOutcome::Completed => ExitCode::SUCCESS,
        RunOutcome::Interrupted(signal) => ExitCode::from(signal.exit_code()),
    })
}
