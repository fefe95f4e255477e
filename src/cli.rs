//! Command-line interface for the `migrate` binary.

use crate::migration::MigrationOptions;
use clap::Parser;
use std::path::PathBuf;

/// Migrate Bojano Homes homeowners into Clerk.
///
/// Configuration is read from the environment and from `.env` in the working
/// directory. Only one instance may run at a time.
#[derive(Debug, Parser)]
#[command(name = "migrate", version, about)]
pub struct Cli {
    /// Skip over the migration of users
    #[arg(long)]
    pub skip_users: bool,

    /// Directory containing homeowners.csv [default: ./data]
    #[arg(long, env = "MIGRATION_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Lock file guarding against concurrent runs [default: ./migrations.lock]
    #[arg(long, env = "MIGRATION_LOCK_FILE")]
    pub lock_file: Option<PathBuf>,
}

impl Cli {
    pub fn options(&self) -> MigrationOptions {
        MigrationOptions {
            skip_users: self.skip_users,
        }
    }
}
