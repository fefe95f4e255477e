//! # homeowner-migration
//!
//! Moves homeowner records from the "All Homeowners" spreadsheet export into
//! Clerk's user database without exceeding the Backend API's rate limit.
//!
//! ## Overview
//!
//! A run reads `data/homeowners.csv`, keeps the rows that describe a real
//! owner with an email and at least one property, and creates one Clerk user
//! per row. Requests are sent strictly one at a time with a fixed pause after
//! each, derived from the API quota and the size of the batch. A user that
//! Clerk rejects is logged and skipped; the rest of the batch carries on.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use homeowner_migration::{Migration, MigrationConfig, MigrationOptions};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> homeowner_migration::Result<()> {
//!     let root = std::path::Path::new(".");
//!     homeowner_migration::config::load_dotenv(root)?;
//!     let config = MigrationConfig::from_env(root)?;
//!     Migration::new(config)?
//!         .run(&MigrationOptions::default())
//!         .await
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Environment loading and validation |
//! | [`lock`] | Single-instance lock file |
//! | [`source`] | CSV export reading, filtering and normalization |
//! | [`resilience`] | Quota model and inter-request delay |
//! | [`transport`] | One-user HTTP submission with explicit outcomes |
//! | [`batch`] | Sequential, failure-isolating batch submitter |
//! | [`migration`] | Stage orchestration |
//! | [`shutdown`] | SIGINT/SIGTERM handling |
//! | [`cli`] | Command-line flags for the `migrate` binary |

pub mod batch;
pub mod cli;
pub mod config;
pub mod lock;
pub mod migration;
pub mod resilience;
pub mod shutdown;
pub mod source;
pub mod transport;
pub mod types;

pub use config::MigrationConfig;
pub use migration::{Migration, MigrationOptions, RunOutcome};
pub use shutdown::{Shutdown, ShutdownSignal};
pub use types::{UserPayload, UserRecord};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
