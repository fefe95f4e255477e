//! Runtime configuration.
//!
//! Everything the migration needs is validated once, up front, so that a run
//! never consumes part of the API quota before discovering a missing value.
//!
//! Recognized environment variables:
//! - `CLERK_SECRET_KEY` (required): bearer credential for Clerk's Backend API
//! - `MONGODB_URL` (required): connection string for the property migration stage
//! - `GOOGLE_SERVICE_ACCOUNT_KEY` (default `<root>/service-account-key.json`): must exist
//! - `CLERK_API_URL` (default `https://api.clerk.com`)
//! - `MIGRATION_HTTP_TIMEOUT_SECS` (default 30)

use crate::{Error, ErrorContext, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const CLERK_SECRET_KEY: &str = "CLERK_SECRET_KEY";
pub const MONGODB_URL: &str = "MONGODB_URL";
pub const GOOGLE_SERVICE_ACCOUNT_KEY: &str = "GOOGLE_SERVICE_ACCOUNT_KEY";
pub const CLERK_API_URL: &str = "CLERK_API_URL";
pub const HTTP_TIMEOUT_SECS: &str = "MIGRATION_HTTP_TIMEOUT_SECS";

pub const DEFAULT_CLERK_API_URL: &str = "https://api.clerk.com";
pub const SERVICE_ACCOUNT_KEY_FILE: &str = "service-account-key.json";
pub const DATA_DIR: &str = "data";
pub const LOCK_FILE: &str = "migrations.lock";

/// Load `<root>/.env` into the process environment if the file exists.
/// Variables already set in the environment win.
pub fn load_dotenv(root: &Path) -> Result<()> {
    let env_file = root.join(".env");
    match dotenvy::from_path(&env_file) {
        Ok(()) => {
            tracing::debug!(path = %env_file.display(), "loaded .env");
            Ok(())
        }
        Err(e) if e.not_found() => {
            tracing::debug!(path = %env_file.display(), "no .env file, using process environment");
            Ok(())
        }
        Err(e) => Err(Error::configuration_with_context(
            format!("unable to load {}: {}", env_file.display(), e),
            ErrorContext::new().with_source("config"),
        )),
    }
}

/// Validated configuration, passed explicitly to every component that needs it.
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    pub clerk_secret_key: String,
    pub mongodb_url: String,
    pub service_account_key: PathBuf,
    pub api_base_url: Url,
    pub http_timeout: Duration,
    /// Directory holding external data such as the homeowner export.
    pub data_dir: PathBuf,
    pub lock_file: PathBuf,
}

impl MigrationConfig {
    /// Validate the process environment. Call [`load_dotenv`] first so that
    /// values from `.env` are visible.
    pub fn from_env(root: &Path) -> Result<Self> {
        Self::from_lookup(root, |key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(root: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| Error::missing_env(key))
        };

        let clerk_secret_key = required(CLERK_SECRET_KEY)?;

        let service_account_key = lookup(GOOGLE_SERVICE_ACCOUNT_KEY)
            .map(PathBuf::from)
            .unwrap_or_else(|| root.join(SERVICE_ACCOUNT_KEY_FILE));
        if !service_account_key.is_file() {
            return Err(Error::configuration_with_context(
                format!(
                    "expected Google Service Account key at {}",
                    service_account_key.display()
                ),
                ErrorContext::new()
                    .with_field_path(GOOGLE_SERVICE_ACCOUNT_KEY)
                    .with_source("config"),
            ));
        }

        let mongodb_url = required(MONGODB_URL)?;

        let raw_url = lookup(CLERK_API_URL).unwrap_or_else(|| DEFAULT_CLERK_API_URL.to_string());
        let api_base_url = Url::parse(&raw_url).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid API URL '{}': {}", raw_url, e),
                ErrorContext::new()
                    .with_field_path(CLERK_API_URL)
                    .with_source("config"),
            )
        })?;

        let http_timeout = Duration::from_secs(
            lookup(HTTP_TIMEOUT_SECS)
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(30)
                .max(1),
        );

        Ok(Self {
            clerk_secret_key,
            mongodb_url,
            service_account_key,
            api_base_url,
            http_timeout,
            data_dir: root.join(DATA_DIR),
            lock_file: root.join(LOCK_FILE),
        })
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_lock_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.lock_file = path.into();
        self
    }

    pub fn with_api_base_url(mut self, url: Url) -> Self {
        self.api_base_url = url;
        self
    }
}
