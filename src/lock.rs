//! Single-instance guard.
//!
//! Two migrations running at once would each assume the full API quota. The
//! lock file is created atomically (`O_EXCL`) and removed when the guard is
//! dropped. A process killed without unwinding leaves the file behind; it
//! must then be deleted by hand.

use crate::{Error, ErrorContext, Result};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Held for the whole run. Dropping it deletes the lock file.
#[derive(Debug)]
pub struct ProcessLock {
    path: PathBuf,
}

impl ProcessLock {
    /// Create the lock file, failing if another instance already holds it.
    pub fn acquire(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                let holder = std::fs::read_to_string(&path).unwrap_or_default();
                return Err(Error::startup_with_context(
                    format!(
                        "another migration is already running (lock file {} exists)",
                        path.display()
                    ),
                    ErrorContext::new()
                        .with_field_path(path.display().to_string())
                        .with_details(format!(
                            "held by pid '{}'; make sure no other migration is running, then delete the file",
                            holder.trim()
                        ))
                        .with_source("process_lock"),
                ));
            }
            Err(e) => return Err(e.into()),
        };

        let guard = Self { path };
        write!(file, "{}", std::process::id())?;
        file.sync_all()?;
        tracing::debug!(path = %guard.path.display(), "acquired process lock");
        Ok(guard)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ProcessLock {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "released process lock"),
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "failed to remove lock file; delete it before the next run"
            ),
        }
    }
}
