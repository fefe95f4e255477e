//! Where existing homeowners come from.
//!
//! The only implemented source is the CSV export of the "All Homeowners"
//! spreadsheet. Reading the sheet through the Google Sheets API is not
//! implemented; the service-account key is still validated at startup.

use crate::types::{UserPayload, UserRecord};
use crate::{Error, Result};
use csv::ReaderBuilder;
use std::path::{Path, PathBuf};

/// File name the spreadsheet export is expected under, inside the data directory.
pub const HOMEOWNERS_CSV: &str = "homeowners.csv";

/// A provider of raw homeowner rows.
pub trait RecordSource {
    fn records(&self) -> Result<Vec<UserRecord>>;
}

/// Reads homeowner rows from a CSV export with a header row.
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The export inside `data_dir`.
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(HOMEOWNERS_CSV))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn input_error(&self, message: impl Into<String>) -> Error {
        Error::Input {
            path: self.path.clone(),
            message: message.into(),
            hint: format!(
                "Export the 'All Homeowners' spreadsheet as CSV to {}",
                self.path.display()
            ),
        }
    }
}

impl RecordSource for CsvSource {
    fn records(&self) -> Result<Vec<UserRecord>> {
        if !self.path.exists() {
            return Err(self.input_error("homeowner export not found"));
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;
        let headers = reader.headers()?.clone();

        let mut records = Vec::new();
        for (line, row) in reader.records().enumerate() {
            let row = row.map_err(|e| {
                // +2: one for the header row, one for 1-based numbering.
                self.input_error(format!("invalid row {}: {}", line + 2, e))
            })?;
            records.push(UserRecord::from_pairs(headers.iter().zip(row.iter())));
        }
        tracing::debug!(path = %self.path.display(), rows = records.len(), "read homeowner export");
        Ok(records)
    }
}

/// Filter and normalize raw rows into payloads ready for Clerk.
pub fn normalize(records: &[UserRecord]) -> Vec<UserPayload> {
    records.iter().filter_map(UserPayload::from_record).collect()
}

/// Existing users from `source`, filtered and normalized.
pub fn existing_users(source: &dyn RecordSource) -> Result<Vec<UserPayload>> {
    let records = source.records()?;
    let users = normalize(&records);
    let skipped = records.len() - users.len();
    if skipped > 0 {
        tracing::info!(
            kept = users.len(),
            skipped,
            "skipped rows without an owner, email or properties"
        );
    }
    Ok(users)
}
