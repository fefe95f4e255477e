//! Homeowner rows as exported from the spreadsheet, and the payload Clerk expects.

use serde::{Deserialize, Serialize};

pub const PROPERTY_OWNER_COLUMN: &str = "Property Owner";
pub const EMAIL_COLUMN: &str = "Email";
pub const ALL_PROPS_COLUMN: &str = "All Props";

/// One row of the "All Homeowners" export.
///
/// Only three columns matter to the migration. Every other column is kept in
/// `extra`, in file order and byte-for-byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRecord {
    pub property_owner: String,
    pub email: String,
    pub all_props: String,
    pub extra: Vec<(String, String)>,
}

impl UserRecord {
    /// Build a record from `(header, value)` pairs. Missing columns stay empty.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::default();
        for (key, value) in pairs {
            let key = key.into();
            let value = value.into();
            match key.as_str() {
                PROPERTY_OWNER_COLUMN => record.property_owner = value,
                EMAIL_COLUMN => record.email = value,
                ALL_PROPS_COLUMN => record.all_props = value,
                _ => record.extra.push((key, value)),
            }
        }
        record
    }

    /// Look up any column, including the ones the migration ignores.
    pub fn get(&self, column: &str) -> Option<&str> {
        match column {
            PROPERTY_OWNER_COLUMN => Some(&self.property_owner),
            EMAIL_COLUMN => Some(&self.email),
            ALL_PROPS_COLUMN => Some(&self.all_props),
            _ => self
                .extra
                .iter()
                .find(|(k, _)| k == column)
                .map(|(_, v)| v.as_str()),
        }
    }

    /// Whether this row describes a homeowner worth moving to Clerk.
    ///
    /// An empty owner means the sheet returned a placeholder row. Owners with
    /// no email or no properties have nothing to migrate.
    pub fn is_migratable(&self) -> bool {
        !self.property_owner.trim().is_empty()
            && self.email_addresses().next().is_some()
            && !self.all_props.trim().is_empty()
    }

    fn email_addresses(&self) -> impl Iterator<Item = &str> {
        self.email
            .split(',')
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }
}

/// Body of `POST /v1/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub first_name: String,
    pub last_name: String,
    pub email_address: Vec<String>,
}

impl UserPayload {
    /// Normalize a migratable record. Returns `None` for rows that
    /// [`UserRecord::is_migratable`] rejects.
    ///
    /// Company owners ("Acme Rentals LLC") keep everything but the last word
    /// as the first name.
    pub fn from_record(record: &UserRecord) -> Option<Self> {
        if !record.is_migratable() {
            return None;
        }
        let (first_name, last_name) = match record.property_owner.rsplit_once(' ') {
            Some((first, last)) => (first.to_string(), last.to_string()),
            None => (record.property_owner.clone(), String::new()),
        };
        Some(Self {
            first_name,
            last_name,
            email_address: record.email_addresses().map(str::to_string).collect(),
        })
    }

    /// Primary address, used to identify the user in logs.
    pub fn primary_email(&self) -> &str {
        self.email_address.first().map(String::as_str).unwrap_or("")
    }
}
