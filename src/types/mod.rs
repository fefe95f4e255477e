//! Core data types shared by the record source, the transport and the batch submitter.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`UserRecord`] | One raw row of the homeowner export |
//! | [`UserPayload`] | Normalized body for Clerk's user-creation endpoint |

pub mod user;

pub use user::{UserPayload, UserRecord};
