//! Rate-limited batch submission.
//!
//! # Batch Submission Module
//!
//! Drives a list of [`UserPayload`](crate::types::UserPayload)s through a
//! [`UserSink`](crate::transport::UserSink) strictly one at a time. After each
//! attempt, successful or not, the submitter sleeps the delay computed by
//! [`inter_request_delay`](crate::resilience::inter_request_delay), so the
//! quota is respected even when requests fail fast.
//!
//! A failure of one item never stops the batch and never reaches the caller:
//! it is logged with the server's per-issue detail and the loop moves on.
//!
//! ## Example
//!
//! ```rust,no_run
//! use homeowner_migration::batch::BatchSubmitter;
//! use homeowner_migration::resilience::{inter_request_delay, CLERK_USERS_RATE_LIMIT};
//! use homeowner_migration::transport::ClerkTransport;
//! use std::sync::Arc;
//!
//! # async fn run(config: homeowner_migration::MigrationConfig,
//! #              users: Vec<homeowner_migration::UserPayload>) -> homeowner_migration::Result<()> {
//! let delay = inter_request_delay(users.len(), &CLERK_USERS_RATE_LIMIT);
//! let submitter = BatchSubmitter::new(Arc::new(ClerkTransport::new(&config)?));
//! submitter.submit_batch(&users, delay).await;
//! # Ok(())
//! # }
//! ```

mod submitter;

pub use submitter::BatchSubmitter;
