//! Single-user submission to the remote user-management API.
//!
//! A submission never returns an error: every way it can go wrong is folded
//! into [`SubmissionOutcome::Failed`] so that the batch loop decides what to
//! do with it.

mod http;

pub use http::ClerkTransport;

use crate::types::UserPayload;
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;

/// Something that can create one user remotely.
#[async_trait]
pub trait UserSink: Send + Sync {
    async fn create_user(&self, payload: &UserPayload) -> SubmissionOutcome;
}

/// Result of one submission attempt.
#[derive(Debug, Clone)]
pub enum SubmissionOutcome {
    /// The server's description of the created user.
    Created(serde_json::Value),
    Failed(SubmissionFailure),
}

#[derive(Debug, Clone)]
pub enum SubmissionFailure {
    /// Timeout, connection error, or an unreadable response.
    Transport(String),
    /// Non-2xx response with a structured `errors` array.
    Rejected { status: u16, issues: Vec<ApiIssue> },
    /// Non-2xx response whose body is not a structured error.
    Unexpected { status: u16, body: String },
}

impl fmt::Display for SubmissionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionFailure::Transport(msg) => write!(f, "transport error: {}", msg),
            SubmissionFailure::Rejected { status, issues } => {
                write!(f, "rejected with HTTP {}", status)?;
                for issue in issues {
                    write!(f, "; {}", issue)?;
                }
                Ok(())
            }
            SubmissionFailure::Unexpected { status, body } => {
                write!(f, "unexpected HTTP {}: {}", status, body)
            }
        }
    }
}

/// Error body returned by the API on rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub errors: Vec<ApiIssue>,
}

/// One named problem with a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiIssue {
    pub message: String,
    #[serde(default)]
    pub long_message: Option<String>,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub meta: ApiIssueMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiIssueMeta {
    #[serde(default)]
    pub param_names: Vec<String>,
}

impl fmt::Display for ApiIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.long_message.as_deref().unwrap_or(&self.message))?;
        if !self.meta.param_names.is_empty() {
            write!(f, " [params: {}]", self.meta.param_names.join(", "))?;
        }
        if !self.code.is_empty() {
            write!(f, " (code: {})", self.code)?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
