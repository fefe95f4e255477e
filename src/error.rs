use crate::resilience::rate_limit::RateLimitError;
use thiserror::Error;

/// Structured error context for operator-facing diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Configuration key or path that caused the error (e.g., "CLERK_SECRET_KEY", "migrations.lock")
    pub field_path: Option<String>,
    /// Additional detail, usually the remediation step
    pub details: Option<String>,
    /// Component that raised the error (e.g., "config", "process_lock")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the migration.
///
/// Every variant is fatal for the run. Per-item submission failures are not
/// errors; see [`crate::transport::SubmissionFailure`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Startup error: {message}{}", format_context(.context))]
    Startup {
        message: String,
        context: ErrorContext,
    },

    #[error("Input error: {message} ({})\n Hint: {hint}", .path.display())]
    Input {
        path: std::path::PathBuf,
        message: String,
        hint: String,
    },

    #[error("Rate limit error: {0}")]
    RateLimit(#[from] RateLimitError),

    #[error("Network transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Create a new startup error with structured context
    pub fn startup_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Startup {
            message: msg.into(),
            context,
        }
    }

    /// Shorthand for an environment variable that must be set.
    pub fn missing_env(key: &str) -> Self {
        Self::configuration_with_context(
            format!("expected environment variable '{}' to be defined", key),
            ErrorContext::new()
                .with_field_path(key)
                .with_source("config"),
        )
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } | Error::Startup { context, .. } => Some(context),
            _ => None,
        }
    }
}
