//! Typed errors for the citation advisor library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.
//!
//! Only [`AdvisorError::Config`] is expected to reach callers. Completion
//! failures are caught inside the pipeline and degrade to rule-based analysis.

use thiserror::Error;

/// Errors that can occur while configuring or talking to a completion backend.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// Configuration error (missing credential, unknown backend, feature not compiled)
    #[error("config error: {0}")]
    Config(String),

    /// Completion service failed (transport, auth, SDK error)
    #[error("completion service error: {0}")]
    Completion(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Completion backend answered with a non-success status
    #[error("{backend} API error: {message}")]
    Api { backend: String, message: String },

    /// Completion backend answered without any text
    #[error("empty response from {backend}")]
    EmptyResponse { backend: String },
}

impl AdvisorError {
    /// Build a configuration error from any displayable message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error is a configuration error (the only class that is
    /// allowed to reach the caller).
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Result type alias for advisor operations.
pub type Result<T> = std::result::Result<T, AdvisorError>;
