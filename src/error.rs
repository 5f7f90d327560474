//! Platter error types

use std::time::Duration;

/// Platter error types
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    // Upstream/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("resource not found: {0}")]
    NotFound(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    // Shared-store collaborator errors
    #[error("shared store error: {0}")]
    Store(String),
}

impl GatewayError {
    /// Whether the error is transient and the request worth reattempting.
    ///
    /// Server-side errors (5xx), network faults, and throttling are
    /// transient; authentication failures, 404s, and data errors are not.
    pub fn is_transient(&self) -> bool {
        match self {
            GatewayError::Http(_) | GatewayError::RateLimited { .. } => true,
            GatewayError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Upstream-advertised delay before a retry, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            GatewayError::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

/// Result type alias for platter operations
pub type Result<T> = std::result::Result<T, GatewayError>;
