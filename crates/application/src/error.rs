//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A caller broke a request contract (e.g. fewer than 2 waypoints)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An upstream service answered with a non-success status
    #[error("Upstream service returned HTTP {status_code}")]
    UpstreamError {
        /// HTTP status code returned upstream
        status_code: u16,
    },

    /// The routing engine found no path for the waypoints
    #[error("No route found")]
    NoRouteFound,

    /// A call exceeded its time budget
    #[error("Timed out after {timeout_secs} seconds")]
    Timeout {
        /// The exceeded budget in seconds
        timeout_secs: u64,
    },

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// True for failures a caller recovers from with a fallback
    ///
    /// Only contract violations are not recoverable.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidInput(_) | Self::Domain(_))
    }
}
