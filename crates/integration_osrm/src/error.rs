//! Routing error types

use thiserror::Error;

/// Errors that can occur during route computation
#[derive(Debug, Error)]
pub enum OsrmError {
    /// The caller supplied an unusable request (e.g. fewer than 2 waypoints)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The routing engine answered with a non-success status
    #[error("Routing engine returned HTTP {status_code}")]
    UpstreamError {
        /// HTTP status code returned by the engine
        status_code: u16,
    },

    /// The engine answered successfully but found no path for the waypoints
    #[error("No route found for the given waypoints")]
    NoRouteFound,

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Connection to the routing engine failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Failed to parse response from the routing engine
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl OsrmError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionFailed(_) | Self::Timeout { .. } => true,
            Self::UpstreamError { status_code } => *status_code == 429 || *status_code >= 500,
            Self::InvalidInput(_)
            | Self::NoRouteFound
            | Self::ParseError(_)
            | Self::ConfigurationError(_) => false,
        }
    }
}
