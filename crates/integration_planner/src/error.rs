//! Route-generation error types

use thiserror::Error;

/// Errors that can occur while requesting candidate routes
#[derive(Debug, Error)]
pub enum PlannerError {
    /// The backend answered with a non-success status
    #[error("Route generation failed with HTTP {status_code}")]
    UpstreamError {
        /// HTTP status code returned by the backend
        status_code: u16,
    },

    /// The backend answered `success: false`
    #[error("Route generation rejected: {0}")]
    Rejected(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Connection to the backend failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Failed to parse the backend response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl PlannerError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionFailed(_) | Self::Timeout { .. } => true,
            Self::UpstreamError { status_code } => *status_code >= 500,
            Self::Rejected(_) | Self::ParseError(_) | Self::ConfigurationError(_) => false,
        }
    }
}
