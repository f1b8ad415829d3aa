//! API error handling
//!
//! Maps application failures onto HTTP statuses. Internal error details are
//! only included in responses while detail exposure is enabled.

use std::sync::atomic::{AtomicBool, Ordering};

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

/// Configure whether internal error details are included in responses
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The routing engine or backend answered but could not help
    #[error("Upstream failure: {0}")]
    BadGateway(String),

    #[error("Upstream timeout: {0}")]
    GatewayTimeout(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// HTTP status and machine-readable code
    #[must_use]
    pub const fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            Self::BadGateway(_) => (StatusCode::BAD_GATEWAY, "bad_gateway"),
            Self::GatewayTimeout(_) => (StatusCode::GATEWAY_TIMEOUT, "gateway_timeout"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let (message, details) = match self {
            Self::BadRequest(msg) | Self::NotFound(msg) => (msg, None),
            Self::BadGateway(msg) | Self::GatewayTimeout(msg) | Self::ServiceUnavailable(msg) => {
                if should_expose_details() {
                    (msg, None)
                } else {
                    ("Upstream service unavailable".to_string(), None)
                }
            },
            Self::Internal(msg) => (
                "An internal error occurred".to_string(),
                should_expose_details().then_some(msg),
            ),
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::InvalidInput(msg) => Self::BadRequest(msg),
            ApplicationError::NotFound(msg) => Self::NotFound(msg),
            e @ (ApplicationError::UpstreamError { .. } | ApplicationError::NoRouteFound) => {
                Self::BadGateway(e.to_string())
            },
            e @ ApplicationError::Timeout { .. } => Self::GatewayTimeout(e.to_string()),
            ApplicationError::ExternalService(msg) => Self::ServiceUnavailable(msg),
            ApplicationError::Configuration(msg) | ApplicationError::Internal(msg) => {
                Self::Internal(msg)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_violations_are_bad_requests() {
        let err: ApiError = ApplicationError::InvalidInput("one waypoint".to_string()).into();
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "one waypoint"));

        let err: ApiError =
            ApplicationError::Domain(domain::DomainError::ValidationError("x".to_string())).into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn routing_failures_map_to_gateway_statuses() {
        let err: ApiError = ApplicationError::UpstreamError { status_code: 503 }.into();
        assert_eq!(err.status_and_code().0, StatusCode::BAD_GATEWAY);

        let err: ApiError = ApplicationError::NoRouteFound.into();
        assert_eq!(err.status_and_code().0, StatusCode::BAD_GATEWAY);

        let err: ApiError = ApplicationError::Timeout { timeout_secs: 60 }.into();
        assert_eq!(err.status_and_code(), (StatusCode::GATEWAY_TIMEOUT, "gateway_timeout"));

        let err: ApiError = ApplicationError::ExternalService("down".to_string()).into();
        assert_eq!(err.status_and_code().0, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn missing_entities_are_not_found() {
        let err: ApiError = ApplicationError::NotFound("destination x".to_string()).into();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn configuration_errors_are_internal() {
        let err: ApiError = ApplicationError::Configuration("catalog missing".to_string()).into();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_response_omits_empty_details() {
        let resp = ErrorResponse {
            error: "Bad request".to_string(),
            code: "bad_request".to_string(),
            details: None,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"code\":\"bad_request\""));
        assert!(!json.contains("details"));
    }
}
