//! API error handling
//!
//! Provides sanitized error responses that don't leak implementation details.
//! An [`ApiError`] renders its hidden form on its own; the router's
//! [`expose_error_details`] layer re-renders it with details when the server
//! configuration allows.

use application::ApplicationError;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::state::AppState;

const GENERIC_MESSAGE: &str = "An error occurred processing your request";

/// Remove potentially sensitive information from an error message
///
/// Hides messages that mention file paths, upstream URLs, stack traces or
/// connection details.
fn sanitize_with(msg: &str, expose: bool) -> String {
    if expose {
        return msg.to_string();
    }

    let sensitive_patterns = [
        // File paths
        "/home/",
        "/Users/",
        "/var/",
        "/etc/",
        "\\Users\\",
        "C:\\",
        // Stack trace indicators
        "at line",
        "stack backtrace",
        "panicked at",
        ".rs:",
        // Connection details
        "connection refused",
        "ECONNREFUSED",
        "timeout",
        "timed out",
    ];

    let msg_lower = msg.to_lowercase();
    if sensitive_patterns
        .iter()
        .any(|pattern| msg_lower.contains(&pattern.to_lowercase()))
    {
        return GENERIC_MESSAGE.to_string();
    }

    if msg.contains("://") || msg.contains('/') && msg.len() > 50 {
        return GENERIC_MESSAGE.to_string();
    }

    msg.to_string()
}

/// API error type
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

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
    /// HTTP status for this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the response, with or without internal details
    #[must_use]
    pub fn render(&self, expose: bool) -> Response {
        (self.status(), Json(self.to_body(expose))).into_response()
    }

    fn to_body(&self, expose: bool) -> ErrorResponse {
        let (code, message, details) = match self {
            Self::BadRequest(msg) => ("bad_request", sanitize_with(msg, expose), None),
            Self::NotFound(msg) => ("not_found", sanitize_with(msg, expose), None),
            Self::ServiceUnavailable(msg) => {
                let message = if expose {
                    msg.clone()
                } else {
                    "Service temporarily unavailable".to_string()
                };
                ("service_unavailable", message, None)
            },
            Self::Internal(msg) => (
                "internal_error",
                "An internal error occurred".to_string(),
                expose.then(|| msg.clone()),
            ),
        };

        ErrorResponse {
            error: message,
            code: code.to_string(),
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = self.render(false);
        response.extensions_mut().insert(self);
        response
    }
}

/// Response mapper that re-renders API errors with internal details
///
/// Installed by the router when `server.expose_internal_errors` is set.
pub async fn expose_error_details(
    State(state): State<AppState>,
    mut response: Response,
) -> Response {
    match response.extensions_mut().remove::<ApiError>() {
        Some(error) if state.config.server.expose_internal_errors => error.render(true),
        _ => response,
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            aggregate @ ApplicationError::AggregateFailed { .. } => {
                if aggregate.is_fetch_failure() {
                    Self::ServiceUnavailable(aggregate.to_string())
                } else {
                    Self::Internal(aggregate.to_string())
                }
            },
            fetch @ ApplicationError::FetchFailed { .. } => {
                Self::ServiceUnavailable(fetch.to_string())
            },
            parse @ ApplicationError::ParseFailed { .. } => Self::Internal(parse.to_string()),
            ApplicationError::Configuration(msg) | ApplicationError::Internal(msg) => {
                Self::Internal(msg)
            },
        }
    }
}
