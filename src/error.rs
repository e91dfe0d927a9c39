//! Console error types with HTTP status code mapping.
//!
//! [`ConsoleError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "unauthorized: session token missing or expired",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Gateway error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                  |
/// |-----------|-----------------|------------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request              |
/// | 2000–2999 | Auth/Not Found  | 401 Unauthorized / 404       |
/// | 3000–3999 | Upstream/Server | 502 Bad Gateway / 500        |
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Unknown resource slug.
    #[error("unknown resource: {0}")]
    InvalidResource(String),

    /// Missing, expired, or rejected session token.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Record not found on the hospital API.
    #[error("not found: {0}")]
    NotFound(String),

    /// The hospital API answered with an error status.
    #[error("hospital api error ({status}): {message}")]
    Upstream {
        /// HTTP status returned by the hospital API.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// The hospital API could not be reached or returned an unreadable body.
    #[error("transport error: {0}")]
    Transport(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for ConsoleError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl ConsoleError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidResource(_) => 1002,
            Self::Unauthorized(_) => 2001,
            Self::NotFound(_) => 2002,
            Self::Internal(_) => 3000,
            Self::Upstream { .. } => 3001,
            Self::Transport(_) => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    ///
    /// Upstream client errors (4xx) are passed through so form validation
    /// messages reach the UI with their original status; everything else
    /// from upstream is a bad gateway.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidResource(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(StatusCode::is_client_error)
                .unwrap_or(StatusCode::BAD_GATEWAY),
            Self::Transport(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ConsoleError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(error = %self, code = self.error_code(), "request failed");
        }
        let details = match &self {
            Self::Upstream { message, .. } => Some(message.clone()),
            _ => None,
        };
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
