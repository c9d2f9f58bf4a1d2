//! Console error types with HTTP status and WebSocket error mapping.
//!
//! [`ConsoleError`] is the central error type for the console. Each variant
//! maps to a numeric code, an HTTP status code (for the REST surface) and a
//! structured `error` event payload (for the WebSocket surface).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::SessionId;

/// Structured JSON error response body.
///
/// All HTTP error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 3001,
///     "message": "dispatcher is not running",
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
///
/// Also used verbatim as the `data` of a WebSocket `error` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see [`ConsoleError::error_code`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum.
///
/// # Error Code Ranges
///
/// | Range     | Category         | HTTP Status                  |
/// |-----------|------------------|------------------------------|
/// | 1000–1999 | Protocol         | 400 Bad Request              |
/// | 2000–2999 | Session          | 404 Not Found                |
/// | 3000–3999 | Server           | 500 / 503                    |
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// Frame is not a JSON envelope with an `event` name.
    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    /// Event payload does not have the expected shape.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Event name is not part of the protocol.
    #[error("unknown event: {0}")]
    UnknownEvent(String),

    /// Session with the given ID is not registered.
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),

    /// The dispatcher task has stopped and no longer accepts events.
    #[error("dispatcher is not running")]
    DispatcherClosed,

    /// Configuration value could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ConsoleError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::MalformedFrame(_) => 1001,
            Self::MalformedPayload(_) => 1002,
            Self::UnknownEvent(_) => 1003,
            Self::SessionNotFound(_) => 2001,
            Self::Internal(_) => 3000,
            Self::DispatcherClosed => 3001,
            Self::InvalidConfig(_) => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedFrame(_) | Self::MalformedPayload(_) | Self::UnknownEvent(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::SessionNotFound(_) => StatusCode::NOT_FOUND,
            Self::DispatcherClosed => StatusCode::SERVICE_UNAVAILABLE,
            Self::InvalidConfig(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the structured error body for this error.
    #[must_use]
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            code: self.error_code(),
            message: self.to_string(),
            details: None,
        }
    }
}

impl IntoResponse for ConsoleError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_body(),
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
