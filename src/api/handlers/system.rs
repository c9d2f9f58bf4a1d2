//! System endpoints: health check.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::error::{ConsoleError, ErrorResponse};

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"healthy"` when returned with 200.
    pub status: String,
    /// RFC 3339 server time.
    pub timestamp: String,
    /// Crate version.
    pub version: String,
    /// Number of live WebSocket sessions.
    pub sessions: usize,
}

/// `GET /health` — Service health status.
///
/// # Errors
///
/// Returns [`ConsoleError::DispatcherClosed`] (503) if the dispatcher task
/// is no longer running.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, current timestamp and live session count.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Dispatcher stopped", body = ErrorResponse),
    )
)]
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ConsoleError> {
    let sessions = state.dispatch.session_count().await?;
    Ok((
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            sessions,
        }),
    ))
}
