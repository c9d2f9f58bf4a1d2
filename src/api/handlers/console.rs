//! Console page endpoint.

use axum::response::{Html, IntoResponse};

/// The console document served at `/`.
pub const CONSOLE_HTML: &str = include_str!("../../../assets/console.html");

/// `GET /` — The console page.
#[utoipa::path(
    get,
    path = "/",
    tag = "Console",
    summary = "Console page",
    description = "Returns the static console document that connects to `/ws`.",
    responses(
        (status = 200, description = "Console HTML", content_type = "text/html", body = String),
    )
)]
pub async fn index_handler() -> impl IntoResponse {
    Html(CONSOLE_HTML)
}
