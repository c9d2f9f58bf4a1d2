//! HTTP layer: route handlers and router composition.

pub mod handlers;
pub mod openapi;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::ws::handler::ws_handler;

/// Builds the plain HTTP routes: console page, static mount and health.
pub fn build_router(state: &AppState) -> Router<AppState> {
    let router = Router::new()
        .route("/", get(handlers::console::index_handler))
        .route("/health", get(handlers::system::health_handler))
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.http_request_timeout,
        ));

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        )
    };

    router
}

/// Builds the complete application: HTTP routes plus the `/ws` endpoint,
/// with tracing and (optionally) CORS layers, bound to `state`.
pub fn build_app(state: AppState) -> Router {
    let mut app = build_router(&state)
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http());

    if state.config.cors_permissive {
        app = app.layer(CorsLayer::permissive());
    }

    app.with_state(state)
}
