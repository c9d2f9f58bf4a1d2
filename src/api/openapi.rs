//! OpenAPI document for the HTTP surface and the WebSocket payloads.

use utoipa::OpenApi;

use crate::api::handlers::system::HealthResponse;
use crate::domain::{InputMessage, OutputMessage};
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI description.
///
/// `InputMessage` and `OutputMessage` are listed as components so clients
/// can read the `input_changed` / `update_outputs` payload shapes.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "probe-console", description = "Real-time web console over WebSocket"),
    paths(
        crate::api::handlers::console::index_handler,
        crate::api::handlers::system::health_handler,
    ),
    components(schemas(HealthResponse, ErrorResponse, ErrorBody, InputMessage, OutputMessage)),
    tags(
        (name = "Console", description = "Console page"),
        (name = "System", description = "Service status"),
    )
)]
pub struct ApiDoc;
