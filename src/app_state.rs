//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::ConsoleConfig;
use crate::ws::DispatchHandle;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Sender into the dispatcher that owns every session.
    pub dispatch: DispatchHandle,
    /// Configuration the server was started with.
    pub config: Arc<ConsoleConfig>,
}

impl AppState {
    /// Bundles a dispatcher handle and configuration.
    #[must_use]
    pub fn new(dispatch: DispatchHandle, config: Arc<ConsoleConfig>) -> Self {
        Self { dispatch, config }
    }
}
