//! probe-console server entry point.
//!
//! Starts the dispatcher task and the Axum HTTP server with the console page
//! and WebSocket endpoint.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use probe_console::api;
use probe_console::app_state::AppState;
use probe_console::config::{ConsoleConfig, LogFormat};
use probe_console::ws::{ConnectionHandler, ConnectionManager, spawn_dispatcher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ConsoleConfig::from_env().context("loading configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
    tracing::info!(addr = %config.listen_addr, "starting probe-console");

    // Session registry lives inside the dispatcher task
    let (dispatch, dispatcher) = spawn_dispatcher(ConnectionManager::new());

    // Build application state and router
    let app_state = AppState::new(dispatch.clone(), Arc::new(config.clone()));
    let app = api::build_app(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Tear down the registry; open sockets see their outbound queue close.
    if dispatch.shutdown().is_ok() {
        let manager = dispatcher.await.context("dispatcher task failed")?;
        tracing::info!(
            sessions = manager.session_count(),
            "releasing remaining sessions"
        );
    }

    tracing::info!("probe-console stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
