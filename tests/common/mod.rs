//! Shared helpers: an in-process server and a small WebSocket client.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use probe_console::api::build_app;
use probe_console::app_state::AppState;
use probe_console::config::ConsoleConfig;
use probe_console::ws::{ConnectionManager, DispatchHandle, ServerEvent, spawn_dispatcher};
use tokio::task::JoinHandle;

/// WebSocket client stream used by the tests.
pub type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// Starts the full application on an ephemeral port.
pub async fn spawn_server() -> SocketAddr {
    let (addr, _dispatch, _dispatcher) = spawn_server_with_dispatch().await;
    addr
}

/// Starts the full application and also returns the dispatcher handle and
/// task, so a test can stop the dispatcher while sockets are open.
pub async fn spawn_server_with_dispatch()
-> (SocketAddr, DispatchHandle, JoinHandle<ConnectionManager>) {
    let (dispatch, dispatcher) = spawn_dispatcher(ConnectionManager::new());
    let config = ConsoleConfig {
        listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"),
        ..ConsoleConfig::default()
    };
    let app = build_app(AppState::new(dispatch.clone(), Arc::new(config)));

    let Ok(listener) = TcpListener::bind("127.0.0.1:0").await else {
        panic!("failed to bind test listener");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("listener has no local address");
    };
    tokio::spawn(async move { axum::serve(listener, app).await });
    (addr, dispatch, dispatcher)
}

/// Opens a WebSocket to `/ws`.
pub async fn connect(addr: SocketAddr) -> Client {
    let Ok((ws, _response)) = connect_async(format!("ws://{addr}/ws")).await else {
        panic!("ws handshake failed");
    };
    ws
}

/// Sends a raw text frame.
pub async fn send_text(ws: &mut Client, text: &str) {
    if ws.send(Message::text(text.to_owned())).await.is_err() {
        panic!("ws send failed");
    }
}

/// Sends an `input_changed` event.
pub async fn send_input(ws: &mut Client, filename: &str, input: &str) {
    let frame = serde_json::json!({
        "event": "input_changed",
        "data": { "filename": filename, "input": input },
    });
    send_text(ws, &frame.to_string()).await;
}

/// Waits for the next server event, skipping control frames.
pub async fn next_event(ws: &mut Client) -> ServerEvent {
    loop {
        let Ok(frame) = tokio::time::timeout(RECV_TIMEOUT, ws.next()).await else {
            panic!("no frame within {RECV_TIMEOUT:?}");
        };
        match frame {
            Some(Ok(Message::Text(text))) => {
                let Ok(event) = serde_json::from_str::<ServerEvent>(text.as_str()) else {
                    panic!("unexpected frame: {text}");
                };
                return event;
            }
            Some(Ok(Message::Ping(_) | Message::Pong(_))) => {}
            other => panic!("connection ended: {other:?}"),
        }
    }
}

/// Asserts that nothing arrives on `ws` for a short while.
pub async fn assert_silent(ws: &mut Client) {
    let waited = tokio::time::timeout(Duration::from_millis(200), ws.next()).await;
    assert!(waited.is_err(), "unexpected frame: {waited:?}");
}
