//! WebSocket transport task.
//!
//! Handles the read/write loop for a single WebSocket connection: inbound
//! text frames go to the dispatcher, and frames queued for the session by
//! the connection manager are written back to the socket.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use super::dispatcher::DispatchHandle;
use crate::domain::SessionId;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Registers the session with the dispatcher on entry.
/// - Forwards text frames to the dispatcher; binary frames are ignored.
/// - Writes every frame from the session's outbound queue to the socket.
/// - Reports a disconnect on close, read error, write error, or when the
///   outbound queue closes (server shutdown).
pub async fn run_connection(socket: WebSocket, dispatch: DispatchHandle) {
    let session_id = SessionId::new();
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<String>();

    if let Err(err) = dispatch.connect(session_id, out_tx) {
        tracing::warn!(%session_id, error = %err, "rejecting ws connection");
        return;
    }

    loop {
        tokio::select! {
            // Incoming frame from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if dispatch.frame(session_id, text.as_str().to_owned()).is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Binary(bytes))) => {
                        tracing::debug!(%session_id, len = bytes.len(), "binary frame ignored");
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(err)) => {
                        tracing::debug!(%session_id, error = %err, "ws read failed");
                        break;
                    }
                    _ => {}
                }
            }
            // Frame queued by the connection manager
            frame = out_rx.recv() => {
                match frame {
                    Some(json) => {
                        if let Err(err) = ws_tx.send(Message::text(json)).await {
                            tracing::debug!(%session_id, error = %err, "ws write failed");
                            break;
                        }
                    }
                    None => {
                        // Session released by the dispatcher; close politely.
                        let _ = ws_tx.send(Message::Close(None)).await;
                        break;
                    }
                }
            }
        }
    }

    if dispatch.disconnect(session_id).is_err() {
        tracing::debug!(%session_id, "dispatcher gone before disconnect");
    }
    tracing::debug!(%session_id, "ws connection closed");
}
