//! Connection manager: session lifecycle and event routing.
//!
//! The [`ConnectionHandler`] trait is the seam between the transport and the
//! console logic. The dispatcher drives it; tests can drive it directly
//! without a socket.

use tracing::{debug, info, warn};

use super::messages::{INPUT_CHANGED, ServerEvent};
use crate::domain::{InputMessage, Session, SessionId, SessionRegistry};
use crate::error::ConsoleError;
use crate::service::process;

/// Callbacks invoked for every transport event, in arrival order.
pub trait ConnectionHandler {
    /// A transport connection was established.
    fn on_connect(&mut self, session: Session);

    /// A well-formed envelope arrived from `session_id`.
    fn on_message(&mut self, session_id: SessionId, event: &str, payload: serde_json::Value);

    /// A frame from `session_id` could not be parsed as an envelope.
    fn on_malformed(&mut self, session_id: SessionId, error: ConsoleError);

    /// The transport connection closed or failed.
    fn on_disconnect(&mut self, session_id: SessionId);

    /// Number of currently registered sessions.
    fn session_count(&self) -> usize;
}

/// Owns the [`SessionRegistry`] and answers each inbound event on the
/// session it came from.
#[derive(Debug, Default)]
pub struct ConnectionManager {
    registry: SessionRegistry,
}

impl ConnectionManager {
    /// Creates a manager with an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session registry.
    #[must_use]
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Maps one inbound event to its reply.
    fn reply_to(event: &str, payload: serde_json::Value) -> ServerEvent {
        if event != INPUT_CHANGED {
            return ServerEvent::error(&ConsoleError::UnknownEvent(event.to_string()));
        }
        match InputMessage::from_payload(payload) {
            Ok(input) => ServerEvent::UpdateOutputs(process(&input)),
            Err(err) => ServerEvent::error(&err),
        }
    }

    /// Queues `event` on one session. Failures are logged and dropped.
    fn emit(&mut self, session_id: SessionId, event: &ServerEvent) {
        let session = match self.registry.get_mut(session_id) {
            Ok(session) => session,
            Err(err) => {
                debug!(%session_id, event = event.name(), error = %err, "emit dropped");
                return;
            }
        };

        let frame = match event.to_frame() {
            Ok(frame) => frame,
            Err(err) => {
                warn!(%session_id, error = %err, "failed to serialize outbound event");
                return;
            }
        };

        if !session.send(frame) {
            debug!(%session_id, event = event.name(), "outbound queue closed; frame dropped");
        }
    }
}

impl ConnectionHandler for ConnectionManager {
    fn on_connect(&mut self, session: Session) {
        let session_id = session.id();
        match self.registry.insert(session) {
            Ok(_) => info!(%session_id, sessions = self.registry.len(), "session connected"),
            Err(err) => warn!(%session_id, error = %err, "session not registered"),
        }
    }

    fn on_message(&mut self, session_id: SessionId, event: &str, payload: serde_json::Value) {
        match self.registry.get_mut(session_id) {
            Ok(session) => session.record_message(),
            Err(_) => {
                debug!(%session_id, event, "message from unregistered session ignored");
                return;
            }
        }

        let reply = Self::reply_to(event, payload);
        if let ServerEvent::Error(body) = &reply {
            debug!(%session_id, event, code = body.code, message = %body.message, "event rejected");
        } else {
            debug!(%session_id, event, "event handled");
        }
        self.emit(session_id, &reply);
    }

    fn on_malformed(&mut self, session_id: SessionId, error: ConsoleError) {
        debug!(%session_id, error = %error, "malformed frame");
        self.emit(session_id, &ServerEvent::error(&error));
    }

    fn on_disconnect(&mut self, session_id: SessionId) {
        match self.registry.remove(session_id) {
            Ok(session) => {
                let lifetime = chrono::Utc::now() - session.connected_at();
                info!(
                    %session_id,
                    messages = session.messages_handled(),
                    lifetime_ms = lifetime.num_milliseconds(),
                    sessions = self.registry.len(),
                    "session disconnected"
                );
            }
            Err(err) => debug!(%session_id, error = %err, "disconnect for unknown session"),
        }
    }

    fn session_count(&self) -> usize {
        self.registry.len()
    }
}
