//! One live client connection as seen by the connection manager.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use super::SessionId;

/// Liveness of a session.
///
/// `Connected` is the initial state and loops on every message.
/// `Disconnected` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The transport is open and frames may be delivered.
    Connected,
    /// The transport is closed; nothing further is delivered.
    Disconnected,
}

/// Server-side handle for one WebSocket connection.
///
/// Owns the sending half of the connection's outbound queue. The transport
/// task holds the receiving half and writes whatever arrives to the socket;
/// dropping the `Session` closes that queue.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    outbound: mpsc::UnboundedSender<String>,
    state: SessionState,
    connected_at: DateTime<Utc>,
    messages_handled: u64,
}

impl Session {
    /// Creates a connected session around an outbound queue.
    #[must_use]
    pub fn new(id: SessionId, outbound: mpsc::UnboundedSender<String>) -> Self {
        Self {
            id,
            outbound,
            state: SessionState::Connected,
            connected_at: Utc::now(),
            messages_handled: 0,
        }
    }

    /// Returns the session identifier.
    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the current liveness state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Returns when the session was registered.
    #[must_use]
    pub const fn connected_at(&self) -> DateTime<Utc> {
        self.connected_at
    }

    /// Returns how many inbound messages this session has produced.
    #[must_use]
    pub const fn messages_handled(&self) -> u64 {
        self.messages_handled
    }

    /// Counts one handled inbound message.
    pub fn record_message(&mut self) {
        self.messages_handled = self.messages_handled.saturating_add(1);
    }

    /// Queues a serialized frame for the transport.
    ///
    /// Fire-and-forget: returns `false` when the session is disconnected or
    /// the transport side of the queue is gone, and never fails otherwise.
    pub fn send(&self, frame: String) -> bool {
        self.state == SessionState::Connected && self.outbound.send(frame).is_ok()
    }

    /// Moves the session to its terminal state.
    pub fn mark_disconnected(&mut self) {
        self.state = SessionState::Disconnected;
    }
}
