//! WebSocket message types: the `{event, data}` envelope in both directions.

use serde::{Deserialize, Serialize};

use crate::domain::OutputMessage;
use crate::error::{ConsoleError, ErrorBody};

/// Client → Server: console fields changed.
pub const INPUT_CHANGED: &str = "input_changed";
/// Server → Client: derived outputs for the last input.
pub const UPDATE_OUTPUTS: &str = "update_outputs";
/// Server → Client: the last frame was rejected.
pub const ERROR: &str = "error";

/// Inbound envelope as received from a client.
///
/// The payload is kept untyped here; the connection manager decodes it
/// according to `event`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientFrame {
    /// Event name, e.g. [`INPUT_CHANGED`].
    pub event: String,
    /// Event payload. Absent payloads read as `null`.
    #[serde(default)]
    pub data: serde_json::Value,
}

impl ClientFrame {
    /// Parses a text frame.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::MalformedFrame`] if the text is not JSON or has
    /// no string `event` field.
    pub fn parse(text: &str) -> Result<Self, ConsoleError> {
        serde_json::from_str(text).map_err(|e| ConsoleError::MalformedFrame(e.to_string()))
    }
}

/// Outbound envelope pushed to exactly one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Reply to an `input_changed` event.
    UpdateOutputs(OutputMessage),
    /// Reply to a frame that could not be handled.
    Error(ErrorBody),
}

impl ServerEvent {
    /// Wraps a protocol error for delivery to the client.
    #[must_use]
    pub fn error(err: &ConsoleError) -> Self {
        Self::Error(err.to_body())
    }

    /// Returns the wire event name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::UpdateOutputs(_) => UPDATE_OUTPUTS,
            Self::Error(_) => ERROR,
        }
    }

    /// Serializes the envelope to a JSON text frame.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Internal`] if serialization fails.
    pub fn to_frame(&self) -> Result<String, ConsoleError> {
        serde_json::to_string(self).map_err(|e| ConsoleError::Internal(e.to_string()))
    }
}
