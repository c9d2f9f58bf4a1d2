//! Client → server payload of the `input_changed` event.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::error::ConsoleError;

/// The two console fields a client submits.
///
/// Missing and `null` fields are read as empty strings; emptiness is the
/// processor's concern, not a transport rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InputMessage {
    /// Name of the file the client is working on.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub filename: String,
    /// Free-form text typed by the client.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub input: String,
}

impl InputMessage {
    /// Creates an input message from its two fields.
    #[must_use]
    pub fn new(filename: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            input: input.into(),
        }
    }

    /// Decodes the `data` of an `input_changed` envelope.
    ///
    /// An absent payload (`null`) yields an empty message. Unknown fields are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::MalformedPayload`] if the payload is not a JSON
    /// object or one of the fields is present but not a string.
    pub fn from_payload(payload: serde_json::Value) -> Result<Self, ConsoleError> {
        if payload.is_null() {
            return Ok(Self::default());
        }
        if !payload.is_object() {
            return Err(ConsoleError::MalformedPayload(
                "input_changed payload must be an object".to_string(),
            ));
        }
        serde_json::from_value(payload).map_err(|e| ConsoleError::MalformedPayload(e.to_string()))
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
