//! Server → client payload of the `update_outputs` event.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Display strings derived from one [`super::InputMessage`].
///
/// Serialized with camelCase keys (`probeA`, `probeB`, `probeC`) to match
/// what the console page reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutputMessage {
    /// Sentence echoing both input fields.
    pub output: String,
    /// Probe over the filename.
    pub probe_a: String,
    /// Probe over the input text.
    pub probe_b: String,
    /// Second probe over the filename.
    pub probe_c: String,
    /// Validation message; empty when the input is complete.
    pub errors: String,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_probe_keys() {
        let msg = OutputMessage {
            probe_a: "a".to_string(),
            probe_b: "b".to_string(),
            probe_c: "c".to_string(),
            ..OutputMessage::default()
        };
        let Ok(value) = serde_json::to_value(&msg) else {
            panic!("serialization failed");
        };
        assert_eq!(value.get("probeA").and_then(|v| v.as_str()), Some("a"));
        assert_eq!(value.get("probeB").and_then(|v| v.as_str()), Some("b"));
        assert_eq!(value.get("probeC").and_then(|v| v.as_str()), Some("c"));
        assert_eq!(value.get("errors").and_then(|v| v.as_str()), Some(""));
        assert!(value.get("probe_a").is_none());
    }
}
