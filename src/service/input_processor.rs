//! Pure transformation from console input to display outputs.
//!
//! [`process`] is total over all strings, has no side effects and returns
//! byte-identical results for identical input. Client strings are embedded
//! verbatim; nothing is escaped, so callers must not render the result as
//! markup.

use crate::domain::{InputMessage, OutputMessage};

/// Validation message reported in `errors` when a field is empty.
pub const REQUIRED_FIELDS_ERROR: &str = "Both filename and input are required";

/// Derives the display strings for one input message.
///
/// `probe_a` and `probe_c` both read `filename` under different labels.
#[must_use]
pub fn process(input: &InputMessage) -> OutputMessage {
    let InputMessage { filename, input } = input;

    let errors = if filename.is_empty() || input.is_empty() {
        REQUIRED_FIELDS_ERROR.to_string()
    } else {
        String::new()
    };

    OutputMessage {
        output: format!("Received filename: {filename} and input: {input}"),
        probe_a: format!("Probe A: {filename}"),
        probe_b: format!("Probe B: {input}"),
        probe_c: format!("Probe C: {filename}"),
        errors,
    }
}
