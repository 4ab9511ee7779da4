//! Plain-text transcript encoder.

use crate::engine::TranscriptionResult;

/// The full concatenated text, verbatim — no header, no trimming.
pub fn encode(result: &TranscriptionResult) -> String {
    result.text.clone()
}
