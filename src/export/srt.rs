//! SRT (SubRip) subtitle encoder.

use crate::engine::TranscriptionResult;

use super::timestamp::format_timestamp;

/// Encode all segments as an SRT document.
///
/// Each cue is a 1-indexed sequence number, a `start --> end` timing line
/// with comma millisecond separators, the trimmed segment text, and a blank
/// line.
pub fn encode(result: &TranscriptionResult) -> String {
    let mut out = String::new();
    for (i, seg) in result.segments.iter().enumerate() {
        let start = format_timestamp(seg.start_secs, ',');
        let end = format_timestamp(seg.end_secs, ',');
        out.push_str(&format!("{}\n", i + 1));
        out.push_str(&format!("{start} --> {end}\n"));
        out.push_str(seg.text.trim());
        out.push_str("\n\n");
    }
    out
}
