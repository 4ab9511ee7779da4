//! Raw structured transcript dump (pretty-printed JSON).
//!
//! The full [`TranscriptionResult`] — text plus every segment field — is
//! serialised with indentation and no lossy transformation, so downstream
//! tooling gets exactly what the engine produced.

use crate::engine::TranscriptionResult;

/// Dump the whole result as pretty-printed JSON.
pub fn encode(result: &TranscriptionResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Segment;

    #[test]
    fn dump_round_trips_losslessly() {
        let result = TranscriptionResult {
            text: " Hello World".into(),
            segments: vec![
                Segment {
                    start_secs: 0.0,
                    end_secs: 1.5,
                    text: " Hello".into(),
                },
                Segment {
                    start_secs: 1.5,
                    end_secs: 3.25,
                    text: " World".into(),
                },
            ],
        };

        let json = encode(&result).expect("encode");
        let back: TranscriptionResult = serde_json::from_str(&json).expect("parse");

        assert_eq!(back.text, result.text);
        assert_eq!(back.segments.len(), 2);
        assert_eq!(back.segments[1].start_secs, 1.5);
        assert_eq!(back.segments[0].text, " Hello");
    }

    #[test]
    fn dump_is_indented() {
        let result = TranscriptionResult {
            text: "x".into(),
            segments: Vec::new(),
        };
        let json = encode(&result).expect("encode");
        assert!(json.contains("\n  \"text\""));
    }
}
