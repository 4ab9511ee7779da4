//! Transcription parameter types and result types.
//!
//! [`TranscribeOptions`] carries all settings that control a single Whisper
//! inference run.  [`TranscriptionResult`] is what the job runner hands to
//! the output encoders.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TranscribeOptions
// ---------------------------------------------------------------------------

/// All parameters for a single transcription run.
///
/// The task mode is always "transcribe" — `translate` defaults to `false`
/// and nothing in the UI flips it.
#[derive(Debug, Clone)]
pub struct TranscribeOptions {
    /// ISO-639-1 language code (e.g. `"en"`).
    pub language: String,

    /// Translate to English instead of transcribing verbatim.
    pub translate: bool,

    /// Number of CPU threads handed to Whisper.  Defaults to
    /// [`optimal_threads()`], capped at 8.
    pub n_threads: i32,
}

impl Default for TranscribeOptions {
    fn default() -> Self {
        Self {
            language: "en".into(),
            translate: false,
            n_threads: optimal_threads(),
        }
    }
}

/// Returns the number of physical CPU threads to use for inference,
/// capped at 8 to avoid diminishing returns on Whisper.
pub(crate) fn optimal_threads() -> i32 {
    std::thread::available_parallelism()
        .map(|n| n.get().min(8) as i32)
        .unwrap_or(4)
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// The output of a successful transcription.
///
/// `Serialize` so the raw (JSON) encoder can dump the whole structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResult {
    /// Full concatenated transcript text, exactly as the engine produced it
    /// (segment texts joined, whitespace untouched).
    pub text: String,

    /// Individual time-aligned segments, ordered by start time.
    pub segments: Vec<Segment>,
}

/// A single time-aligned text chunk produced by the engine.
///
/// Segment text may carry leading/trailing whitespace; subtitle encoders
/// trim it, the raw dump preserves it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// Segment start time in seconds from the start of the media.
    pub start_secs: f64,
    /// Segment end time in seconds (≥ `start_secs`).
    pub end_secs: f64,
    /// Segment text.
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optimal_threads_is_positive_and_at_most_8() {
        let t = optimal_threads();
        assert!(t >= 1 && t <= 8);
    }

    #[test]
    fn default_options_are_english_transcribe_mode() {
        let opts = TranscribeOptions::default();
        assert_eq!(opts.language, "en");
        assert!(!opts.translate);
    }

    #[test]
    fn result_serializes_with_all_segment_fields() {
        let result = TranscriptionResult {
            text: " Hello".into(),
            segments: vec![Segment {
                start_secs: 0.0,
                end_secs: 1.5,
                text: " Hello".into(),
            }],
        };
        let json = serde_json::to_string(&result).expect("serialize");
        assert!(json.contains("\"start_secs\""));
        assert!(json.contains("\"end_secs\""));
        assert!(json.contains(" Hello"));
    }
}
