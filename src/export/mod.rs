//! Output encoders that serialize a transcription result into the supported
//! file formats.
//!
//! All encoders are pure functions over a
//! [`TranscriptionResult`](crate::engine::TranscriptionResult); only the VTT
//! encoder additionally consumes the caption-styling configuration.  File
//! naming and format ordering live here so the job runner and the UI agree
//! on both.

pub mod html;
pub mod markdown;
pub mod raw;
pub mod srt;
pub mod text;
pub mod timestamp;
pub mod vtt;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::VttStyleConfig;
use crate::engine::TranscriptionResult;

// ---------------------------------------------------------------------------
// OutputFormat
// ---------------------------------------------------------------------------

/// The supported transcript output formats.
///
/// A single, strongly-typed representation used by the settings file, the
/// format checkboxes and the job runner — no stringly-typed conditionals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text (.txt).
    Text,
    /// SubRip subtitles (.srt).
    Srt,
    /// WebVTT subtitles (.vtt), with optional LMS styling.
    Vtt,
    /// Collapsible HTML snippet (.html).
    Html,
    /// Markdown document (.md).
    Markdown,
    /// Raw JSON dump of the whole result (.json).
    Raw,
}

impl OutputFormat {
    /// All formats in canonical output order.  Jobs write their files in
    /// this order regardless of the order formats were selected in.
    pub const CANONICAL: [OutputFormat; 6] = [
        OutputFormat::Text,
        OutputFormat::Srt,
        OutputFormat::Vtt,
        OutputFormat::Html,
        OutputFormat::Markdown,
        OutputFormat::Raw,
    ];

    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Srt => "srt",
            OutputFormat::Vtt => "vtt",
            OutputFormat::Html => "html",
            OutputFormat::Markdown => "md",
            OutputFormat::Raw => "json",
        }
    }

    /// Checkbox label shown in the UI.
    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::Text => "Text (.txt)",
            OutputFormat::Srt => "SRT (.srt)",
            OutputFormat::Vtt => "WebVTT (.vtt)",
            OutputFormat::Html => "HTML (.html)",
            OutputFormat::Markdown => "Markdown (.md)",
            OutputFormat::Raw => "JSON",
        }
    }
}

/// Sort a user selection into canonical order, dropping duplicates.
pub fn normalize_formats(selected: &[OutputFormat]) -> Vec<OutputFormat> {
    OutputFormat::CANONICAL
        .into_iter()
        .filter(|fmt| selected.contains(fmt))
        .collect()
}

// ---------------------------------------------------------------------------
// File naming
// ---------------------------------------------------------------------------

/// Output path for a given source stem and format:
/// `{dir}/{stem}_transcript.{ext}`.
///
/// This naming is load-bearing — downstream tooling globs for
/// `*_transcript.*`.
pub fn output_path(dir: &Path, source_stem: &str, format: OutputFormat) -> PathBuf {
    dir.join(format!("{source_stem}_transcript.{}", format.extension()))
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Encode `result` in the requested format.
///
/// Only the raw JSON dump can fail to serialise; every other encoder is
/// infallible.
pub fn encode(
    format: OutputFormat,
    result: &TranscriptionResult,
    style: &VttStyleConfig,
) -> Result<String, serde_json::Error> {
    Ok(match format {
        OutputFormat::Text => text::encode(result),
        OutputFormat::Srt => srt::encode(result),
        OutputFormat::Vtt => vtt::encode(result, style),
        OutputFormat::Html => html::encode(result),
        OutputFormat::Markdown => markdown::encode(result),
        OutputFormat::Raw => raw::encode(result)?,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_match_the_naming_contract() {
        let exts: Vec<&str> = OutputFormat::CANONICAL
            .iter()
            .map(|f| f.extension())
            .collect();
        assert_eq!(exts, vec!["txt", "srt", "vtt", "html", "md", "json"]);
    }

    #[test]
    fn output_path_appends_transcript_suffix() {
        let p = output_path(Path::new("/media"), "lecture", OutputFormat::Srt);
        assert_eq!(p, Path::new("/media/lecture_transcript.srt"));
    }

    #[test]
    fn normalize_orders_canonically_and_dedupes() {
        let selection = [
            OutputFormat::Raw,
            OutputFormat::Text,
            OutputFormat::Srt,
            OutputFormat::Text,
        ];
        assert_eq!(
            normalize_formats(&selection),
            vec![OutputFormat::Text, OutputFormat::Srt, OutputFormat::Raw]
        );
    }

    #[test]
    fn normalize_empty_selection_is_empty() {
        assert!(normalize_formats(&[]).is_empty());
    }

    #[test]
    fn serde_round_trip_lowercase() {
        let json = serde_json::to_string(&OutputFormat::Markdown).expect("json");
        assert_eq!(json, "\"markdown\"");
        let back: OutputFormat = serde_json::from_str("\"vtt\"").expect("parse");
        assert_eq!(back, OutputFormat::Vtt);
    }

    #[test]
    fn dispatch_covers_every_format() {
        let result = TranscriptionResult {
            text: "hi".into(),
            segments: Vec::new(),
        };
        let style = VttStyleConfig::default();
        for fmt in OutputFormat::CANONICAL {
            let encoded = encode(fmt, &result, &style).expect("encode");
            assert!(!encoded.is_empty() || fmt == OutputFormat::Srt);
        }
    }
}
