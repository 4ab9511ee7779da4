//! WebVTT subtitle encoder with optional LMS caption styling.

use crate::config::VttStyleConfig;
use crate::engine::TranscriptionResult;

use super::timestamp::format_timestamp;

/// Encode all segments as a WebVTT document.
///
/// Layout: the mandatory `WEBVTT` header; when styling is enabled and the
/// style block is non-empty, a `STYLE` block directly after the header;
/// then one cue per segment with period millisecond separators.  When
/// styling is enabled and cue settings are non-empty, every cue timing line
/// carries the cue-settings suffix.
pub fn encode(result: &TranscriptionResult, style: &VttStyleConfig) -> String {
    let mut out = String::from("WEBVTT\n");

    if style.enabled {
        let css = style.style_block.trim();
        if !css.is_empty() {
            out.push_str("\nSTYLE\n");
            out.push_str(css);
            out.push('\n');
        }
    }

    out.push('\n');

    let cue_suffix = if style.enabled {
        let cue = style.cue_settings.trim();
        if cue.is_empty() {
            String::new()
        } else {
            format!(" {cue}")
        }
    } else {
        String::new()
    };

    for seg in &result.segments {
        let start = format_timestamp(seg.start_secs, '.');
        let end = format_timestamp(seg.end_secs, '.');
        out.push_str(&format!("{start} --> {end}{cue_suffix}\n"));
        out.push_str(seg.text.trim());
        out.push_str("\n\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Segment;

    fn two_segment_result() -> TranscriptionResult {
        TranscriptionResult {
            text: " Hello World".into(),
            segments: vec![
                Segment {
                    start_secs: 0.0,
                    end_secs: 1.5,
                    text: " Hello ".into(),
                },
                Segment {
                    start_secs: 1.5,
                    end_secs: 3.25,
                    text: "World".into(),
                },
            ],
        }
    }

    fn styling(enabled: bool, cue: &str, css: &str) -> VttStyleConfig {
        VttStyleConfig {
            enabled,
            cue_settings: cue.into(),
            style_block: css.into(),
        }
    }

    #[test]
    fn plain_output_without_styling() {
        let out = encode(&two_segment_result(), &styling(false, "line:80%", "::cue {}"));

        assert!(out.starts_with("WEBVTT\n\n"));
        assert!(!out.contains("STYLE"));
        assert!(out.contains("00:00:00.000 --> 00:00:01.500\nHello\n\n"));
        assert!(out.contains("00:00:01.500 --> 00:00:03.250\nWorld\n\n"));
        // Disabled styling must not leak the configured cue settings.
        assert!(!out.contains("line:80%"));
    }

    #[test]
    fn style_block_directly_after_header() {
        let out = encode(
            &two_segment_result(),
            &styling(true, "line:80%", "::cue {\n  color: #fff;\n}"),
        );

        assert!(out.starts_with("WEBVTT\n\nSTYLE\n::cue {\n  color: #fff;\n}\n\n"));
    }

    #[test]
    fn cue_settings_suffix_on_every_timing_line() {
        let out = encode(
            &two_segment_result(),
            &styling(true, "line:80%", "::cue {}"),
        );

        assert!(out.contains("00:00:00.000 --> 00:00:01.500 line:80%\n"));
        assert!(out.contains("00:00:01.500 --> 00:00:03.250 line:80%\n"));
    }

    #[test]
    fn enabled_but_empty_styling_behaves_like_plain() {
        let out = encode(&two_segment_result(), &styling(true, "  ", "\n"));

        assert!(out.starts_with("WEBVTT\n\n"));
        assert!(!out.contains("STYLE"));
        assert!(out.contains("00:00:00.000 --> 00:00:01.500\n"));
    }

    #[test]
    fn no_segments_is_just_the_header() {
        let result = TranscriptionResult {
            text: String::new(),
            segments: Vec::new(),
        };
        assert_eq!(encode(&result, &styling(false, "", "")), "WEBVTT\n\n");
    }
}
