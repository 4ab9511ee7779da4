//! Job descriptor and the outcome events the runner emits.

use std::path::{Path, PathBuf};

use crate::config::VttStyleConfig;
use crate::engine::ModelTier;
use crate::export::{normalize_formats, OutputFormat};

// ---------------------------------------------------------------------------
// TranscriptionJob
// ---------------------------------------------------------------------------

/// Immutable description of one transcription job.
///
/// Built by the UI when the user hits Transcribe; owned by the runner for
/// the job's lifetime.
#[derive(Debug, Clone)]
pub struct TranscriptionJob {
    /// The media file to transcribe.
    pub source: PathBuf,
    /// Model quality tier to load.
    pub model: ModelTier,
    /// Requested output formats, already in canonical order.
    pub formats: Vec<OutputFormat>,
    /// Directory the output files are written to (the source's parent).
    pub output_dir: PathBuf,
    /// Speech language handed to the engine.
    pub language: String,
    /// WebVTT caption styling.
    pub vtt_style: VttStyleConfig,
}

impl TranscriptionJob {
    /// Build a job for `source`.
    ///
    /// The output directory is derived from the source file's parent and the
    /// format selection is normalised into canonical order.  The UI
    /// guarantees a non-empty selection; an empty one simply produces no
    /// files.
    pub fn new(
        source: impl Into<PathBuf>,
        model: ModelTier,
        formats: &[OutputFormat],
        language: impl Into<String>,
        vtt_style: VttStyleConfig,
    ) -> Self {
        let source = source.into();
        let output_dir = source
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            source,
            model,
            formats: normalize_formats(formats),
            output_dir,
            language: language.into(),
            vtt_style,
        }
    }

    /// The source file's stem, used in the `{stem}_transcript.{ext}` naming.
    pub fn source_stem(&self) -> String {
        self.source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".into())
    }
}

// ---------------------------------------------------------------------------
// JobOutcome
// ---------------------------------------------------------------------------

/// Classification of a job failure, so the UI can pick the right dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The external media decoder (`ffmpeg`) is not installed.  The message
    /// carries installation instructions.
    MissingDecoder,
    /// Everything else — the message is the raw underlying description.
    Other,
}

/// Events delivered from the job runner to the UI.
///
/// A job emits any number of `Progress` events and then exactly one
/// `Success` or `Failure` — unless it was cancelled, in which case the
/// stream just stops.
#[derive(Debug, Clone)]
pub enum JobOutcome {
    /// A human-readable status line plus percent complete (0–100,
    /// monotonically non-decreasing within one job).
    Progress { message: String, percent: u8 },
    /// The job finished; `files` lists every created file in write order.
    Success { files: Vec<PathBuf> },
    /// The job failed; earlier-written output files remain on disk.
    Failure { kind: FailureKind, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_dir_is_source_parent() {
        let job = TranscriptionJob::new(
            "/media/talks/lecture.mp4",
            ModelTier::Medium,
            &[OutputFormat::Text],
            "en",
            VttStyleConfig::default(),
        );
        assert_eq!(job.output_dir, Path::new("/media/talks"));
        assert_eq!(job.source_stem(), "lecture");
    }

    #[test]
    fn formats_are_normalised_to_canonical_order() {
        let job = TranscriptionJob::new(
            "/a/b.wav",
            ModelTier::Base,
            &[OutputFormat::Raw, OutputFormat::Srt, OutputFormat::Text],
            "en",
            VttStyleConfig::default(),
        );
        assert_eq!(
            job.formats,
            vec![OutputFormat::Text, OutputFormat::Srt, OutputFormat::Raw]
        );
    }

    #[test]
    fn stem_strips_only_the_final_extension() {
        let job = TranscriptionJob::new(
            "/a/my.recording.mp3",
            ModelTier::Base,
            &[OutputFormat::Text],
            "en",
            VttStyleConfig::default(),
        );
        assert_eq!(job.source_stem(), "my.recording");
    }
}
