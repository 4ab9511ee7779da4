//! Engine error taxonomy.
//!
//! Two of these variants get special treatment upstream: the job runner
//! retries a [`EngineError::Certificate`] model load once with relaxed TLS
//! validation, and reports [`EngineError::DecoderMissing`] as its own
//! user-facing failure class with installation instructions.

use thiserror::Error;

/// Remediation text shown when the external media decoder is absent.
pub const DECODER_MISSING_HELP: &str = "FFmpeg not found!\n\n\
Whisper requires FFmpeg to process audio/video files.\n\n\
To install on Mac:\n  brew install ffmpeg\n\n\
To install on Windows:\n  Download from ffmpeg.org\n\n\
To install on Linux:\n  sudo apt install ffmpeg";

/// All errors that can arise from the transcription engine.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// Downloading the GGML model file failed.
    #[error("Model download failed: {0}")]
    Download(String),

    /// The model download failed certificate validation.  Callers may retry
    /// the load with [`TlsPolicy::AcceptInvalid`](super::TlsPolicy).
    #[error("Certificate validation failed during model download: {0}")]
    Certificate(String),

    /// whisper-rs failed to initialise a `WhisperContext` or `WhisperState`.
    #[error("Whisper context initialisation failed: {0}")]
    ContextInit(String),

    /// The `ffmpeg` binary was not found on the execution path.
    #[error("{}", DECODER_MISSING_HELP)]
    DecoderMissing,

    /// `ffmpeg` ran but could not decode the media file.
    #[error("Audio decoding failed: {0}")]
    Decode(String),

    /// An error occurred during the inference pass.
    #[error("Transcription error: {0}")]
    Transcription(String),
}

impl EngineError {
    /// `true` for certificate-validation failures, which warrant one retry
    /// with relaxed TLS validation.
    pub fn is_certificate(&self) -> bool {
        matches!(self, EngineError::Certificate(_))
    }

    /// `true` when the external media decoder dependency is absent.
    pub fn is_decoder_missing(&self) -> bool {
        matches!(self, EngineError::DecoderMissing)
    }
}
