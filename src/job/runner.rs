//! The background transcription job.
//!
//! [`JobRunner::run`] is a blocking function meant for
//! `tokio::task::spawn_blocking`: it loads the requested model, transcribes
//! the media file, writes the requested output files, and reports everything
//! over an unbounded channel so the worker never blocks on the UI.
//!
//! # Progress contract
//!
//! ```text
//!   5%   loading model
//!  10%   model loaded
//!  20%   transcribing
//!  80%   writing outputs
//!  80 + (15 / n_formats) * k   after the k-th output file
//! ```
//!
//! The per-format step uses integer division with no remainder
//! redistribution (two formats end at 94, not 95) — UI tests depend on the
//! literal values, so this arithmetic must not be "fixed".
//!
//! # Cancellation
//!
//! Cooperative: a shared [`AtomicBool`] is polled at the start, after model
//! load, after transcription, and before each output file.  Once the flag is
//! observed the runner goes silent — no Success, no Failure, and any error
//! raised after the cancel request is suppressed.

use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

use crate::engine::{EngineError, SpeechEngine, SpeechModel, TlsPolicy, TranscribeOptions};
use crate::export;

use super::outcome::{FailureKind, JobOutcome, TranscriptionJob};

// ---------------------------------------------------------------------------
// JobError
// ---------------------------------------------------------------------------

/// Internal error type unifying engine failures and output-file I/O.
#[derive(Debug, Error)]
enum JobError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("{0}")]
    Encode(#[from] serde_json::Error),

    #[error("{0}")]
    Write(std::io::Error),
}

impl JobError {
    fn kind(&self) -> FailureKind {
        match self {
            JobError::Engine(e) if e.is_decoder_missing() => FailureKind::MissingDecoder,
            _ => FailureKind::Other,
        }
    }
}

// ---------------------------------------------------------------------------
// JobRunner
// ---------------------------------------------------------------------------

/// Runs one [`TranscriptionJob`] to completion on the current thread.
///
/// The UI holds the other end of `events` and the cancel flag; at most one
/// runner is live per application instance (enforced by the UI, not here).
pub struct JobRunner {
    engine: Arc<dyn SpeechEngine>,
    events: UnboundedSender<JobOutcome>,
    cancel: Arc<AtomicBool>,
}

impl JobRunner {
    pub fn new(
        engine: Arc<dyn SpeechEngine>,
        events: UnboundedSender<JobOutcome>,
        cancel: Arc<AtomicBool>,
    ) -> Self {
        Self {
            engine,
            events,
            cancel,
        }
    }

    /// Execute the job.  Blocking — call via `spawn_blocking`.
    ///
    /// Emits Progress events followed by exactly one Success or Failure,
    /// unless cancelled (then the stream just ends).
    pub fn run(self, job: TranscriptionJob) {
        log::info!(
            "job: transcribing {} ({} model, {} formats)",
            job.source.display(),
            job.model.id(),
            job.formats.len()
        );

        match self.execute(&job) {
            Ok(Some(files)) => {
                log::info!("job: complete, {} files written", files.len());
                let _ = self.events.send(JobOutcome::Success { files });
            }
            Ok(None) => {
                log::info!("job: cancelled");
            }
            Err(e) => {
                if self.cancelled() {
                    // The caller already moved on; nobody wants this error.
                    log::debug!("job: error after cancellation suppressed: {e}");
                    return;
                }
                log::error!("job: failed: {e}");
                let _ = self.events.send(JobOutcome::Failure {
                    kind: e.kind(),
                    message: e.to_string(),
                });
            }
        }
    }

    /// The job body.  `Ok(None)` means a cancel request was observed.
    fn execute(&self, job: &TranscriptionJob) -> Result<Option<Vec<std::path::PathBuf>>, JobError> {
        if self.cancelled() {
            return Ok(None);
        }

        // ── 1. Load model (cert-retry once with relaxed validation) ──────
        self.progress(
            format!("Loading {} model (first time downloads)...", job.model.id()),
            5,
        );

        let model = match self.engine.load(job.model, TlsPolicy::Verify) {
            Ok(model) => model,
            Err(e) if e.is_certificate() => {
                log::warn!("job: model download failed certificate validation, retrying with relaxed TLS: {e}");
                self.engine.load(job.model, TlsPolicy::AcceptInvalid)?
            }
            Err(e) => return Err(e.into()),
        };

        if self.cancelled() {
            return Ok(None);
        }
        self.progress("Model loaded successfully.", 10);

        // ── 2. Transcribe ────────────────────────────────────────────────
        self.progress("Transcribing audio... This may take several minutes.", 20);

        let options = TranscribeOptions {
            language: job.language.clone(),
            ..TranscribeOptions::default()
        };
        let result = model.transcribe(&job.source, &options)?;

        if self.cancelled() {
            return Ok(None);
        }
        self.progress("Transcription complete. Writing output files...", 80);

        // ── 3. Write output files in canonical order ─────────────────────
        let stem = job.source_stem();
        let step = if job.formats.is_empty() {
            15
        } else {
            (15 / job.formats.len()) as u8
        };

        let mut files = Vec::with_capacity(job.formats.len());
        let mut percent: u8 = 80;

        for &format in &job.formats {
            if self.cancelled() {
                return Ok(None);
            }

            let path = export::output_path(&job.output_dir, &stem, format);
            let contents = export::encode(format, &result, &job.vtt_style)?;
            fs::write(&path, contents).map_err(JobError::Write)?;

            percent += step;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            self.progress(format!("Created {name}"), percent);
            files.push(path);
        }

        Ok(Some(files))
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    fn progress(&self, message: impl Into<String>, percent: u8) {
        let _ = self.events.send(JobOutcome::Progress {
            message: message.into(),
            percent,
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
