//! Engine traits and the production Whisper implementation.
//!
//! # Overview
//!
//! [`SpeechEngine`] and [`SpeechModel`] are the two halves of the opaque
//! engine capability the job runner consumes: `load(tier) → model`, then
//! `model.transcribe(path, options) → result`.  Both are object-safe so the
//! runner can be tested against scripted fakes (see [`MockEngine`]).
//!
//! [`WhisperEngine`] is the production implementation: it resolves (and on
//! first use downloads) the GGML file for the requested tier, builds a
//! `whisper_rs::WhisperContext`, and decodes media through `ffmpeg`.

use std::path::{Path, PathBuf};

use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use super::media::decode_to_pcm;
use super::model::{ensure_model, ModelTier, TlsPolicy};
use super::{EngineError, Segment, TranscribeOptions, TranscriptionResult};

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Loads transcription models.  `Send + Sync` so it can be held behind an
/// `Arc<dyn SpeechEngine>` and called from the job worker thread.
pub trait SpeechEngine: Send + Sync {
    /// Load (downloading on first use) the model for `tier`.
    ///
    /// `tls` selects the certificate-validation policy for the download;
    /// callers retry a [`EngineError::Certificate`] failure once with
    /// [`TlsPolicy::AcceptInvalid`].
    fn load(&self, tier: ModelTier, tls: TlsPolicy) -> Result<Box<dyn SpeechModel>, EngineError>;
}

/// A loaded model ready to transcribe media files.
pub trait SpeechModel: Send {
    /// Transcribe the media file at `media` and return the recognized text
    /// plus time-aligned segments.
    fn transcribe(
        &self,
        media: &Path,
        options: &TranscribeOptions,
    ) -> Result<TranscriptionResult, EngineError>;
}

// Compile-time assertion: both traits must stay object-safe.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn SpeechEngine>, _: Box<dyn SpeechModel>) {}
};

// ---------------------------------------------------------------------------
// WhisperEngine
// ---------------------------------------------------------------------------

/// Production engine backed by whisper-rs and GGML files downloaded from
/// Hugging Face.
#[derive(Debug, Clone)]
pub struct WhisperEngine {
    /// Directory that contains (or will contain) GGML `.bin` files.
    models_dir: PathBuf,
}

impl WhisperEngine {
    /// Create an engine that stores models under `models_dir`.
    pub fn new(models_dir: impl Into<PathBuf>) -> Self {
        Self {
            models_dir: models_dir.into(),
        }
    }
}

impl SpeechEngine for WhisperEngine {
    fn load(&self, tier: ModelTier, tls: TlsPolicy) -> Result<Box<dyn SpeechModel>, EngineError> {
        let path = ensure_model(&self.models_dir, tier, tls)?;

        let path_str = path.to_str().ok_or_else(|| {
            EngineError::ContextInit(format!(
                "model path contains non-UTF-8 characters: {}",
                path.display()
            ))
        })?;

        let ctx_params = WhisperContextParameters::default();
        let ctx = WhisperContext::new_with_params(path_str, ctx_params)
            .map_err(|e| EngineError::ContextInit(e.to_string()))?;

        log::info!("engine: loaded {} model from {}", tier.id(), path.display());
        Ok(Box::new(WhisperModel { ctx }))
    }
}

// ---------------------------------------------------------------------------
// WhisperModel
// ---------------------------------------------------------------------------

/// A loaded `WhisperContext`.  A new `WhisperState` is created for every
/// [`transcribe`](SpeechModel::transcribe) call.
pub struct WhisperModel {
    ctx: WhisperContext,
}

impl std::fmt::Debug for WhisperModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhisperModel").finish_non_exhaustive()
    }
}

// `WhisperContext` holds a raw pointer internally but the model weights are
// read-only after loading.
// SAFETY: WhisperContext is Send+Sync as declared by whisper-rs.
unsafe impl Send for WhisperModel {}

impl SpeechModel for WhisperModel {
    fn transcribe(
        &self,
        media: &Path,
        options: &TranscribeOptions,
    ) -> Result<TranscriptionResult, EngineError> {
        // ── Decode media through ffmpeg ───────────────────────────────────
        let samples = decode_to_pcm(media)?;
        log::debug!(
            "engine: decoded {} samples ({:.1}s) from {}",
            samples.len(),
            samples.len() as f64 / super::media::WHISPER_SAMPLE_RATE as f64,
            media.display()
        );

        // ── Build FullParams ──────────────────────────────────────────────
        let mut fp = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        fp.set_language(Some(options.language.as_str()));
        fp.set_translate(options.translate);
        fp.set_n_threads(options.n_threads);
        fp.set_print_progress(false);
        fp.set_print_realtime(false);
        fp.set_print_timestamps(false);

        // ── Create per-call state and run inference ───────────────────────
        let mut state = self
            .ctx
            .create_state()
            .map_err(|e| EngineError::ContextInit(e.to_string()))?;

        state
            .full(fp, &samples)
            .map_err(|e| EngineError::Transcription(e.to_string()))?;

        // ── Collect segments ──────────────────────────────────────────────
        let n_segments = state
            .full_n_segments()
            .map_err(|e| EngineError::Transcription(e.to_string()))?;

        let mut text = String::new();
        let mut segments: Vec<Segment> = Vec::with_capacity(n_segments as usize);

        for i in 0..n_segments {
            let seg_text = state
                .full_get_segment_text(i)
                .map_err(|e| EngineError::Transcription(format!("segment {i}: {e}")))?;

            // Timestamps are in centiseconds.
            let start_secs = state.full_get_segment_t0(i).unwrap_or(0).max(0) as f64 / 100.0;
            let end_secs = state.full_get_segment_t1(i).unwrap_or(0).max(0) as f64 / 100.0;

            text.push_str(&seg_text);
            segments.push(Segment {
                start_secs,
                end_secs,
                text: seg_text,
            });
        }

        Ok(TranscriptionResult { text, segments })
    }
}

// ---------------------------------------------------------------------------
// MockEngine / MockModel  (test-only)
// ---------------------------------------------------------------------------

/// A scripted engine double: each `load` call pops the next result and the
/// TLS policy it was called with is recorded, so tests can assert the
/// verify-then-relaxed retry order.
#[cfg(test)]
pub struct MockEngine {
    loads: std::sync::Mutex<std::collections::VecDeque<Result<MockModel, EngineError>>>,
    /// TLS policies `load` was called with, in order.
    pub load_calls: std::sync::Mutex<Vec<TlsPolicy>>,
}

#[cfg(test)]
impl MockEngine {
    /// An engine whose every `load` succeeds with a model returning `result`.
    pub fn ok(result: TranscriptionResult) -> Self {
        Self::scripted(vec![Ok(MockModel::ok(result))])
    }

    /// An engine that runs through `script` one `load` call at a time,
    /// repeating the last entry when the script is exhausted.
    pub fn scripted(script: Vec<Result<MockModel, EngineError>>) -> Self {
        Self {
            loads: std::sync::Mutex::new(script.into_iter().collect()),
            load_calls: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
impl SpeechEngine for MockEngine {
    fn load(&self, _tier: ModelTier, tls: TlsPolicy) -> Result<Box<dyn SpeechModel>, EngineError> {
        self.load_calls.lock().unwrap().push(tls);
        let mut loads = self.loads.lock().unwrap();
        let next = if loads.len() > 1 {
            loads.pop_front().unwrap()
        } else {
            loads.front().cloned().unwrap()
        };
        next.map(|m| Box::new(m) as Box<dyn SpeechModel>)
    }
}

/// A model double that returns a pre-configured response and can optionally
/// trip a shared flag when `transcribe` runs (used to simulate a cancel
/// request arriving mid-transcription).
#[cfg(test)]
#[derive(Clone)]
pub struct MockModel {
    response: Result<TranscriptionResult, EngineError>,
    flag_on_transcribe: Option<std::sync::Arc<std::sync::atomic::AtomicBool>>,
}

#[cfg(test)]
impl MockModel {
    pub fn ok(result: TranscriptionResult) -> Self {
        Self {
            response: Ok(result),
            flag_on_transcribe: None,
        }
    }

    pub fn err(error: EngineError) -> Self {
        Self {
            response: Err(error),
            flag_on_transcribe: None,
        }
    }

    /// Set `flag` to `true` while transcribing.
    pub fn setting_flag(mut self, flag: std::sync::Arc<std::sync::atomic::AtomicBool>) -> Self {
        self.flag_on_transcribe = Some(flag);
        self
    }
}

#[cfg(test)]
impl SpeechModel for MockModel {
    fn transcribe(
        &self,
        _media: &Path,
        _options: &TranscribeOptions,
    ) -> Result<TranscriptionResult, EngineError> {
        if let Some(flag) = &self.flag_on_transcribe {
            flag.store(true, std::sync::atomic::Ordering::SeqCst);
        }
        self.response.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn result_of(text: &str) -> TranscriptionResult {
        TranscriptionResult {
            text: text.into(),
            segments: Vec::new(),
        }
    }

    #[test]
    fn mock_engine_records_tls_policies() {
        let engine = MockEngine::scripted(vec![
            Err(EngineError::Certificate("self-signed".into())),
            Ok(MockModel::ok(result_of("hi"))),
        ]);

        let first = engine.load(ModelTier::Medium, TlsPolicy::Verify);
        assert!(matches!(first, Err(EngineError::Certificate(_))));

        let second = engine.load(ModelTier::Medium, TlsPolicy::AcceptInvalid);
        assert!(second.is_ok());

        let calls = engine.load_calls.lock().unwrap();
        assert_eq!(*calls, vec![TlsPolicy::Verify, TlsPolicy::AcceptInvalid]);
    }

    #[test]
    fn mock_model_returns_configured_result() {
        let model = MockModel::ok(result_of("hello"));
        let out = model
            .transcribe(Path::new("audio.mp3"), &TranscribeOptions::default())
            .expect("transcribe");
        assert_eq!(out.text, "hello");
    }

    #[test]
    fn mock_model_err_propagates() {
        let model = MockModel::err(EngineError::DecoderMissing);
        let err = model
            .transcribe(Path::new("audio.mp3"), &TranscribeOptions::default())
            .unwrap_err();
        assert!(err.is_decoder_missing());
    }

    #[test]
    fn load_missing_model_file_fails_without_network() {
        // Points at a directory that cannot be created, so ensure_model
        // fails before any network access.
        let engine = WhisperEngine::new("/dev/null/models");
        let result = engine.load(ModelTier::Base, TlsPolicy::Verify);
        assert!(matches!(result, Err(EngineError::Download(_))));
    }

    #[test]
    fn box_dyn_engine_compiles() {
        // If this test compiles, the traits are object-safe.
        let engine: Box<dyn SpeechEngine> = Box::new(MockEngine::ok(result_of("ok")));
        let _ = engine.load(ModelTier::Base, TlsPolicy::Verify);
    }
}
