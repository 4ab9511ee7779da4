//! Transcription engine module.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                SpeechEngine (trait)                        │
//! │                                                           │
//! │   load(tier, tls) ──▶ ensure_model() ──▶ WhisperContext   │
//! │                        (download on       (whisper-rs)    │
//! │                         first use)                        │
//! │                                                           │
//! │                SpeechModel (trait)                         │
//! │                                                           │
//! │   transcribe(path, opts) ──▶ ffmpeg ──▶ state.full()      │
//! │                              (16 kHz      │               │
//! │                               mono f32)   ▼               │
//! │                              TranscriptionResult           │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is deliberately opaque to the rest of the app: the job runner
//! only sees `load(tier) → Model` and `Model.transcribe(path, options) →
//! TranscriptionResult`, so it can be driven by scripted fakes in tests.

pub mod error;
pub mod media;
pub mod model;
pub mod types;
pub mod whisper;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use error::{EngineError, DECODER_MISSING_HELP};
pub use model::{ensure_model, is_downloaded, model_path, ModelInfo, ModelTier, TlsPolicy, MODEL_REGISTRY};
pub use types::{Segment, TranscribeOptions, TranscriptionResult};
pub use whisper::{SpeechEngine, SpeechModel, WhisperEngine, WhisperModel};

// test-only re-exports so the job runner's test module can import the fakes
// without spelling out the whisper module path.
#[cfg(test)]
pub use whisper::{MockEngine, MockModel};
