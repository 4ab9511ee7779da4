//! Background transcription jobs.
//!
//! A [`TranscriptionJob`] describes one piece of work (source file, model
//! tier, output formats); a [`JobRunner`] executes it on a blocking thread,
//! streaming [`JobOutcome`] events back to the UI over a channel and
//! honouring a shared cancel flag.

mod outcome;
mod runner;

pub use outcome::{FailureKind, JobOutcome, TranscriptionJob};
pub use runner::JobRunner;
