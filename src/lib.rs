//! Voxtext — simple, local audio/video transcription.
//!
//! A desktop GUI shell around [whisper-rs]: drop a media file on the window,
//! pick a model quality tier and output formats, and the transcript is
//! written next to the source file as `{stem}_transcript.{ext}`.
//!
//! # Crate layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`config`] | settings persistence (`settings.toml`) and platform paths |
//! | [`engine`] | model registry, download, ffmpeg decode, Whisper inference |
//! | [`export`] | pure transcript encoders (txt / srt / vtt / html / md / json) |
//! | [`job`] | the background job runner: progress, cancellation, file writes |
//! | [`app`] | the egui window |
//!
//! [whisper-rs]: https://crates.io/crates/whisper-rs

pub mod app;
pub mod config;
pub mod engine;
pub mod export;
pub mod job;
