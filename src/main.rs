//! Application entry point — Voxtext.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create [`tokio`] runtime (multi-thread, 2 workers) — one blocking
//!    transcription job at a time plus slack for model downloads.
//! 4. Build the shared [`WhisperEngine`] over the models directory.
//! 5. Run [`eframe::run_native`] — blocks the main thread until the window
//!    is closed.

use std::sync::Arc;

use voxtext::{
    app::VoxtextApp,
    config::{AppConfig, AppPaths},
    engine::{SpeechEngine, WhisperEngine},
};

use eframe::egui;

// ---------------------------------------------------------------------------
// Native options builder
// ---------------------------------------------------------------------------

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let mut vp = egui::ViewportBuilder::default()
        .with_inner_size([560.0, 640.0])
        .with_min_inner_size([460.0, 520.0])
        .with_drag_and_drop(true);

    if let Some((x, y)) = config.ui.window_position {
        vp = vp.with_position(egui::pos2(x, y));
    }

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Voxtext starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Tokio runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to create tokio runtime");

    // 4. Speech engine over the models directory
    let paths = AppPaths::new();
    log::info!("models directory: {}", paths.models_dir.display());
    let engine: Arc<dyn SpeechEngine> = Arc::new(WhisperEngine::new(paths.models_dir));

    // 5. Build the egui app and run it (blocks until the window is closed)
    let app = VoxtextApp::new(engine, rt.handle().clone(), config.clone());
    let options = native_options(&config);

    eframe::run_native("Voxtext", options, Box::new(move |_cc| Ok(Box::new(app))))
}
