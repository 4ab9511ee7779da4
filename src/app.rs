//! Voxtext desktop window — egui/eframe application.
//!
//! # Architecture
//!
//! [`VoxtextApp`] is the top-level [`eframe::App`].  It owns all UI state and
//! the receiving end of the job event channel; the transcription itself runs
//! on a `spawn_blocking` thread (see [`crate::job::JobRunner`]) and streams
//! [`JobOutcome`] events back, which `update` drains non-blockingly every
//! frame.
//!
//! At most one job is live at a time: the Transcribe button is replaced by a
//! Cancel button while [`VoxtextApp::job`] is `Some`.
//!
//! # Layout
//!
//! | Section | Contents |
//! |---------|----------|
//! | Drop zone | drag-and-drop target showing the selected file |
//! | Model | radio group over [`ModelTier::ALL`] |
//! | Formats | one checkbox per [`OutputFormat`] |
//! | VTT styling | collapsible panel: enable switch, preset dropdown, cue settings, CSS block |
//! | Status | progress bar, percent, status line, elapsed timer |
//! | Actions | Transcribe / Cancel / Clear |

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui;
use tokio::sync::mpsc;

use crate::config::{AppConfig, VttStyleConfig, VTT_PRESETS};
use crate::engine::{ModelTier, SpeechEngine};
use crate::export::OutputFormat;
use crate::job::{FailureKind, JobOutcome, JobRunner, TranscriptionJob};

// ---------------------------------------------------------------------------
// ActiveJob
// ---------------------------------------------------------------------------

/// Handle to the currently running transcription, dropped when it ends.
struct ActiveJob {
    /// Receives progress/success/failure from the worker.
    events: mpsc::UnboundedReceiver<JobOutcome>,
    /// Shared cancel flag polled by the worker.
    cancel: Arc<AtomicBool>,
    /// When the job was started (drives the elapsed-time display).
    started: Instant,
}

/// Terminal status of the last finished job, kept for display.
#[derive(Debug, Clone, PartialEq)]
enum LastRun {
    Succeeded { file_count: usize },
    Failed { kind: FailureKind },
    Cancelled,
}

// ---------------------------------------------------------------------------
// VoxtextApp
// ---------------------------------------------------------------------------

/// eframe application — the Voxtext transcription window.
pub struct VoxtextApp {
    // ── Backend ──────────────────────────────────────────────────────────
    /// Shared speech engine handed to each job.
    engine: Arc<dyn SpeechEngine>,
    /// Handle for spawning the blocking worker.
    runtime: tokio::runtime::Handle,

    // ── Selection state ──────────────────────────────────────────────────
    /// The media file to transcribe, set by drag-and-drop.
    source: Option<PathBuf>,
    /// Selected model quality tier.
    model: ModelTier,
    /// Checkbox state, one entry per canonical format.
    formats: Vec<(OutputFormat, bool)>,
    /// WebVTT styling as edited in the panel.
    vtt_style: VttStyleConfig,
    /// Index into [`VTT_PRESETS`] currently shown in the dropdown.
    vtt_preset: usize,

    // ── Job state ────────────────────────────────────────────────────────
    /// The running job, if any.
    job: Option<ActiveJob>,
    /// Last reported progress percentage (0–100).
    percent: u8,
    /// Last reported status message.
    status: String,
    /// Outcome of the most recently finished job.
    last_run: Option<LastRun>,
    /// Frozen elapsed time of the finished job.
    final_elapsed: Option<Duration>,

    // ── Configuration ────────────────────────────────────────────────────
    /// Persisted settings, written back on exit.
    config: AppConfig,
}

impl VoxtextApp {
    pub fn new(
        engine: Arc<dyn SpeechEngine>,
        runtime: tokio::runtime::Handle,
        config: AppConfig,
    ) -> Self {
        let formats = OutputFormat::CANONICAL
            .iter()
            .map(|&f| (f, config.output.formats.contains(&f)))
            .collect();
        let vtt_style = config.vtt_style.clone();
        let vtt_preset = VTT_PRESETS
            .iter()
            .position(|p| {
                p.cue_settings == vtt_style.cue_settings && p.css == vtt_style.style_block
            })
            .unwrap_or(0);

        Self {
            engine,
            runtime,
            source: None,
            model: config.engine.model,
            formats,
            vtt_style,
            vtt_preset,
            job: None,
            percent: 0,
            status: String::new(),
            last_run: None,
            final_elapsed: None,
            config,
        }
    }

    // ── File intake ──────────────────────────────────────────────────────

    /// Accept the first dropped file, replacing any previous selection.
    ///
    /// Drops are ignored while a job is running so the file shown always
    /// matches the file being transcribed.
    fn poll_dropped_files(&mut self, ctx: &egui::Context) {
        if self.job.is_some() {
            return;
        }
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if let Some(path) = dropped.into_iter().find_map(|f| f.path) {
            log::info!("file selected: {}", path.display());
            self.source = Some(path);
            self.last_run = None;
            self.final_elapsed = None;
            self.percent = 0;
            self.status.clear();
        }
    }

    // ── Job lifecycle ────────────────────────────────────────────────────

    /// Current format selection in canonical order.
    fn selected_formats(&self) -> Vec<OutputFormat> {
        self.formats
            .iter()
            .filter(|(_, checked)| *checked)
            .map(|&(f, _)| f)
            .collect()
    }

    /// Spawn the blocking transcription worker for the selected file.
    fn start_job(&mut self) {
        let Some(source) = self.source.clone() else {
            return;
        };
        let formats = self.selected_formats();
        if formats.is_empty() {
            self.status = "Select at least one output format.".into();
            return;
        }

        let job = TranscriptionJob::new(
            source,
            self.model,
            &formats,
            self.config.engine.language.clone(),
            self.vtt_style.clone(),
        );

        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let runner = JobRunner::new(Arc::clone(&self.engine), tx, Arc::clone(&cancel));
        self.runtime.spawn_blocking(move || runner.run(job));

        self.job = Some(ActiveJob {
            events: rx,
            cancel,
            started: Instant::now(),
        });
        self.percent = 0;
        self.status = "Starting...".into();
        self.last_run = None;
        self.final_elapsed = None;
    }

    /// Request cancellation and return to idle immediately.
    ///
    /// The worker keeps running until its next cancel check but goes silent;
    /// dropping the receiver here is safe because the runner ignores send
    /// failures.
    fn cancel_job(&mut self) {
        if let Some(job) = self.job.take() {
            job.cancel.store(true, Ordering::SeqCst);
            self.final_elapsed = Some(job.started.elapsed());
        }
        self.percent = 0;
        self.status = "Cancelled.".into();
        self.last_run = Some(LastRun::Cancelled);
    }

    /// Drain all pending job events (non-blocking).
    fn poll_job_events(&mut self) {
        let Some(job) = self.job.as_mut() else {
            return;
        };

        let mut finished = false;
        while let Ok(event) = job.events.try_recv() {
            match event {
                JobOutcome::Progress { message, percent } => {
                    self.status = message;
                    self.percent = percent;
                }
                JobOutcome::Success { files } => {
                    self.percent = 100;
                    self.status = format!(
                        "Done! Created {} file{}.",
                        files.len(),
                        if files.len() == 1 { "" } else { "s" }
                    );
                    self.last_run = Some(LastRun::Succeeded {
                        file_count: files.len(),
                    });
                    finished = true;
                }
                JobOutcome::Failure { kind, message } => {
                    self.status = message;
                    self.last_run = Some(LastRun::Failed { kind });
                    finished = true;
                }
            }
        }

        if finished {
            if let Some(job) = self.job.take() {
                self.final_elapsed = Some(job.started.elapsed());
            }
        }
    }

    // ── Panels ───────────────────────────────────────────────────────────

    fn draw_drop_zone(&mut self, ui: &mut egui::Ui) {
        let (rect, _) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), 64.0),
            egui::Sense::hover(),
        );
        let hovering_file = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
        let stroke = if hovering_file {
            egui::Stroke::new(2.0, egui::Color32::from_rgb(68, 136, 255))
        } else {
            egui::Stroke::new(1.0, egui::Color32::from_rgb(90, 90, 90))
        };
        ui.painter().rect_stroke(
            rect.shrink(2.0),
            egui::CornerRadius::same(6),
            stroke,
            egui::StrokeKind::Inside,
        );

        let label = match &self.source {
            Some(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            None => "Drag and drop an audio or video file here".into(),
        };
        let color = if self.source.is_some() {
            egui::Color32::from_rgb(80, 200, 120)
        } else {
            egui::Color32::from_rgb(140, 140, 140)
        };
        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::proportional(14.0),
            color,
        );
    }

    fn draw_model_picker(&mut self, ui: &mut egui::Ui) {
        ui.label("Model");
        let enabled = self.job.is_none();
        for &tier in ModelTier::ALL.iter() {
            ui.add_enabled_ui(enabled, |ui| {
                ui.radio_value(&mut self.model, tier, tier.info().display_name);
            });
        }
    }

    fn draw_format_picker(&mut self, ui: &mut egui::Ui) {
        ui.label("Output formats");
        let enabled = self.job.is_none();
        ui.add_enabled_ui(enabled, |ui| {
            for (format, checked) in &mut self.formats {
                ui.checkbox(checked, format.label());
            }
        });
    }

    fn draw_vtt_panel(&mut self, ui: &mut egui::Ui) {
        let enabled = self.job.is_none();
        ui.add_enabled_ui(enabled, |ui| {
            egui::CollapsingHeader::new("VTT caption styling")
                .default_open(false)
                .show(ui, |ui| {
                    ui.checkbox(&mut self.vtt_style.enabled, "Enable styling");

                    let selected_name = VTT_PRESETS[self.vtt_preset].name;
                    egui::ComboBox::from_label("Preset")
                        .selected_text(selected_name)
                        .show_ui(ui, |ui| {
                            for (i, preset) in VTT_PRESETS.iter().enumerate() {
                                if ui
                                    .selectable_value(&mut self.vtt_preset, i, preset.name)
                                    .clicked()
                                    && i != 0
                                {
                                    // "Custom" (index 0) leaves the fields alone.
                                    self.vtt_style.cue_settings = preset.cue_settings.into();
                                    self.vtt_style.style_block = preset.css.into();
                                }
                            }
                        });

                    ui.label("Cue settings");
                    if ui
                        .text_edit_singleline(&mut self.vtt_style.cue_settings)
                        .changed()
                    {
                        self.vtt_preset = 0;
                    }

                    ui.label("STYLE block CSS");
                    if ui
                        .text_edit_multiline(&mut self.vtt_style.style_block)
                        .changed()
                    {
                        self.vtt_preset = 0;
                    }
                });
        });
    }

    fn draw_status(&mut self, ui: &mut egui::Ui) {
        ui.add(
            egui::ProgressBar::new(f32::from(self.percent) / 100.0)
                .show_percentage(),
        );

        let color = match &self.last_run {
            Some(LastRun::Succeeded { .. }) => egui::Color32::from_rgb(80, 200, 120),
            Some(LastRun::Failed { .. }) => egui::Color32::from_rgb(255, 136, 68),
            Some(LastRun::Cancelled) => egui::Color32::from_rgb(160, 160, 160),
            None => egui::Color32::from_rgb(180, 180, 180),
        };
        if !self.status.is_empty() {
            ui.label(egui::RichText::new(self.status.as_str()).color(color).size(12.0));
        }

        let elapsed = match (&self.job, self.final_elapsed) {
            (Some(job), _) => Some(job.started.elapsed()),
            (None, Some(d)) => Some(d),
            _ => None,
        };
        if let Some(elapsed) = elapsed {
            ui.label(
                egui::RichText::new(format!("Elapsed: {:.0}s", elapsed.as_secs_f32()))
                    .color(egui::Color32::from_rgb(130, 130, 130))
                    .size(11.0),
            );
        }
    }

    fn draw_actions(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if self.job.is_some() {
                if ui.button("Cancel").clicked() {
                    self.cancel_job();
                }
            } else {
                let ready = self.source.is_some();
                if ui
                    .add_enabled(ready, egui::Button::new("Transcribe"))
                    .clicked()
                {
                    self.start_job();
                }
                if ui.button("Clear").clicked() {
                    self.source = None;
                    self.percent = 0;
                    self.status.clear();
                    self.last_run = None;
                    self.final_elapsed = None;
                }
            }
        });
    }
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for VoxtextApp {
    /// Called every frame by eframe.  Polls the job channel and dropped
    /// files, then renders the window.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_dropped_files(ctx);
        self.poll_job_events();

        // Track where the OS put us so on_exit can persist the position.
        if let Some(rect) = ctx.input(|i| i.viewport().outer_rect) {
            self.config.ui.window_position = Some((rect.min.x, rect.min.y));
        }

        // Keep the progress bar and elapsed timer live while a job runs.
        if self.job.is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_drop_zone(ui);
            ui.add_space(8.0);

            ui.columns(2, |cols| {
                self.draw_model_picker(&mut cols[0]);
                self.draw_format_picker(&mut cols[1]);
            });

            ui.add_space(4.0);
            self.draw_vtt_panel(ui);

            ui.separator();
            self.draw_status(ui);

            ui.add_space(4.0);
            self.draw_actions(ui);
        });
    }

    /// Persist the current selection and window position (best-effort).
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.config.engine.model = self.model;
        self.config.output.formats = self.selected_formats();
        self.config.vtt_style = self.vtt_style.clone();

        if let Err(e) = self.config.save() {
            log::warn!("failed to save settings: {e}");
        }
        log::info!("Voxtext closing");
    }
}
