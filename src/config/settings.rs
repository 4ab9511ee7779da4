//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::engine::ModelTier;
use crate::export::OutputFormat;

use super::AppPaths;

// ---------------------------------------------------------------------------
// EngineConfig
// ---------------------------------------------------------------------------

/// Settings for the Whisper transcription engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Selected model quality tier.
    pub model: ModelTier,
    /// Speech language as an ISO-639-1 code. The transcription task always
    /// runs in "transcribe" (not "translate") mode.
    pub language: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model: ModelTier::Medium,
            language: "en".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// OutputConfig
// ---------------------------------------------------------------------------

/// Which output files are produced next to the source media file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Formats checked by default when the app starts.
    pub formats: Vec<OutputFormat>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            formats: vec![OutputFormat::Text],
        }
    }
}

// ---------------------------------------------------------------------------
// VttStyleConfig
// ---------------------------------------------------------------------------

/// Optional WebVTT caption styling, aimed at LMS video players.
///
/// When `enabled`, the VTT encoder emits a `STYLE` block (if `style_block` is
/// non-empty) and appends `cue_settings` to every cue timing line (if
/// non-empty).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VttStyleConfig {
    /// Master switch for caption styling.
    pub enabled: bool,
    /// Cue-settings string appended to every cue timing line,
    /// e.g. `"line:80%"`.
    pub cue_settings: String,
    /// Raw CSS placed inside the `STYLE` block.
    pub style_block: String,
}

impl Default for VttStyleConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            cue_settings: String::new(),
            style_block: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// VTT styling presets
// ---------------------------------------------------------------------------

/// A named cue-settings + CSS combination selectable from the styling panel.
#[derive(Debug)]
pub struct VttPreset {
    /// Name shown in the preset dropdown.
    pub name: &'static str,
    /// Cue-settings string applied to every cue.
    pub cue_settings: &'static str,
    /// CSS for the `STYLE` block.
    pub css: &'static str,
}

/// Built-in caption styling presets.
pub const VTT_PRESETS: &[VttPreset] = &[
    VttPreset {
        name: "Custom",
        cue_settings: "",
        css: "",
    },
    VttPreset {
        name: "LMS Standard",
        cue_settings: "line:80%",
        css: "::cue {\n  background-color: rgb(0, 0, 0, 60%);\n  line-height: 1.5em;\n}",
    },
    VttPreset {
        name: "Lower Third",
        cue_settings: "line:90% align:start",
        css: "::cue {\n  background-color: rgba(0, 0, 0, 0.8);\n  color: #ffffff;\n  font-size: 1.1em;\n}",
    },
    VttPreset {
        name: "High Contrast",
        cue_settings: "line:85%",
        css: "::cue {\n  background-color: #000000;\n  color: #ffff00;\n  font-weight: bold;\n}",
    },
];

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// Window appearance and behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Last saved window position `(x, y)` in screen pixels.  `None` means
    /// let the OS / window manager pick a position on first launch.
    pub window_position: Option<(f32, f32)>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_position: None,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use voxtext::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Transcription engine settings.
    pub engine: EngineConfig,
    /// Default output format selection.
    pub output: OutputConfig,
    /// WebVTT caption styling.
    pub vtt_style: VttStyleConfig,
    /// Window settings.
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Verify that a default `AppConfig` can be serialised to TOML and
    /// deserialised back without any data loss.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.engine.model, loaded.engine.model);
        assert_eq!(original.engine.language, loaded.engine.language);
        assert_eq!(original.output.formats, loaded.output.formats);
        assert_eq!(original.vtt_style.enabled, loaded.vtt_style.enabled);
        assert_eq!(original.vtt_style.cue_settings, loaded.vtt_style.cue_settings);
        assert_eq!(original.ui.window_position, loaded.ui.window_position);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.engine.model, default.engine.model);
        assert_eq!(config.output.formats, default.output.formats);
    }

    /// Verify default values.
    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.engine.model, ModelTier::Medium);
        assert_eq!(cfg.engine.language, "en");
        assert_eq!(cfg.output.formats, vec![OutputFormat::Text]);
        assert!(!cfg.vtt_style.enabled);
        assert!(cfg.vtt_style.cue_settings.is_empty());
        assert!(cfg.ui.window_position.is_none());
    }

    /// Verify that modified non-default values survive a round trip.
    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.engine.model = ModelTier::Large;
        cfg.output.formats = vec![OutputFormat::Text, OutputFormat::Srt, OutputFormat::Vtt];
        cfg.vtt_style.enabled = true;
        cfg.vtt_style.cue_settings = "line:80%".into();
        cfg.vtt_style.style_block = "::cue { color: #fff; }".into();
        cfg.ui.window_position = Some((100.0, 200.0));

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.engine.model, ModelTier::Large);
        assert_eq!(
            loaded.output.formats,
            vec![OutputFormat::Text, OutputFormat::Srt, OutputFormat::Vtt]
        );
        assert!(loaded.vtt_style.enabled);
        assert_eq!(loaded.vtt_style.cue_settings, "line:80%");
        assert_eq!(loaded.ui.window_position, Some((100.0, 200.0)));
    }

    /// Every preset except "Custom" carries both cue settings and CSS.
    #[test]
    fn presets_are_complete() {
        assert_eq!(VTT_PRESETS[0].name, "Custom");
        for preset in &VTT_PRESETS[1..] {
            assert!(!preset.cue_settings.is_empty(), "{}", preset.name);
            assert!(!preset.css.is_empty(), "{}", preset.name);
        }
    }
}
