//! Model registry, metadata, path resolution and first-use download.
//!
//! [`MODEL_REGISTRY`] maps each [`ModelTier`] to a GGML file hosted on the
//! ggerganov/whisper.cpp Hugging Face repo.  [`ensure_model`] resolves the
//! on-disk location under the models directory and downloads the file on
//! first use.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::EngineError;

// ---------------------------------------------------------------------------
// ModelTier
// ---------------------------------------------------------------------------

/// Quality tier of a Whisper GGML model.
///
/// Larger models are slower but more accurate; Medium is the recommended
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    /// ~142 MB — fastest, poor accuracy; useful for testing.
    Base,
    /// ~466 MB — low accuracy.
    Small,
    /// ~1.5 GB — recommended default.
    Medium,
    /// ~3 GB — highest accuracy, slowest.
    Large,
}

impl ModelTier {
    /// All tiers, in ascending size order (UI display order).
    pub const ALL: [ModelTier; 4] = [
        ModelTier::Base,
        ModelTier::Small,
        ModelTier::Medium,
        ModelTier::Large,
    ];

    /// Stable identifier used in settings and log lines.
    pub fn id(self) -> &'static str {
        self.info().id
    }

    /// Static metadata for this tier.
    pub fn info(self) -> &'static ModelInfo {
        &MODEL_REGISTRY[self as usize]
    }
}

// ---------------------------------------------------------------------------
// ModelInfo
// ---------------------------------------------------------------------------

/// Static metadata for a single GGML model file.
#[derive(Debug)]
pub struct ModelInfo {
    /// Unique identifier (e.g. `"medium"`).
    pub id: &'static str,
    /// Human-readable label shown next to the tier radio button.
    pub display_name: &'static str,
    /// File name under the models directory.
    pub file_name: &'static str,
    /// Approximate file size in megabytes.
    pub file_size_mb: u64,
    /// Download URL for the GGML file.
    pub source_url: &'static str,
}

/// One entry per [`ModelTier`], indexed by the tier's discriminant.
pub const MODEL_REGISTRY: &[ModelInfo] = &[
    ModelInfo {
        id: "base",
        display_name: "Poor/Testing (142MB)",
        file_name: "ggml-base.bin",
        file_size_mb: 142,
        source_url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-base.bin",
    },
    ModelInfo {
        id: "small",
        display_name: "Low (466MB)",
        file_name: "ggml-small.bin",
        file_size_mb: 466,
        source_url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-small.bin",
    },
    ModelInfo {
        id: "medium",
        display_name: "Medium (recommended) (1.5GB)",
        file_name: "ggml-medium.bin",
        file_size_mb: 1_500,
        source_url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-medium.bin",
    },
    ModelInfo {
        id: "large",
        display_name: "High (3GB)",
        file_name: "ggml-large-v3.bin",
        file_size_mb: 3_000,
        source_url: "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-large-v3.bin",
    },
];

// ---------------------------------------------------------------------------
// TlsPolicy
// ---------------------------------------------------------------------------

/// Certificate-validation policy for model downloads.
///
/// The job runner starts with [`TlsPolicy::Verify`] and retries exactly once
/// with [`TlsPolicy::AcceptInvalid`] when the first attempt fails
/// certificate validation — some corporate proxies re-sign HTTPS traffic
/// with certificates the OS store does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsPolicy {
    /// Normal certificate validation.
    Verify,
    /// Skip certificate validation (retry path only).
    AcceptInvalid,
}

// ---------------------------------------------------------------------------
// Path resolution + download
// ---------------------------------------------------------------------------

/// Full path to the GGML file for the given tier under `models_dir`.
pub fn model_path(models_dir: &Path, tier: ModelTier) -> PathBuf {
    models_dir.join(tier.info().file_name)
}

/// Returns `true` if the model file for `tier` exists on disk.
pub fn is_downloaded(models_dir: &Path, tier: ModelTier) -> bool {
    model_path(models_dir, tier).exists()
}

/// Resolve the model file for `tier`, downloading it on first use.
///
/// Blocking — the caller is expected to be on a worker thread.
pub fn ensure_model(
    models_dir: &Path,
    tier: ModelTier,
    tls: TlsPolicy,
) -> Result<PathBuf, EngineError> {
    let path = model_path(models_dir, tier);
    if path.exists() {
        return Ok(path);
    }

    let info = tier.info();
    log::info!(
        "model: downloading {} ({} MB) from {}",
        info.id,
        info.file_size_mb,
        info.source_url
    );

    fs::create_dir_all(models_dir)
        .map_err(|e| EngineError::Download(format!("cannot create models dir: {e}")))?;

    let client = reqwest::blocking::Client::builder()
        .danger_accept_invalid_certs(tls == TlsPolicy::AcceptInvalid)
        .build()
        .map_err(|e| EngineError::Download(e.to_string()))?;

    let mut response = client
        .get(info.source_url)
        .send()
        .map_err(classify_download_error)?;

    if !response.status().is_success() {
        return Err(EngineError::Download(format!(
            "server returned {} for {}",
            response.status(),
            info.source_url
        )));
    }

    // Write to a .part file and rename so an interrupted download never
    // leaves a truncated file that load() would then trust.
    let part = path.with_extension("bin.part");
    let result = (|| -> Result<(), EngineError> {
        let mut file = fs::File::create(&part)
            .map_err(|e| EngineError::Download(e.to_string()))?;
        response
            .copy_to(&mut file)
            .map_err(classify_download_error)?;
        Ok(())
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&part);
        return Err(e);
    }

    fs::rename(&part, &path).map_err(|e| EngineError::Download(e.to_string()))?;
    log::info!("model: saved {}", path.display());
    Ok(path)
}

/// Map a reqwest error to the engine taxonomy, detecting certificate
/// failures so callers can retry with relaxed validation.
fn classify_download_error(err: reqwest::Error) -> EngineError {
    let mut description = err.to_string();
    let mut source: Option<&(dyn std::error::Error + 'static)> = std::error::Error::source(&err);
    while let Some(inner) = source {
        description.push_str(": ");
        description.push_str(&inner.to_string());
        source = inner.source();
    }

    if description.to_lowercase().contains("certificate") {
        EngineError::Certificate(description)
    } else {
        EngineError::Download(description)
    }
}
