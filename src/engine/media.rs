//! Media decoding via the external `ffmpeg` binary.
//!
//! Whisper wants 16 kHz mono f32 PCM; anything container-shaped (mp3, mp4,
//! mkv, …) is handed to `ffmpeg` found on the execution path.  There is no
//! in-process decoder — a missing binary maps to
//! [`EngineError::DecoderMissing`] so the UI can show installation
//! instructions.

use std::io;
use std::path::Path;
use std::process::Command;

use super::EngineError;

/// Sample rate Whisper models are trained on.
pub const WHISPER_SAMPLE_RATE: u32 = 16_000;

/// Decode `media` into 16 kHz mono f32 samples using `ffmpeg`.
///
/// Blocking — runs on the job worker thread.
pub fn decode_to_pcm(media: &Path) -> Result<Vec<f32>, EngineError> {
    let output = Command::new("ffmpeg")
        .args([
            "-nostdin",
            "-threads",
            "0",
            "-i",
        ])
        .arg(media)
        .args([
            "-f",
            "f32le",
            "-ac",
            "1",
            "-acodec",
            "pcm_f32le",
            "-ar",
            "16000",
            "pipe:1",
        ])
        .output()
        .map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                EngineError::DecoderMissing
            } else {
                EngineError::Decode(format!("failed to run ffmpeg: {e}"))
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(EngineError::Decode(format!(
            "ffmpeg exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(bytes_to_samples(&output.stdout))
}

/// Reinterpret little-endian f32 PCM bytes as samples.
///
/// A trailing partial frame (fewer than 4 bytes) is dropped.
fn bytes_to_samples(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_to_samples_round_trips() {
        let samples = [0.0f32, 0.5, -1.0, 0.25];
        let mut bytes = Vec::new();
        for s in samples {
            bytes.extend_from_slice(&s.to_le_bytes());
        }

        let decoded = bytes_to_samples(&bytes);
        assert_eq!(decoded, samples);
    }

    #[test]
    fn bytes_to_samples_drops_trailing_partial_frame() {
        let mut bytes = 1.0f32.to_le_bytes().to_vec();
        bytes.push(0xFF);

        let decoded = bytes_to_samples(&bytes);
        assert_eq!(decoded, vec![1.0]);
    }

    #[test]
    fn bytes_to_samples_empty_input() {
        assert!(bytes_to_samples(&[]).is_empty());
    }
}
