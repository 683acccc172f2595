//! Video encoding of rendered frame sequences.
//!
//! Two fixed encoder profiles, both alpha-capable:
//! - VP9 in WebM for web embedding
//! - ProRes 4444 in MOV for downstream compositing

use std::path::Path;
use std::process::Command;

use spintable_common::error::{SpintableError, SpintableResult};

use crate::host::command_exists;
use crate::script::FRAME_PATTERN;

/// Encoder output profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeProfile {
    /// `libvpx-vp9`, `yuva420p`, constant-quality.
    WebmVp9,
    /// `prores_ks` profile 4 (4444), `yuva444p10le`.
    MovProres,
}

impl EncodeProfile {
    /// Output file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            EncodeProfile::WebmVp9 => "webm",
            EncodeProfile::MovProres => "mov",
        }
    }

    /// Full encoder argv (excluding the binary name) for encoding the frame
    /// sequence in `frames_dir` into `out_path`.
    pub fn args(&self, frames_dir: &Path, out_path: &Path, fps: u32, size: u32) -> Vec<String> {
        let sequence = frames_dir.join(FRAME_PATTERN);
        let mut args = vec![
            "-y".to_string(),
            "-framerate".to_string(),
            fps.to_string(),
            "-i".to_string(),
            sequence.display().to_string(),
            "-vf".to_string(),
            format!("scale={size}:{size}:flags=lanczos"),
        ];

        match self {
            EncodeProfile::WebmVp9 => {
                args.extend(
                    [
                        "-c:v",
                        "libvpx-vp9",
                        "-pix_fmt",
                        "yuva420p",
                        "-crf",
                        "32",
                        "-b:v",
                        "0",
                        "-row-mt",
                        "1",
                    ]
                    .map(String::from),
                );
            }
            EncodeProfile::MovProres => {
                args.extend(
                    [
                        "-c:v",
                        "prores_ks",
                        "-profile:v",
                        "4",
                        "-pix_fmt",
                        "yuva444p10le",
                    ]
                    .map(String::from),
                );
            }
        }

        args.push("-an".to_string());
        args.push(out_path.display().to_string());
        args
    }
}

/// Whether the external encoder is available on this system.
pub fn encoder_available() -> bool {
    command_exists("ffmpeg")
}

/// Encode the frame sequence in `frames_dir` with the given profile.
pub fn encode_sequence(
    frames_dir: &Path,
    out_path: &Path,
    profile: EncodeProfile,
    fps: u32,
    size: u32,
) -> SpintableResult<()> {
    let args = profile.args(frames_dir, out_path, fps, size);
    tracing::debug!(?profile, ?args, "Running ffmpeg");

    let output = Command::new("ffmpeg")
        .args(&args)
        .output()
        .map_err(|e| SpintableError::encode(format!("Failed to start ffmpeg: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SpintableError::encode(format!(
            "ffmpeg failed (status {}) for {}: {}",
            output.status,
            out_path.display(),
            stderr.trim()
        )));
    }

    tracing::info!(output = %out_path.display(), "Encoded");
    Ok(())
}
