//! Media tool capability
//!
//! Audio track extraction and duration probing are consumed as an external
//! collaborator behind the [`MediaTools`] trait; the default implementation
//! shells out to `ffmpeg`/`ffprobe`. Tests inject stubs instead.

use std::path::Path;
use std::process::Command;

/// External media toolbox for audio/video files.
pub trait MediaTools: Send + Sync {
    /// Extract the audio track of `input` into a mono 16 kHz WAV at `output`.
    fn extract_audio(&self, input: &Path, output: &Path) -> Result<(), String>;

    /// Container duration in seconds, if cheaply available.
    fn probe_duration(&self, path: &Path) -> Option<f64>;
}

/// `ffmpeg`/`ffprobe` integration.
pub struct FfmpegTools;

impl MediaTools for FfmpegTools {
    fn extract_audio(&self, input: &Path, output: &Path) -> Result<(), String> {
        if Command::new("ffmpeg").arg("-version").output().is_err() {
            return Err("ffmpeg not installed".to_string());
        }

        let result = Command::new("ffmpeg")
            .arg("-i")
            .arg(input)
            .args(["-ac", "1", "-ar", "16000", "-y"])
            .arg(output)
            .output()
            .map_err(|e| format!("Failed to run ffmpeg: {}", e))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(format!("ffmpeg failed: {}", last_line(&stderr)));
        }

        Ok(())
    }

    fn probe_duration(&self, path: &Path) -> Option<f64> {
        let output = Command::new("ffprobe")
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(path)
            .output()
            .ok()?;

        if !output.status.success() {
            return None;
        }

        String::from_utf8_lossy(&output.stdout)
            .trim()
            .parse::<f64>()
            .ok()
    }
}

/// ffmpeg prints a wall of banner text; the failure reason is the last line.
fn last_line(stderr: &str) -> &str {
    stderr.lines().rev().find(|l| !l.trim().is_empty()).unwrap_or("unknown error")
}
