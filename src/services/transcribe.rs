//! Speech-to-text capability
//!
//! Transcription is consumed as an external collaborator behind the
//! [`Transcriber`] trait; the default implementation shells out to a
//! whisper.cpp style CLI. Tests inject stubs instead.

use std::path::Path;
use std::process::Command;

/// A recognized transcript for one audio file.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub text: String,
}

/// Turns an audio file on disk into text.
pub trait Transcriber: Send + Sync {
    fn transcribe(&self, audio_path: &Path) -> Result<Transcript, String>;
}

/// `whisper-cli -nt -np -f <audio>` integration (whisper.cpp).
pub struct WhisperCli {
    binary: String,
}

impl WhisperCli {
    pub fn new() -> Self {
        Self {
            binary: "whisper-cli".to_string(),
        }
    }

    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for WhisperCli {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcriber for WhisperCli {
    fn transcribe(&self, audio_path: &Path) -> Result<Transcript, String> {
        if Command::new(&self.binary).arg("--help").output().is_err() {
            return Err(format!("{} not installed", self.binary));
        }

        // -nt: no timestamps, -np: no progress chatter on stderr
        let output = Command::new(&self.binary)
            .args(["-nt", "-np", "-f"])
            .arg(audio_path)
            .output()
            .map_err(|e| format!("Failed to run {}: {}", self.binary, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("Transcription failed: {}", stderr.trim()));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Transcript { text })
    }
}
