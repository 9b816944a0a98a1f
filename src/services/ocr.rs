//! OCR capability
//!
//! Text recognition is consumed as an external collaborator behind the
//! [`OcrEngine`] trait; the default implementation shells out to the
//! `tesseract` CLI. Tests inject stubs instead.

use std::path::Path;
use std::process::Command;

/// Extracts embedded text from an image on disk.
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, image_path: &Path) -> Result<String, String>;
}

/// `tesseract <image> stdout` integration.
pub struct TesseractOcr;

impl OcrEngine for TesseractOcr {
    fn recognize(&self, image_path: &Path) -> Result<String, String> {
        if Command::new("tesseract").arg("--version").output().is_err() {
            return Err("tesseract not installed".to_string());
        }

        let output = Command::new("tesseract")
            .arg(image_path)
            .arg("stdout")
            .output()
            .map_err(|e| format!("Failed to run tesseract: {}", e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("tesseract failed: {}", stderr.trim()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
