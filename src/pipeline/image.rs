//! Image summarizer
//!
//! Reads pixel dimensions with the `image` crate and runs the injected OCR
//! engine over the stored file. An unreadable image is an error; a readable
//! image whose OCR fails keeps its dimensions and records the OCR failure
//! separately, so the model still learns what it can.

use super::summary::ImageSummary;
use crate::services::OcrEngine;
use std::path::Path;

/// Characters of recognized text kept in the preview.
const OCR_PREVIEW_CHARS: usize = 2000;

pub fn summarize(path: &Path, data: &[u8], ocr: &dyn OcrEngine) -> Result<ImageSummary, String> {
    let img = image::load_from_memory(data).map_err(|e| format!("Failed to open image: {}", e))?;
    let (width, height) = (img.width(), img.height());

    let (text, ocr_error) = match ocr.recognize(path) {
        Ok(text) => (text, None),
        Err(e) => {
            tracing::warn!("[Image] OCR failed for {}: {}", path.display(), e);
            (String::new(), Some(e))
        }
    };

    let ocr_preview: String = text.trim().chars().take(OCR_PREVIEW_CHARS).collect();

    Ok(ImageSummary {
        width,
        height,
        ocr_preview,
        ocr_error,
    })
}
