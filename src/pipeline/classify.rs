//! File type classification
//!
//! Maps an uploaded file's name (and optionally its declared content type)
//! to a semantic [`Kind`]. Classification is extension-based, case-insensitive
//! and total: anything unrecognized resolves to [`Kind::Other`] rather than
//! erroring. The declared content type is informational only — the extension
//! is authoritative, which keeps classification O(1) and dependency-free.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed classification of an uploaded file's content family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Tabular,
    Document,
    Image,
    Audio,
    Video,
    Other,
}

impl Kind {
    /// On-disk folder name for this kind under the upload root.
    ///
    /// Note the plural/alternate forms: `image` files land in `images/`,
    /// `document` files in `documents/`, etc.
    pub fn folder(&self) -> &'static str {
        match self {
            Kind::Tabular => "tabular",
            Kind::Document => "documents",
            Kind::Image => "images",
            Kind::Audio => "audio",
            Kind::Video => "videos",
            Kind::Other => "other",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Tabular => "tabular",
            Kind::Document => "document",
            Kind::Image => "image",
            Kind::Audio => "audio",
            Kind::Video => "video",
            Kind::Other => "other",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a file by its extension.
///
/// Deterministic and total. The `declared_content_type` (from the upload
/// request) never changes the result; it is only compared against the
/// extension-derived guess for diagnostics.
pub fn classify(filename: &str, declared_content_type: Option<&str>) -> Kind {
    let ext = extension_of(filename);

    let kind = match ext.as_deref() {
        Some("csv") | Some("xlsx") | Some("xls") | Some("json") => Kind::Tabular,
        Some("pdf") | Some("docx") | Some("txt") => Kind::Document,
        Some("png") | Some("jpg") | Some("jpeg") | Some("webp") | Some("bmp") => Kind::Image,
        Some("mp3") | Some("wav") | Some("m4a") => Kind::Audio,
        Some("mp4") | Some("mkv") | Some("mov") | Some("avi") => Kind::Video,
        _ => Kind::Other,
    };

    if let (Some(declared), Some(ext)) = (declared_content_type, ext.as_deref()) {
        let guessed = mime_guess::from_ext(ext).first();
        if let Some(guessed) = guessed {
            if guessed.essence_str() != declared {
                tracing::debug!(
                    "[Classify] Declared content type {} disagrees with extension .{} ({}) for {}",
                    declared,
                    ext,
                    guessed.essence_str(),
                    filename
                );
            }
        }
    }

    kind
}

/// Lowercased extension of a filename, without the dot.
fn extension_of(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.trim_start_matches('.').to_lowercase())
        .filter(|e| !e.is_empty())
}
