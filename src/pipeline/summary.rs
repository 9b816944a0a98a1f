//! Summary data model
//!
//! Every processed file yields a [`Summary`]: the kind tag plus either the
//! kind-specific content fields or a single `error` string. Failure is always
//! data — a summary never carries an exception across the pipeline boundary.

use super::classify::Kind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A transient uploaded file, consumed once by the pipeline.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_name: String,
    pub content: Vec<u8>,
    pub declared_content_type: Option<String>,
}

impl UploadedFile {
    pub fn new(original_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            original_name: original_name.into(),
            content,
            declared_content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.declared_content_type = Some(content_type.into());
        self
    }
}

/// Bounded, structured summary of one file's content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    #[serde(rename = "type")]
    pub kind: Kind,
    #[serde(flatten)]
    pub outcome: SummaryOutcome,
}

impl Summary {
    pub fn failed(kind: Kind, error: impl Into<String>) -> Self {
        Self {
            kind,
            outcome: SummaryOutcome::Failed(FailedSummary {
                error: error.into(),
            }),
        }
    }

    /// Whether this summary captured a failure instead of content.
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, SummaryOutcome::Failed(_))
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            SummaryOutcome::Failed(f) => Some(&f.error),
            _ => None,
        }
    }
}

/// Closed set of per-kind summary payloads, plus the failure case.
///
/// Untagged on the wire: the kind tag lives on [`Summary`], so a serialized
/// summary reads as `{"type": "document", "char_count": …, "preview": …}` or
/// `{"type": "document", "error": "…"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SummaryOutcome {
    Tabular(TabularSummary),
    Document(DocumentSummary),
    Image(ImageSummary),
    Audio(AudioSummary),
    Video(VideoSummary),
    Other(OtherSummary),
    Failed(FailedSummary),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedSummary {
    pub error: String,
}

/// Row/column shape, missing-value counts, and per-numeric-column statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabularSummary {
    pub rows: usize,
    pub columns: Vec<String>,
    pub missing_values: BTreeMap<String, usize>,
    pub numeric_stats: BTreeMap<String, NumericStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericStats {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub char_count: usize,
    pub preview: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSummary {
    pub width: u32,
    pub height: u32,
    pub ocr_preview: String,
    /// Set when dimensions were readable but OCR itself failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr_error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioSummary {
    pub duration_sec: Option<f64>,
    pub transcript_preview: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoSummary {
    pub duration_sec: Option<f64>,
    /// Full audio summary of the extracted track, including its error case.
    pub audio_analysis: Box<Summary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtherSummary {
    pub size_bytes: u64,
    pub note: String,
}

/// One processed file: where it went and what we learned about it.
///
/// `stored_path` is `None` when storage itself failed; in that case the
/// summary carries the storage error and no summarization was attempted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub original_name: String,
    pub stored_path: Option<String>,
    pub kind: Kind,
    pub summary: Summary,
}

/// Aggregated per-file summaries attached to one chat request.
///
/// Serialized verbatim into the combined prompt and returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatContext {
    pub files: Vec<FileRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_summary_serializes_type_and_error() {
        let summary = Summary::failed(Kind::Document, "corrupt file");
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["type"], "document");
        assert_eq!(json["error"], "corrupt file");
        assert!(json.get("preview").is_none());
    }

    #[test]
    fn test_document_summary_serializes_flat() {
        let summary = Summary {
            kind: Kind::Document,
            outcome: SummaryOutcome::Document(DocumentSummary {
                char_count: 120,
                preview: "hello".to_string(),
            }),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["type"], "document");
        assert_eq!(json["char_count"], 120);
        assert_eq!(json["preview"], "hello");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_video_summary_nests_audio_analysis() {
        let summary = Summary {
            kind: Kind::Video,
            outcome: SummaryOutcome::Video(VideoSummary {
                duration_sec: Some(12.5),
                audio_analysis: Box::new(Summary::failed(Kind::Audio, "no transcriber")),
            }),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["type"], "video");
        assert_eq!(json["audio_analysis"]["type"], "audio");
        assert_eq!(json["audio_analysis"]["error"], "no transcriber");
    }

    #[test]
    fn test_image_summary_omits_absent_ocr_error() {
        let summary = Summary {
            kind: Kind::Image,
            outcome: SummaryOutcome::Image(ImageSummary {
                width: 8,
                height: 4,
                ocr_preview: String::new(),
                ocr_error: None,
            }),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("ocr_error").is_none());
    }

    #[test]
    fn test_chat_context_field_order() {
        let context = ChatContext {
            files: vec![FileRecord {
                original_name: "a.txt".to_string(),
                stored_path: Some("dataupload/documents/x_a.txt".to_string()),
                kind: Kind::Document,
                summary: Summary::failed(Kind::Document, "oops"),
            }],
        };
        let json = serde_json::to_string(&context).unwrap();
        // Stable field order: original_name, stored_path, kind, summary.
        let name_pos = json.find("original_name").unwrap();
        let path_pos = json.find("stored_path").unwrap();
        let kind_pos = json.find("\"kind\"").unwrap();
        let summary_pos = json.find("summary").unwrap();
        assert!(name_pos < path_pos && path_pos < kind_pos && kind_pos < summary_pos);
    }
}
