//! File intelligence pipeline
//!
//! For each uploaded file, independently: classify → store → summarize. Every
//! per-file failure (storage, extraction, timeout, even a panic in an
//! extractor) is captured as that file's error summary; no file aborts the
//! batch, and output order always matches input order.

pub mod classify;
pub mod document;
pub mod image;
pub mod media;
pub mod storage;
pub mod summary;
pub mod tabular;

pub use classify::{classify, Kind};
pub use storage::UploadStore;
pub use summary::{
    AudioSummary, ChatContext, DocumentSummary, FileRecord, ImageSummary, NumericStats,
    OtherSummary, Summary, SummaryOutcome, TabularSummary, UploadedFile, VideoSummary,
};

use crate::config::PipelineConfig;
use crate::error::RequestError;
use crate::services::{
    FfmpegTools, MediaTools, OcrEngine, TesseractOcr, Transcriber, WhisperCli,
};
use std::path::Path;
use std::sync::Arc;

/// Orchestrates classify → store → summarize over a batch of uploads.
///
/// External capabilities are injected at construction; one instance serves
/// one or more requests without shared mutable state beyond the filesystem.
pub struct Pipeline {
    store: Arc<UploadStore>,
    config: PipelineConfig,
    ocr: Arc<dyn OcrEngine>,
    transcriber: Arc<dyn Transcriber>,
    media: Arc<dyn MediaTools>,
}

impl Pipeline {
    /// Pipeline with the default CLI-backed capabilities.
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_engines(
            config,
            Arc::new(TesseractOcr),
            Arc::new(WhisperCli::new()),
            Arc::new(FfmpegTools),
        )
    }

    pub fn with_engines(
        config: PipelineConfig,
        ocr: Arc<dyn OcrEngine>,
        transcriber: Arc<dyn Transcriber>,
        media: Arc<dyn MediaTools>,
    ) -> Self {
        Self {
            store: Arc::new(UploadStore::new(config.upload_root.clone())),
            config,
            ocr,
            transcriber,
            media,
        }
    }

    /// Process a batch of uploads, returning exactly one record per file in
    /// input order.
    ///
    /// Only batch-level conditions fail the call; every per-file problem is
    /// recorded in that file's summary.
    pub async fn process(&self, uploads: Vec<UploadedFile>) -> Result<Vec<FileRecord>, RequestError> {
        if uploads.len() > self.config.max_files_per_request {
            return Err(RequestError::TooManyFiles {
                count: uploads.len(),
                max: self.config.max_files_per_request,
            });
        }

        let mut records = Vec::with_capacity(uploads.len());
        for upload in uploads {
            records.push(self.process_one(upload).await);
        }
        Ok(records)
    }

    async fn process_one(&self, upload: UploadedFile) -> FileRecord {
        let kind = classify(
            &upload.original_name,
            upload.declared_content_type.as_deref(),
        );
        let original_name = upload.original_name.clone();

        let store = Arc::clone(&self.store);
        let config = self.config.clone();
        let ocr = Arc::clone(&self.ocr);
        let transcriber = Arc::clone(&self.transcriber);
        let tools = Arc::clone(&self.media);

        // Extraction work is blocking (file IO, external CLIs) and bounded by
        // the configured per-file timeout so one slow file cannot stall the
        // batch indefinitely.
        let task = tokio::task::spawn_blocking(move || {
            store_and_summarize(&store, &config, kind, &upload, &*ocr, &*transcriber, &*tools)
        });

        let (stored_path, summary) = match tokio::time::timeout(self.config.file_timeout, task).await
        {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => {
                tracing::error!(
                    "[Pipeline] Processing panicked for {}: {}",
                    original_name,
                    join_err
                );
                (None, Summary::failed(kind, "file processing panicked"))
            }
            Err(_) => {
                tracing::warn!(
                    "[Pipeline] Processing timed out for {} after {:?}",
                    original_name,
                    self.config.file_timeout
                );
                (
                    None,
                    Summary::failed(
                        kind,
                        format!(
                            "processing timed out after {}s",
                            self.config.file_timeout.as_secs()
                        ),
                    ),
                )
            }
        };

        FileRecord {
            original_name,
            stored_path,
            kind,
            summary,
        }
    }
}

fn store_and_summarize(
    store: &UploadStore,
    config: &PipelineConfig,
    kind: Kind,
    upload: &UploadedFile,
    ocr: &dyn OcrEngine,
    transcriber: &dyn Transcriber,
    tools: &dyn MediaTools,
) -> (Option<String>, Summary) {
    if upload.content.len() as u64 > config.max_upload_bytes {
        return (
            None,
            Summary::failed(
                kind,
                format!(
                    "file exceeds upload limit of {} bytes",
                    config.max_upload_bytes
                ),
            ),
        );
    }

    let path = match store.store(kind, &upload.original_name, &upload.content) {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!(
                "[Pipeline] Storage failed for {}: {}",
                upload.original_name,
                e
            );
            return (None, Summary::failed(kind, format!("storage failed: {}", e)));
        }
    };

    let summary = summarize(kind, &path, &upload.content, ocr, transcriber, tools);
    (Some(path.to_string_lossy().into_owned()), summary)
}

/// Per-kind dispatch. Any extractor error becomes a failed summary here; the
/// caller never sees a panic or a propagated error.
fn summarize(
    kind: Kind,
    path: &Path,
    data: &[u8],
    ocr: &dyn OcrEngine,
    transcriber: &dyn Transcriber,
    tools: &dyn MediaTools,
) -> Summary {
    let outcome = match kind {
        Kind::Tabular => tabular::summarize(path, data).map(SummaryOutcome::Tabular),
        Kind::Document => document::summarize(path, data).map(SummaryOutcome::Document),
        Kind::Image => image::summarize(path, data, ocr).map(SummaryOutcome::Image),
        Kind::Audio => media::summarize_audio(path, transcriber, tools).map(SummaryOutcome::Audio),
        Kind::Video => media::summarize_video(path, transcriber, tools).map(SummaryOutcome::Video),
        Kind::Other => Ok(SummaryOutcome::Other(OtherSummary {
            size_bytes: data.len() as u64,
            note: "Unsupported or unknown file type".to_string(),
        })),
    };

    match outcome {
        Ok(outcome) => Summary { kind, outcome },
        Err(error) => {
            tracing::debug!("[Pipeline] {} summarizer failed for {}: {}", kind, path.display(), error);
            Summary::failed(kind, error)
        }
    }
}
