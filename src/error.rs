//! Typed errors at the pipeline boundary
//!
//! Per-file failures never surface here — they are captured as data inside
//! each record's summary. These types cover the two places a whole request
//! can fail: the storage layer hitting an unrecoverable filesystem condition,
//! and the request boundary itself.

use std::path::PathBuf;
use thiserror::Error;

/// Unrecoverable filesystem failure while persisting an upload.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to create upload directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Request-level failure: surfaced to the caller as a whole, never as a
/// per-file error summary.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("prompt must not be empty")]
    EmptyPrompt,

    #[error("too many files in one request: {count} (limit {max})")]
    TooManyFiles { count: usize, max: usize },

    #[error("model generation failed: {0}")]
    Model(String),
}
