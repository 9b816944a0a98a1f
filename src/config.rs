//! Pipeline configuration
//!
//! Aggregate caps and the per-file processing timeout are deliberate,
//! explicit parameters rather than inferred defaults. Values come from the
//! environment (`.env` supported via dotenvy, see [`crate::init_tracing`])
//! with documented fallbacks.

use std::path::PathBuf;
use std::time::Duration;

/// Default upload root, relative to the working directory.
const DEFAULT_UPLOAD_ROOT: &str = "dataupload";

/// Default cap on files per request.
const DEFAULT_MAX_FILES: usize = 16;

/// Default cap on a single file's size (50 MiB).
const DEFAULT_MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Default bound on one file's classify+store+summarize work.
const DEFAULT_FILE_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root directory for kind-partitioned uploads. No retention or cleanup
    /// policy is applied; stored files persist indefinitely.
    pub upload_root: PathBuf,
    /// Requests with more files than this are rejected at the boundary.
    pub max_files_per_request: usize,
    /// Files larger than this get a per-file error summary and are not stored.
    pub max_upload_bytes: u64,
    /// Bound on one file's processing, covering external tool calls.
    pub file_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            upload_root: PathBuf::from(DEFAULT_UPLOAD_ROOT),
            max_files_per_request: DEFAULT_MAX_FILES,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            file_timeout: Duration::from_secs(DEFAULT_FILE_TIMEOUT_SECS),
        }
    }
}

impl PipelineConfig {
    /// Read configuration from the environment, falling back to defaults for
    /// anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            upload_root: std::env::var("DOSSIER_UPLOAD_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_root),
            max_files_per_request: env_parse("DOSSIER_MAX_FILES")
                .unwrap_or(defaults.max_files_per_request),
            max_upload_bytes: env_parse("DOSSIER_MAX_UPLOAD_BYTES")
                .unwrap_or(defaults.max_upload_bytes),
            file_timeout: env_parse("DOSSIER_FILE_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.file_timeout),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("[Config] Ignoring unparseable {}={}", key, raw);
            None
        }
    }
}
