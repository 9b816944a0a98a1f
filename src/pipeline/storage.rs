//! Upload storage
//!
//! Persists uploaded bytes under a kind-partitioned directory tree:
//! `<root>/<kind folder>/<UTC timestamp>_<seq>_<sanitized name>`.
//!
//! Directories are created lazily and idempotently on every write. Names are
//! made unique by a microsecond timestamp plus a process-wide monotonic
//! counter, so two uploads with the same original name in one request can
//! never collide and concurrent writes need no locking. Sanitization reduces
//! the original name to its final component and strips anything that could
//! escape the root.

use super::classify::Kind;
use crate::error::StorageError;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Kind-partitioned writer for uploaded files.
pub struct UploadStore {
    root: PathBuf,
    seq: AtomicU64,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            seq: AtomicU64::new(0),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write one uploaded file to disk, returning its stored path.
    ///
    /// Exactly one file is written per call. Fails only on unrecoverable
    /// filesystem conditions; a missing directory is not an error.
    pub fn store(
        &self,
        kind: Kind,
        original_name: &str,
        data: &[u8],
    ) -> Result<PathBuf, StorageError> {
        let dir = self.root.join(kind.folder());
        std::fs::create_dir_all(&dir).map_err(|source| StorageError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        let timestamp = Utc::now().format("%Y%m%d_%H%M%S_%6f");
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        let safe_name = sanitize_filename(original_name);
        let path = dir.join(format!("{}_{:04}_{}", timestamp, seq, safe_name));

        std::fs::write(&path, data).map_err(|source| StorageError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(
            "[UploadStore] Stored {} ({} bytes) as {}",
            original_name,
            data.len(),
            path.display()
        );

        Ok(path)
    }
}

/// Reduce a client-supplied filename to a single safe path component.
///
/// Keeps ASCII alphanumerics, `.`, `-` and `_`; everything else (including
/// path separators) becomes `_`. Leading dots are stripped so the result can
/// neither traverse upward nor hide itself.
fn sanitize_filename(original: &str) -> String {
    // Both separators: client names may come from any platform.
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original);

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_store_creates_kind_folder_lazily() {
        let tmp = TempDir::new().unwrap();
        let store = UploadStore::new(tmp.path());

        assert!(!tmp.path().join("documents").exists());
        let path = store.store(Kind::Document, "notes.txt", b"hello").unwrap();

        assert!(path.starts_with(tmp.path().join("documents")));
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
    }

    #[test]
    fn test_duplicate_names_get_distinct_paths() {
        let tmp = TempDir::new().unwrap();
        let store = UploadStore::new(tmp.path());

        let a = store.store(Kind::Tabular, "data.csv", b"a").unwrap();
        let b = store.store(Kind::Tabular, "data.csv", b"b").unwrap();

        assert_ne!(a, b);
        assert!(a.starts_with(tmp.path().join("tabular")));
        assert!(b.starts_with(tmp.path().join("tabular")));
    }

    #[test]
    fn test_traversal_names_stay_under_root() {
        let tmp = TempDir::new().unwrap();
        let store = UploadStore::new(tmp.path());

        let path = store
            .store(Kind::Other, "../../etc/passwd", b"nope")
            .unwrap();

        assert!(path.starts_with(tmp.path().join("other")));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.ends_with("passwd"));
        assert!(!name.contains(".."));
    }

    #[test]
    fn test_store_fails_when_root_is_a_file() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();

        let store = UploadStore::new(&blocker);
        let err = store.store(Kind::Image, "a.png", b"x").unwrap_err();
        assert!(matches!(err, StorageError::CreateDir { .. }));
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("report.pdf"), "report.pdf");
        assert_eq!(sanitize_filename("my file (1).pdf"), "my_file__1_.pdf");
        assert_eq!(sanitize_filename("..\\..\\boot.ini"), "boot.ini");
        assert_eq!(sanitize_filename(".hidden"), "hidden");
        assert_eq!(sanitize_filename("///"), "file");
        assert_eq!(sanitize_filename(""), "file");
    }
}
