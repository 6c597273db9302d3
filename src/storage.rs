//! Draft storage backends
//!
//! A store is a flat key/value map of JSON strings, the same contract a
//! browser's local storage offers. The wizard writes one whole snapshot per
//! save under a single key, so a backend only has to make each individual
//! `save` atomic.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tempfile::NamedTempFile;

use crate::error::{PlaybookError, Result};

/// Key/value persistence used for drafts
pub trait DraftStore: Send {
    /// Read the value under `key`, `Ok(None)` when nothing is stored
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`
    fn save(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the value under `key`; deleting a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Debug, Default)]
struct MemoryInner {
    entries: HashMap<String, String>,
    writes: usize,
    fail_reads: bool,
    fail_writes: bool,
}

/// Process-local store.
///
/// Clones share the same map, which lets a test inspect what a controller
/// wrote. Reads and writes can be made to fail to exercise the degraded
/// paths (disabled storage, quota exceeded).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        // The map holds plain strings; a panic elsewhere cannot leave it half-written
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of successful `save` calls so far
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    /// Raw value under `key`, bypassing failure injection
    pub fn peek(&self, key: &str) -> Option<String> {
        self.lock().entries.get(key).cloned()
    }

    /// Store a raw value directly, bypassing failure injection
    pub fn seed(&self, key: &str, value: &str) {
        self.lock().entries.insert(key.to_string(), value.to_string());
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }
}

impl DraftStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let inner = self.lock();
        if inner.fail_reads {
            return Err(PlaybookError::storage("storage is disabled"));
        }
        Ok(inner.entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(PlaybookError::storage("quota exceeded"));
        }
        inner.entries.insert(key.to_string(), value.to_string());
        inner.writes += 1;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(PlaybookError::storage("storage is disabled"));
        }
        inner.entries.remove(key);
        Ok(())
    }
}

// ============================================================================
// File store
// ============================================================================

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    ///
    /// Keys are restricted to a file-name-safe alphabet so a key can never
    /// point outside the store directory.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        if !is_valid_key(key) {
            return Err(PlaybookError::storage(format!("invalid storage key {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

/// Keys are non-empty and use only ASCII letters, digits, `-`, `_` and `.`,
/// never starting with a dot.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

impl DraftStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        // Write beside the target then rename, so readers never see a partial draft
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.persist(&path).map_err(|e| e.error)?;
        tracing::debug!(path = %path.display(), bytes = value.len(), "draft written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip_and_count() {
        let store = MemoryStore::new();
        assert_eq!(store.load("k").expect("load"), None);

        store.save("k", "{}").expect("save");
        store.save("k", "[]").expect("save");

        assert_eq!(store.load("k").expect("load").as_deref(), Some("[]"));
        assert_eq!(store.write_count(), 2);

        store.remove("k").expect("remove");
        assert_eq!(store.peek("k"), None);
    }

    #[test]
    fn test_memory_store_failure_injection() {
        let store = MemoryStore::new();
        store.seed("k", "v");

        store.set_fail_reads(true);
        assert!(store.load("k").is_err());

        store.set_fail_writes(true);
        assert!(store.save("k", "w").is_err());
        assert_eq!(store.peek("k").as_deref(), Some("v"));
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path().join("drafts"));

        assert_eq!(store.load("study").expect("load"), None);
        store.save("study", "{\"a\":1}").expect("save");
        assert_eq!(
            store.load("study").expect("load").as_deref(),
            Some("{\"a\":1}")
        );
        assert!(dir.path().join("drafts/study.json").exists());

        store.remove("study").expect("remove");
        store.remove("study").expect("second remove is a no-op");
        assert_eq!(store.load("study").expect("load"), None);
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path());
        assert!(store.save("../escape", "x").is_err());
        assert!(store.load("a/b").is_err());
        assert!(!is_valid_key(""));
        assert!(!is_valid_key(".hidden"));
        assert!(is_valid_key("feasibility-study-draft"));
    }
}
