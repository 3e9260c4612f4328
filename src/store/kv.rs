//! Key-value persistence port.
//!
//! All durable client state lives behind [`KeyValueStore`]: string keys
//! mapped to string values, read at open and rewritten in full on every
//! `set`. The session flag and the topics collection are the only
//! consumers; neither needs more structure than this.
//!
//! Two implementations are provided: [`FileStore`] persists the map as a
//! JSON document on disk, [`MemoryStore`] backs tests. Concurrent
//! processes writing the same file are not reconciled — the last writer
//! wins. This is a known limitation, not a supported mode.

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access store file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize store contents: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The store's internal lock was poisoned by a panic in another thread.
    #[error("Store lock poisoned")]
    Poisoned,
}

/// Read/write interface over string-keyed durable state.
///
/// Writes are synchronous and total: a `set` must leave the backing
/// medium holding the complete current map before it returns.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

// ============================================================================
// FileStore
// ============================================================================

/// File-backed store: a single JSON object of string values.
///
/// The whole map is kept in memory; `get` never touches the disk after
/// open. Every `set` rewrites the file through a temp-file-then-rename
/// sequence so the document on disk is never partially written.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open a store file, creating the in-memory map from its contents.
    ///
    /// - Missing file → empty map (the file is created on first `set`)
    /// - Unreadable JSON → empty map with a warning; the damaged file is
    ///   left in place until the next `set` overwrites it
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Store file is not valid JSON, starting from an empty store"
                    );
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No store file found, starting empty");
                HashMap::new()
            }
            Err(e) => return Err(StoreError::Io(e)),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Serialize the full map and atomically replace the store file.
    ///
    /// Write-to-temp-then-rename keeps the destination from ever holding a
    /// partial document. The temp name carries a timestamp suffix so a
    /// stale temp file from a crashed run cannot be reused.
    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        use std::time::{SystemTime, UNIX_EPOCH};
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let temp_path = self.path.with_extension(format!("tmp.{:016x}", suffix));

        let content = serde_json::to_string_pretty(entries)?;

        let mut options = std::fs::OpenOptions::new();
        options.write(true).create_new(true);
        // User-only access: the store holds the session flag
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut temp_file = options.open(&temp_path)?;
        if let Err(e) = temp_file
            .write_all(content.as_bytes())
            .and_then(|_| temp_file.sync_all())
        {
            let _ = std::fs::remove_file(&temp_path);
            return Err(StoreError::Io(e));
        }
        drop(temp_file);

        // Rename over the destination. On Windows, rename fails if the
        // destination exists, so remove it first.
        #[cfg(windows)]
        if self.path.exists() {
            if let Err(e) = std::fs::remove_file(&self.path) {
                let _ = std::fs::remove_file(&temp_path);
                return Err(StoreError::Io(e));
            }
        }

        if let Err(e) = std::fs::rename(&temp_path, &self.path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(StoreError::Io(e));
        }

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }
}

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory store for tests. Same semantics as [`FileStore`] minus the disk.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
