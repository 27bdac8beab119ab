//! Key/value backends for durable client state.
//!
//! DESIGN
//! ======
//! Backends keep an in-memory map as the source of truth for reads and write
//! through to durable media on every mutation. A failed write leaves the
//! in-memory map mutated, so readers always observe the most recent call even
//! when persistence is degraded.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::StorageError;

/// String key/value storage that survives process restarts.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value could not be made durable.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal could not be made durable.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

fn lock(map: &Mutex<BTreeMap<String, String>>) -> MutexGuard<'_, BTreeMap<String, String>> {
    map.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// MEMORY
// =============================================================================

/// Process-local storage. Durable only for the lifetime of the value; share it
/// through an `Arc` to simulate a reload with a fresh [`crate::SessionStore`].
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        lock(&self.entries).insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        lock(&self.entries).remove(key);
        Ok(())
    }
}

// =============================================================================
// FILE
// =============================================================================

/// Storage backed by a single JSON object file.
///
/// The file is read once on [`FileStorage::open`] and rewritten in full on
/// every mutation via a sibling temp file and rename.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open (or lazily create) the storage file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a
    /// JSON object of strings. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries: BTreeMap<String, String> = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|source| StorageError::Corrupt { path: display(&path), source })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path: display(&path), source }),
        };
        tracing::debug!(path = %path.display(), keys = entries.len(), "opened session storage");
        Ok(Self { path, entries: Mutex::new(entries) })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io { path: display(&self.path), source };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let body = serde_json::to_string_pretty(entries)
            .map_err(|source| StorageError::Corrupt { path: display(&self.path), source })?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, body).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = lock(&self.entries);
        entries.insert(key.to_owned(), value.to_owned());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = lock(&self.entries);
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&entries)
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
