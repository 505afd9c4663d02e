//! iClass QR persistence
//!
//! Durable storage for the saved-item list: one JSON document holding the
//! serialized sequence, stored under a single key.
//!
//! - [`SavedItemStore`]: the total load/save contract used by the app
//! - [`JsonFileStore`]: the key as a JSON file on disk
//! - [`MemoryStore`]: in-process store for tests and dry runs

#![warn(unreachable_pub)]
#![allow(missing_docs)]

use iclass_core::SavedItem;
use parking_lot::Mutex;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Storage key, also the default file name stem
pub const STORAGE_KEY: &str = "iclass_saved_items";

/// Errors from the fallible store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the file failed
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored document is not a saved-item list
    #[error("corrupt data in {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Items could not be serialized
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    /// Create IO error for path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Load/save contract for the saved-item list
///
/// Both operations are total: `load` returns an empty list on missing or
/// corrupt data, and `save` logs failures instead of returning them. The
/// app keeps working with its in-memory list either way.
pub trait SavedItemStore: Send + Sync {
    /// Stored items, or empty
    fn load(&self) -> Vec<SavedItem>;

    /// Best-effort write
    fn save(&self, items: &[SavedItem]);
}

/// Saved items as a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store at an explicit file path
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store named after [`STORAGE_KEY`] inside `dir`
    #[inline]
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{STORAGE_KEY}.json")))
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load, distinguishing a missing file from a broken one
    ///
    /// # Errors
    /// Returns [`StoreError::Io`] or [`StoreError::Corrupt`].
    pub fn try_load(&self) -> Result<Vec<SavedItem>, StoreError> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        serde_json::from_str(&data).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Write atomically: temp file in the same directory, then rename
    ///
    /// # Errors
    /// Returns [`StoreError`] if the directory, temp file or rename fails.
    pub fn try_save(&self, items: &[SavedItem]) -> Result<(), StoreError> {
        let data = serde_json::to_vec(items)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| StoreError::io(&dir, e))?;
        tmp.write_all(&data)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;
        Ok(())
    }
}

impl SavedItemStore for JsonFileStore {
    fn load(&self) -> Vec<SavedItem> {
        match self.try_load() {
            Ok(items) => {
                tracing::debug!("loaded {} saved items from {}", items.len(), self.path.display());
                items
            }
            Err(e) => {
                tracing::warn!("ignoring stored items: {}", e);
                Vec::new()
            }
        }
    }

    fn save(&self, items: &[SavedItem]) {
        if let Err(e) = self.try_save(items) {
            tracing::error!("failed to save items: {}", e);
        }
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<Vec<SavedItem>>,
}

impl MemoryStore {
    #[inline]
    #[must_use]
    pub fn new(items: Vec<SavedItem>) -> Self {
        Self {
            items: Mutex::new(items),
        }
    }
}

impl SavedItemStore for MemoryStore {
    fn load(&self) -> Vec<SavedItem> {
        self.items.lock().clone()
    }

    fn save(&self, items: &[SavedItem]) {
        *self.items.lock() = items.to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iclass_core::Identifier;

    fn item(id: &str, label: &str) -> SavedItem {
        SavedItem::new(Identifier::normalize(id), label, 1)
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::default();
        assert!(store.load().is_empty());
        store.save(&[item("1", "a")]);
        assert_eq!(store.load(), vec![item("1", "a")]);
    }

    #[test]
    fn in_dir_uses_storage_key() {
        let store = JsonFileStore::in_dir("/data");
        assert_eq!(store.path(), Path::new("/data/iclass_saved_items.json"));
    }
}
