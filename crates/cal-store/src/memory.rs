use std::collections::BTreeMap;
use std::io::Write;
use std::ops::Bound;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::{KeyValue, StateStore};

/// In-memory, `BTreeMap`-based state store.
///
/// Intended for tests, embedding, and the command-line driver. Entries are
/// held behind a `RwLock` and cloned on read. The map keeps keys sorted, so
/// range scans come out in ledger order without extra work.
///
/// The whole map can be written to and restored from a JSON snapshot file
/// mapping each key to its UTF-8 value.
pub struct InMemoryStateStore {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryStateStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read_guard()?.len())
    }

    /// Returns `true` if the store holds no keys.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read_guard()?.is_empty())
    }

    /// Load a store from a JSON snapshot. A missing file yields an empty store.
    pub fn open_snapshot(path: &Path) -> StoreResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no snapshot found; starting empty");
            return Ok(Self::new());
        }
        let raw = std::fs::read_to_string(path)?;
        let map: BTreeMap<String, String> =
            serde_json::from_str(&raw).map_err(|e| StoreError::CorruptSnapshot {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        let entries = map
            .into_iter()
            .map(|(key, value)| (key, value.into_bytes()))
            .collect::<BTreeMap<_, _>>();
        debug!(path = %path.display(), keys = entries.len(), "snapshot loaded");
        Ok(Self {
            entries: RwLock::new(entries),
        })
    }

    /// Write the current contents to `path` as a JSON snapshot.
    ///
    /// The file is written to a temporary sibling and renamed into place, so
    /// a crash never leaves a half-written snapshot behind.
    pub fn save_snapshot(&self, path: &Path) -> StoreResult<()> {
        let map = {
            let entries = self.read_guard()?;
            let mut map = BTreeMap::new();
            for (key, value) in entries.iter() {
                let text = String::from_utf8(value.clone())
                    .map_err(|_| StoreError::NonUtf8Value { key: key.clone() })?;
                map.insert(key.clone(), text);
            }
            map
        };
        let json = serde_json::to_vec_pretty(&map)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;
        debug!(path = %path.display(), keys = map.len(), "snapshot saved");
        Ok(())
    }

    fn read_guard(&self) -> StoreResult<RwLockReadGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.entries.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write_guard(&self) -> StoreResult<RwLockWriteGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.entries.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl Default for InMemoryStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore for InMemoryStateStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.read_guard()?.get(key).cloned())
    }

    fn put(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        self.write_guard()?.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        Ok(self.write_guard()?.remove(key).is_some())
    }

    fn scan_range(&self, start: &str, end: &str) -> StoreResult<Vec<KeyValue>> {
        let entries = self.read_guard()?;
        let upper = if end.is_empty() {
            Bound::Unbounded
        } else if start >= end {
            return Ok(Vec::new());
        } else {
            Bound::Excluded(end)
        };
        Ok(entries
            .range::<str, _>((Bound::Included(start), upper))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

impl std::fmt::Debug for InMemoryStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.entries.read().map(|e| e.len()).unwrap_or(0);
        f.debug_struct("InMemoryStateStore")
            .field("key_count", &count)
            .finish()
    }
}
