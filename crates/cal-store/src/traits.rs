use crate::error::StoreResult;

/// A key and the raw bytes stored under it.
pub type KeyValue = (String, Vec<u8>);

/// Ordered key-value view of the ledger world state.
///
/// All implementations must satisfy these invariants:
/// - Range scans return keys in ascending byte order.
/// - A `put` is visible to every later `get` and scan on the same handle.
/// - The store never interprets values.
pub trait StateStore: Send + Sync {
    /// Read the value stored at `key`.
    ///
    /// Returns `Ok(None)` if the key is absent.
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Write (create or replace) the value at `key`.
    fn put(&self, key: &str, value: Vec<u8>) -> StoreResult<()>;

    /// Remove `key`. Returns `true` if it was present.
    fn delete(&self, key: &str) -> StoreResult<bool>;

    /// All entries with `start <= key < end`, ascending.
    ///
    /// An empty `end` means the range is unbounded above, so
    /// `scan_range("", "")` covers the whole keyspace.
    fn scan_range(&self, start: &str, end: &str) -> StoreResult<Vec<KeyValue>>;

    /// Every entry in the store, ascending by key.
    fn scan_all(&self) -> StoreResult<Vec<KeyValue>> {
        self.scan_range("", "")
    }
}

impl<S: StateStore + ?Sized> StateStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        (**self).delete(key)
    }

    fn scan_range(&self, start: &str, end: &str) -> StoreResult<Vec<KeyValue>> {
        (**self).scan_range(start, end)
    }
}

impl<S: StateStore + ?Sized> StateStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        (**self).delete(key)
    }

    fn scan_range(&self, start: &str, end: &str) -> StoreResult<Vec<KeyValue>> {
        (**self).scan_range(start, end)
    }
}
