use std::path::PathBuf;

/// Errors from state store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A lock guarding the backing map was poisoned by a panicking writer.
    #[error("state store lock poisoned")]
    LockPoisoned,

    /// A snapshot file could not be parsed.
    #[error("corrupt snapshot {path}: {reason}")]
    CorruptSnapshot { path: PathBuf, reason: String },

    /// A value could not be represented in the snapshot format.
    #[error("value at key {key} is not valid UTF-8")]
    NonUtf8Value { key: String },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
