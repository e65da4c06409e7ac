//! Storage and cache error types.

use thiserror::Error;

/// Errors raised by a [`KeyValueStore`](crate::KeyValueStore) backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The host store could not be reached (e.g. `localStorage` disabled).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Writing the value would exceed the store's quota.
    #[error("Quota exceeded writing {key}: {attempted} bytes, quota {quota}")]
    QuotaExceeded {
        key: String,
        attempted: usize,
        quota: usize,
    },

    /// Failed to read a value.
    #[error("Read failed: {0}")]
    Read(String),

    /// Failed to write or remove a value.
    #[error("Write failed: {0}")]
    Write(String),

    /// Filesystem error from a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but is not a valid store document.
    #[error("Corrupt store: {0}")]
    Corrupt(String),
}

/// Errors from typed access through [`Cache`](crate::Cache).
#[derive(Error, Debug)]
pub enum CacheError {
    /// The underlying store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The stored value is not valid JSON for the requested type.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}
