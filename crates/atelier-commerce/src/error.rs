//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in cart operations.
#[derive(Error, Debug)]
pub enum CartError {
    /// Writing the cart to its persistence slot failed.
    #[cfg(feature = "storage")]
    #[error("Failed to persist cart: {0}")]
    Persist(#[from] atelier_cache::StorageError),

    /// The cart could not be serialized.
    #[error("Failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),

    /// Store configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(feature = "storage")]
impl From<atelier_cache::CacheError> for CartError {
    fn from(e: atelier_cache::CacheError) -> Self {
        match e {
            atelier_cache::CacheError::Storage(e) => CartError::Persist(e),
            atelier_cache::CacheError::Decode(e) => CartError::Encode(e),
        }
    }
}
