//! String key/value persistence slots for Atelier.
//!
//! The storefront keeps its state in a per-origin key/value string store
//! supplied by the host (browser `localStorage`, a JSON file for the CLI,
//! or an in-memory map for tests). This crate provides:
//!
//! - [`KeyValueStore`] - the host store abstraction
//! - [`MemoryStore`], [`FileStore`], [`LocalStorage`] - backends
//! - [`Cache`] - typed JSON access on top of any backend
//!
//! # Example
//!
//! ```rust
//! use atelier_cache::{Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set("cart", &vec!["Casual T-Shirt"]).unwrap();
//!
//! let items: Option<Vec<String>> = cache.get("cart").unwrap();
//! assert_eq!(items.unwrap(), vec!["Casual T-Shirt".to_string()]);
//!
//! cache.delete("cart").unwrap();
//! assert!(!cache.exists("cart").unwrap());
//! ```

mod error;
mod kv;
mod store;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod browser;

pub use error::{CacheError, StorageError};
pub use kv::Cache;
pub use store::{KeyValueStore, MemoryStore};

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(target_arch = "wasm32")]
pub use browser::LocalStorage;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, KeyValueStore, MemoryStore, StorageError};
}
