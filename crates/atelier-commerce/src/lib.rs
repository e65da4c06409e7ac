//! Cart domain types and logic for Atelier.
//!
//! This crate provides the storefront's shopping cart:
//!
//! - **Cart**: line items keyed by `(name, variant)`, quantities, merging
//! - **Money**: price labels and integer minor-unit amounts
//! - **Summary**: checkout summary text with per-line and grand totals
//! - **Store**: the [`CartStore`] that persists the cart to a key/value slot
//!   and notifies subscribers after every change (`storage` feature)
//!
//! # Example
//!
//! ```rust
//! use atelier_cache::MemoryStore;
//! use atelier_commerce::prelude::*;
//!
//! let mut store = CartStore::open(MemoryStore::new(), StoreConfig::default()).unwrap();
//!
//! store.add_item_with_variant("Casual T-Shirt", "$20.00", "tee.jpg", Some("M")).unwrap();
//! store.add_item("Hat", "$15.50", "hat.jpg").unwrap();
//! store.add_item("Hat", "$15.50", "hat.jpg").unwrap();
//!
//! assert_eq!(store.total_quantity(), 3);
//! assert_eq!(
//!     store.summary_text().as_text(),
//!     Some("Casual T-Shirt (M) x1 - $20.00\nHat x2 - $31.00\nTotal: $51.00")
//! );
//! ```

pub mod cart;
pub mod config;
pub mod error;
pub mod money;

#[cfg(feature = "storage")]
pub mod store;

pub use cart::{AddOutcome, Cart, CartSummary, ItemIdentity, LineItem, SummaryLine, SummaryText};
pub use config::{StoreConfig, WriteFailurePolicy, DEFAULT_STORAGE_KEY};
pub use error::CartError;
pub use money::{Currency, Money, PriceLabel};

#[cfg(feature = "storage")]
pub use store::{CartChange, CartEvent, CartStore, SubscriptionId};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CartError;
    pub use crate::money::{Currency, Money, PriceLabel};

    // Cart
    pub use crate::cart::{
        AddOutcome, Cart, CartSummary, ItemIdentity, LineItem, SummaryLine, SummaryText,
    };

    // Store
    pub use crate::config::{StoreConfig, WriteFailurePolicy};
    #[cfg(feature = "storage")]
    pub use crate::store::{CartChange, CartEvent, CartStore, SubscriptionId};
}
