//! The persisted cart store.
//!
//! [`CartStore`] owns the authoritative in-memory [`Cart`] and keeps the
//! persistence slot in sync after every mutation. Every operation runs to
//! completion before returning: mutate, persist, then notify subscribers.

mod events;

use atelier_cache::{Cache, CacheError, KeyValueStore};
use tracing::{debug, warn};

use crate::cart::{Cart, CartSummary, LineItem, SummaryText};
use crate::config::{StoreConfig, WriteFailurePolicy};
use crate::error::CartError;
use crate::money::PriceLabel;

pub use events::{CartChange, CartEvent, SubscriptionId};
use events::Listeners;

/// Cart state bound to a persistence slot.
///
/// # Example
///
/// ```rust
/// use atelier_cache::MemoryStore;
/// use atelier_commerce::{CartStore, StoreConfig};
///
/// let mut store = CartStore::new(MemoryStore::new(), StoreConfig::default()).unwrap();
/// store.restore();
///
/// store.add_item("Casual T-Shirt", "$20.00", "img.jpg").unwrap();
/// let total = store.add_item("Casual T-Shirt", "$20.00", "img.jpg").unwrap();
/// assert_eq!(total, 2);
/// ```
#[derive(Debug)]
pub struct CartStore<S> {
    cache: Cache<S>,
    config: StoreConfig,
    cart: Cart,
    listeners: Listeners,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Bind a store to a persistence backend. The cart starts empty; call
    /// [`restore`](Self::restore) to load the persisted copy.
    pub fn new(store: S, config: StoreConfig) -> Result<Self, CartError> {
        config.validate()?;
        Ok(Self {
            cache: Cache::new(store),
            config,
            cart: Cart::new(),
            listeners: Listeners::default(),
        })
    }

    /// Create a store and immediately restore the persisted cart.
    pub fn open(store: S, config: StoreConfig) -> Result<Self, CartError> {
        let mut cart_store = Self::new(store, config)?;
        cart_store.restore();
        Ok(cart_store)
    }

    /// Load the cart from the persistence slot.
    ///
    /// A missing, blank, undecodable, or unreadable slot leaves an empty cart; this is
    /// logged and never reported as an error. Decoded content is repaired
    /// so that each identity appears once with a positive quantity.
    pub fn restore(&mut self) -> &Cart {
        let key = self.config.storage_key.as_str();

        self.cart = match self.cache.get::<Vec<LineItem>>(key) {
            Ok(Some(items)) => {
                let (cart, repaired) = Cart::from_items(items);
                if repaired > 0 {
                    warn!(key, repaired, "repaired invalid entries in persisted cart");
                }
                debug!(key, items = cart.unique_item_count(), "cart restored");
                cart
            }
            Ok(None) => {
                debug!(key, "no persisted cart");
                Cart::new()
            }
            Err(CacheError::Decode(e)) => {
                warn!(key, error = %e, "discarding unreadable persisted cart");
                Cart::new()
            }
            Err(CacheError::Storage(e)) => {
                warn!(key, error = %e, "cart storage unavailable, starting empty");
                Cart::new()
            }
        };

        &self.cart
    }

    /// Add one unit of an item without a variant.
    ///
    /// Returns the new total quantity.
    pub fn add_item(
        &mut self,
        name: impl Into<String>,
        price: impl Into<PriceLabel>,
        image: impl Into<String>,
    ) -> Result<u64, CartError> {
        self.add_item_with_variant(name, price, image, None)
    }

    /// Add one unit of an item, optionally with a variant (e.g. a size).
    ///
    /// Merges into the existing entry for the same `(name, variant)` or
    /// appends a new one, persists the cart, and notifies subscribers.
    /// Returns the new total quantity.
    pub fn add_item_with_variant(
        &mut self,
        name: impl Into<String>,
        price: impl Into<PriceLabel>,
        image: impl Into<String>,
        variant: Option<&str>,
    ) -> Result<u64, CartError> {
        let outcome = self.cart.add(name, price, image, variant);
        let total_quantity = self.cart.total_quantity();
        debug!(
            item = %outcome.identity,
            quantity = outcome.quantity,
            merged = outcome.merged,
            total_quantity,
            "item added"
        );

        let persisted = self.persist();
        self.listeners.notify(&CartEvent {
            change: CartChange::ItemAdded {
                identity: outcome.identity,
                quantity: outcome.quantity,
                merged: outcome.merged,
            },
            total_quantity,
        });

        persisted.map(|()| total_quantity)
    }

    /// Sum of quantities across all items.
    pub fn total_quantity(&self) -> u64 {
        self.cart.total_quantity()
    }

    /// Empty the cart, persist, and notify subscribers.
    ///
    /// Clearing an empty cart still writes the (empty) slot.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.cart.clear();
        debug!("cart cleared");

        let persisted = self.persist();
        self.listeners.notify(&CartEvent {
            change: CartChange::Cleared,
            total_quantity: 0,
        });
        persisted
    }

    /// Structured checkout summary, or `None` for an empty cart.
    pub fn summary(&self) -> Option<CartSummary> {
        CartSummary::build(&self.cart, self.config.currency)
    }

    /// Human-readable checkout summary, or [`SummaryText::Empty`].
    pub fn summary_text(&self) -> SummaryText {
        self.summary().into()
    }

    /// Current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Register a listener called after every mutation.
    pub fn subscribe(&mut self, listener: impl Fn(&CartEvent) + 'static) -> SubscriptionId {
        self.listeners.add(Box::new(listener))
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }

    /// Number of registered listeners.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    /// Write the full cart to the slot, applying the write-failure policy.
    fn persist(&self) -> Result<(), CartError> {
        let key = self.config.storage_key.as_str();

        match self.cache.set(key, &self.cart) {
            Ok(()) => {
                debug!(key, items = self.cart.unique_item_count(), "cart persisted");
                Ok(())
            }
            Err(e) => self.on_write_failure(e),
        }
    }

    fn on_write_failure(&self, error: CacheError) -> Result<(), CartError> {
        let key = self.config.storage_key.as_str();
        match self.config.on_write_failure {
            WriteFailurePolicy::Swallow => {
                warn!(key, error = %error, "failed to persist cart, keeping in-memory state");
                Ok(())
            }
            WriteFailurePolicy::Surface => Err(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_cache::MemoryStore;

    fn store_with(raw: Option<&str>) -> CartStore<MemoryStore> {
        let backend = MemoryStore::new();
        if let Some(raw) = raw {
            backend.set("cart", raw).unwrap();
        }
        CartStore::open(backend, StoreConfig::default()).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = StoreConfig {
            storage_key: String::new(),
            ..StoreConfig::default()
        };
        assert!(CartStore::new(MemoryStore::new(), config).is_err());
    }

    #[test]
    fn test_restore_absent_and_blank() {
        assert!(store_with(None).cart().is_empty());
        assert!(store_with(Some("")).cart().is_empty());
        assert!(store_with(Some("   ")).cart().is_empty());
    }

    #[test]
    fn test_restore_does_not_write() {
        let backend = MemoryStore::new();
        let _store = CartStore::open(backend.clone(), StoreConfig::default()).unwrap();
        assert!(backend.is_empty());
    }

    #[test]
    fn test_restore_repairs_duplicates() {
        let store = store_with(Some(
            r#"[{"name":"Hat","price":"$1","image":"h.jpg","quantity":1},
                {"name":"Hat","price":"$1","image":"h.jpg","quantity":2},
                {"name":"Cap","price":"$1","image":"c.jpg","quantity":0}]"#,
        ));
        assert_eq!(store.cart().unique_item_count(), 1);
        assert_eq!(store.total_quantity(), 3);
    }

    #[test]
    fn test_restore_rejects_negative_quantity() {
        let store = store_with(Some(
            r#"[{"name":"Hat","price":"$1","image":"h.jpg","quantity":-1}]"#,
        ));
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_add_persists_under_configured_key() {
        let backend = MemoryStore::new();
        let config = StoreConfig {
            storage_key: "atelier:cart".to_string(),
            ..StoreConfig::default()
        };
        let mut store = CartStore::new(backend.clone(), config).unwrap();
        store.add_item("Hat", "$15.50", "hat.jpg").unwrap();

        assert_eq!(backend.get("cart").unwrap(), None);
        assert_eq!(
            backend.get("atelier:cart").unwrap().as_deref(),
            Some(r#"[{"name":"Hat","price":"$15.50","image":"hat.jpg","quantity":1}]"#)
        );
    }

    #[test]
    fn test_summary_uses_configured_currency() {
        let config = StoreConfig {
            currency: crate::money::Currency::EUR,
            ..StoreConfig::default()
        };
        let mut store = CartStore::new(MemoryStore::new(), config).unwrap();
        store.add_item("Scarf", "\u{20ac}12.00", "s.jpg").unwrap();
        store.add_item("Scarf", "\u{20ac}12.00", "s.jpg").unwrap();

        assert_eq!(
            store.summary_text().as_text(),
            Some("Scarf x2 - \u{20ac}24.00\nTotal: \u{20ac}24.00")
        );
    }
}
