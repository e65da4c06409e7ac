//! Cart and line item types.

use crate::money::PriceLabel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What distinguishes one cart entry from another for merge purposes.
///
/// An item added without a variant never merges with one added with a
/// variant, even under the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemIdentity {
    /// Product display name.
    pub name: String,
    /// Variant selection (e.g., a size code).
    pub variant: Option<String>,
}

impl ItemIdentity {
    /// Create an identity.
    pub fn new(name: impl Into<String>, variant: Option<&str>) -> Self {
        Self {
            name: name.into(),
            variant: variant.map(str::to_string),
        }
    }
}

impl fmt::Display for ItemIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.variant {
            Some(variant) => write!(f, "{} ({})", self.name, variant),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A line item in the cart.
///
/// Serializes to the persisted slot format:
/// `{ "name", "price", "image", "size"?, "quantity" }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    /// Product name.
    pub name: String,
    /// Unit price as displayed on the page.
    pub price: PriceLabel,
    /// Product image reference, display only.
    pub image: String,
    /// Variant selection, absent when added without one.
    #[serde(rename = "size", default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    /// Quantity, at least 1 in any reachable state.
    pub quantity: u32,
}

impl LineItem {
    /// Create a new line item with quantity 1.
    pub fn new(
        name: impl Into<String>,
        price: impl Into<PriceLabel>,
        image: impl Into<String>,
        variant: Option<&str>,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            image: image.into(),
            variant: variant.map(str::to_string),
            quantity: 1,
        }
    }

    /// Identity of this item.
    pub fn identity(&self) -> ItemIdentity {
        ItemIdentity {
            name: self.name.clone(),
            variant: self.variant.clone(),
        }
    }

    /// Check whether this item has the given identity without allocating.
    pub fn matches(&self, name: &str, variant: Option<&str>) -> bool {
        self.name == name && self.variant.as_deref() == variant
    }
}

/// Result of adding an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    /// Identity the add resolved to.
    pub identity: ItemIdentity,
    /// Quantity of that entry after the add.
    pub quantity: u32,
    /// Whether an existing entry was incremented rather than appended.
    pub merged: bool,
}

/// A shopping cart: line items in insertion order, one per identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from decoded items, repairing them with [`Cart::normalize`].
    pub fn from_items(items: Vec<LineItem>) -> (Self, usize) {
        let mut cart = Self { items };
        let repaired = cart.normalize();
        (cart, repaired)
    }

    /// Add one unit of an item.
    ///
    /// If an entry with the same `(name, variant)` exists its quantity is
    /// incremented (saturating at `u32::MAX`); otherwise a new entry with
    /// quantity 1 is appended. The stored price and image of an existing
    /// entry are kept as first added.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        price: impl Into<PriceLabel>,
        image: impl Into<String>,
        variant: Option<&str>,
    ) -> AddOutcome {
        let name = name.into();

        if let Some(existing) = self.items.iter_mut().find(|i| i.matches(&name, variant)) {
            existing.quantity = existing.quantity.saturating_add(1);
            return AddOutcome {
                identity: existing.identity(),
                quantity: existing.quantity,
                merged: true,
            };
        }

        let item = LineItem::new(name, price, image, variant);
        let outcome = AddOutcome {
            identity: item.identity(),
            quantity: item.quantity,
            merged: false,
        };
        self.items.push(item);
        outcome
    }

    /// Get total item count (sum of quantities).
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Get number of distinct entries.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get an item by identity.
    pub fn get(&self, identity: &ItemIdentity) -> Option<&LineItem> {
        self.items
            .iter()
            .find(|i| i.matches(&identity.name, identity.variant.as_deref()))
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Restore the one-entry-per-identity and quantity >= 1 invariants on
    /// content that came from outside (e.g. a hand-edited storage slot).
    ///
    /// Zero-quantity entries are dropped. Duplicate identities are merged
    /// into the first occurrence by summing quantities. Returns how many
    /// entries were removed.
    pub fn normalize(&mut self) -> usize {
        let before = self.items.len();
        let mut kept: Vec<LineItem> = Vec::with_capacity(before);

        for item in self.items.drain(..) {
            if item.quantity == 0 {
                continue;
            }
            match kept
                .iter_mut()
                .find(|k| k.matches(&item.name, item.variant.as_deref()))
            {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                }
                None => kept.push(item),
            }
        }

        self.items = kept;
        before - self.items.len()
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
