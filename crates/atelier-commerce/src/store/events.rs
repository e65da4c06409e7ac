//! Change notifications for cart displays (badge counters and the like).

use std::fmt;

use crate::cart::ItemIdentity;

/// Handle returned by [`CartStore::subscribe`](super::CartStore::subscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// What changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// One unit of an item was added.
    ItemAdded {
        identity: ItemIdentity,
        /// Quantity of the entry after the add.
        quantity: u32,
        /// Whether an existing entry was incremented.
        merged: bool,
    },
    /// The cart was emptied.
    Cleared,
}

/// Emitted after every mutation, once the cart has been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEvent {
    pub change: CartChange,
    /// Total quantity across all items after the change.
    pub total_quantity: u64,
}

type Listener = Box<dyn Fn(&CartEvent)>;

#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() < len_before
    }

    /// Call every listener in subscription order.
    pub(crate) fn notify(&self, event: &CartEvent) {
        for (_, listener) in &self.entries {
            listener(event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
