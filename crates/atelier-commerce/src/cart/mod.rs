//! Shopping cart module.
//!
//! Contains types for the cart, its line items, and the checkout summary.

mod cart;
mod summary;

pub use cart::{AddOutcome, Cart, ItemIdentity, LineItem};
pub use summary::{CartSummary, SummaryLine, SummaryText};
