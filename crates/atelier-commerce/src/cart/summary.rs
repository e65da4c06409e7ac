//! Checkout summary built from displayed price labels.

use std::fmt;

use crate::cart::{Cart, ItemIdentity};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pricing breakdown for a non-empty cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartSummary {
    /// Currency the totals are expressed in.
    pub currency: Currency,
    /// Per-line breakdown, in cart order.
    pub lines: Vec<SummaryLine>,
    /// Sum of all priced line totals.
    pub grand_total: Money,
}

impl CartSummary {
    /// Summarize a cart in `currency`. Returns `None` for an empty cart.
    ///
    /// Pricing is best-effort: a line whose label does not parse, or whose
    /// total overflows, is left unpriced and contributes zero to the grand
    /// total. Labels are never converted between currencies, so a label that
    /// parses in a currency other than `currency` is also left unpriced and
    /// renders as `n/a`.
    pub fn build(cart: &Cart, currency: Currency) -> Option<Self> {
        if cart.is_empty() {
            return None;
        }

        let mut grand_total = Money::zero(currency);
        let mut lines = Vec::with_capacity(cart.unique_item_count());

        for item in cart {
            let unit_price = item.price.parse().filter(|m| m.currency == currency);
            let priced = unit_price
                .and_then(|unit| unit.try_multiply(i64::from(item.quantity)))
                .and_then(|total| grand_total.try_add(&total).map(|sum| (total, sum)));
            let line_total = match priced {
                Some((total, sum)) => {
                    grand_total = sum;
                    Some(total)
                }
                None => None,
            };

            if line_total.is_none() {
                debug!(item = %item.identity(), price = %item.price, "line left unpriced");
            }

            lines.push(SummaryLine {
                identity: item.identity(),
                quantity: item.quantity,
                unit_price,
                line_total,
            });
        }

        Some(Self {
            currency,
            lines,
            grand_total,
        })
    }

    /// Number of lines that contributed zero because they could not be priced.
    pub fn unpriced_lines(&self) -> usize {
        self.lines.iter().filter(|l| l.line_total.is_none()).count()
    }

    /// Render as multi-line text, one line per item followed by the total.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CartSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        write!(f, "Total: {}", self.grand_total)
    }
}

/// Pricing breakdown for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryLine {
    /// Which entry this line describes.
    pub identity: ItemIdentity,
    /// Quantity.
    pub quantity: u32,
    /// Parsed unit price, if the label could be read.
    pub unit_price: Option<Money>,
    /// unit_price * quantity, if it could be priced.
    pub line_total: Option<Money>,
}

impl fmt::Display for SummaryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{} - ", self.identity, self.quantity)?;
        match &self.line_total {
            Some(total) => write!(f, "{}", total),
            None => write!(f, "n/a"),
        }
    }
}

/// The text form of the checkout summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryText {
    /// The cart has no items; the UI shows its own message instead.
    Empty,
    /// Rendered summary.
    Summary(String),
}

impl SummaryText {
    /// Check if this is the empty-cart indicator.
    pub fn is_empty(&self) -> bool {
        matches!(self, SummaryText::Empty)
    }

    /// Get the rendered text, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SummaryText::Empty => None,
            SummaryText::Summary(text) => Some(text),
        }
    }
}

impl From<Option<CartSummary>> for SummaryText {
    fn from(summary: Option<CartSummary>) -> Self {
        match summary {
            Some(summary) => SummaryText::Summary(summary.render()),
            None => SummaryText::Empty,
        }
    }
}
