//! Money and displayed price labels.
//!
//! Amounts are kept in the smallest unit of the currency (cents for USD)
//! so line totals never pick up floating-point drift. Prices arrive from
//! the page as display strings ("$20.00") and are stored verbatim as
//! [`PriceLabel`]; they are only parsed into [`Money`] when a total is needed.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
    INR,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::INR => "INR",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::JPY => "\u{00a5}",
            Currency::INR => "\u{20b9}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Look up a currency by its display symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "$" => Some(Currency::USD),
            "\u{20ac}" => Some(Currency::EUR),
            "\u{00a3}" => Some(Currency::GBP),
            "\u{00a5}" => Some(Currency::JPY),
            "\u{20b9}" => Some(Currency::INR),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Try to add another Money value.
    ///
    /// Returns `None` if currencies don't match or the sum overflows.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let amount = self.amount_minor.checked_add(other.amount_minor)?;
        Some(Money::new(amount, self.currency))
    }

    /// Try to multiply by a quantity, returning `None` on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        let amount = self.amount_minor.checked_mul(factor)?;
        Some(Money::new(amount, self.currency))
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        let places = self.currency.decimal_places();
        let sign = if self.amount_minor < 0 { "-" } else { "" };
        let abs = self.amount_minor.unsigned_abs();

        if places == 0 {
            return format!("{}{}{}", sign, self.currency.symbol(), abs);
        }

        let divisor = 10_u64.pow(places);
        format!(
            "{}{}{}.{:0width$}",
            sign,
            self.currency.symbol(),
            abs / divisor,
            abs % divisor,
            width = places as usize
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// The first currency symbol in a label and the decimal numeral directly
/// after it, e.g. "$1,299.99". The numeral group is absent when the first
/// symbol is not followed by one.
static PRICE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^$\x{20ac}\x{00a3}\x{00a5}\x{20b9}]*(?P<symbol>[$\x{20ac}\x{00a3}\x{00a5}\x{20b9}])\s*(?:(?P<whole>[0-9]{1,3}(?:,[0-9]{3})+|[0-9]+)(?:\.(?P<frac>[0-9]+))?)?")
        .expect("price pattern is valid")
});

/// A price exactly as displayed on the product page.
///
/// Stored and redisplayed verbatim; never normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceLabel(String);

impl PriceLabel {
    /// Wrap a display string.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Get the label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the decimal numeral following the first currency symbol.
    ///
    /// Only the first symbol counts: a label whose first symbol has no
    /// numeral after it does not parse, even if a later symbol does.
    /// Extra fraction digits beyond the currency's precision are rounded
    /// half-up. Returns `None` when no symbol-prefixed numeral is present
    /// or the amount does not fit in an `i64` of minor units.
    ///
    /// ```
    /// use atelier_commerce::money::{Currency, Money, PriceLabel};
    /// let price = PriceLabel::new("Now $1,299.99!").parse();
    /// assert_eq!(price, Some(Money::new(129_999, Currency::USD)));
    /// ```
    pub fn parse(&self) -> Option<Money> {
        let caps = PRICE_PATTERN.captures(&self.0)?;
        let currency = Currency::from_symbol(caps.name("symbol")?.as_str())?;
        let places = currency.decimal_places() as usize;

        let mut amount: i64 = 0;
        for digit in caps.name("whole")?.as_str().bytes().filter(u8::is_ascii_digit) {
            amount = amount.checked_mul(10)?.checked_add(i64::from(digit - b'0'))?;
        }

        let frac = caps.name("frac").map(|m| m.as_str()).unwrap_or("");
        let mut frac_digits = frac.bytes();
        for _ in 0..places {
            let digit = frac_digits.next().map(|d| d - b'0').unwrap_or(0);
            amount = amount.checked_mul(10)?.checked_add(i64::from(digit))?;
        }
        if frac_digits.next().is_some_and(|d| d >= b'5') {
            amount = amount.checked_add(1)?;
        }

        Some(Money::new(amount, currency))
    }
}

impl fmt::Display for PriceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PriceLabel {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PriceLabel {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(label: &str) -> Option<Money> {
        PriceLabel::new(label).parse()
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
        assert_eq!(Money::new(5, Currency::USD).display(), "$0.05");
        assert_eq!(Money::new(100, Currency::JPY).display(), "\u{00a5}100");
        assert_eq!(Money::new(-250, Currency::GBP).display(), "-\u{00a3}2.50");
    }

    #[test]
    fn test_money_try_add_currency_mismatch() {
        let usd = Money::new(1000, Currency::USD);
        let eur = Money::new(1000, Currency::EUR);
        assert_eq!(usd.try_add(&eur), None);
        assert_eq!(usd.try_add(&usd), Some(Money::new(2000, Currency::USD)));
    }

    #[test]
    fn test_money_overflow() {
        let big = Money::new(i64::MAX, Currency::USD);
        assert_eq!(big.try_multiply(2), None);
        assert_eq!(big.try_add(&Money::new(1, Currency::USD)), None);
    }

    #[test]
    fn test_parse_simple_labels() {
        assert_eq!(parse("$20.00"), Some(Money::new(2000, Currency::USD)));
        assert_eq!(parse("$15.5"), Some(Money::new(1550, Currency::USD)));
        assert_eq!(parse("$45"), Some(Money::new(4500, Currency::USD)));
        assert_eq!(parse("\u{20ac} 19.90"), Some(Money::new(1990, Currency::EUR)));
        assert_eq!(parse("\u{00a5}1200"), Some(Money::new(1200, Currency::JPY)));
    }

    #[test]
    fn test_parse_uses_first_symbol_only() {
        assert_eq!(
            parse("Was $30.00, now $20.00"),
            Some(Money::new(3000, Currency::USD))
        );
        assert_eq!(parse("Sale: $ 9.99"), Some(Money::new(999, Currency::USD)));
        assert_eq!(parse("$ sale, now $20"), None);
        assert_eq!(parse("\u{00a3} or $5"), None);
    }

    #[test]
    fn test_parse_thousands_separator() {
        assert_eq!(parse("$1,299.99"), Some(Money::new(129_999, Currency::USD)));
        // Not a thousands group: stop at the comma
        assert_eq!(parse("$12,34"), Some(Money::new(1200, Currency::USD)));
    }

    #[test]
    fn test_parse_rounds_extra_precision() {
        assert_eq!(parse("$1.005"), Some(Money::new(101, Currency::USD)));
        assert_eq!(parse("$1.004"), Some(Money::new(100, Currency::USD)));
        assert_eq!(parse("\u{00a5}99.5"), Some(Money::new(100, Currency::JPY)));
    }

    #[test]
    fn test_parse_failures() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("20.00"), None);
        assert_eq!(parse("$"), None);
        assert_eq!(parse("Free"), None);
        assert_eq!(parse("$99999999999999999999"), None);
    }

    #[test]
    fn test_label_is_verbatim() {
        let label = PriceLabel::from("  $20.00 ");
        assert_eq!(label.as_str(), "  $20.00 ");
        assert_eq!(serde_json::to_string(&label).unwrap(), r#""  $20.00 ""#);
    }
}
