//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are unit prices in the store currency's standard unit (dollars,
//! not cents). Line and cart totals are derived from unit price times
//! quantity and are never stored, so they cannot drift.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A unit price.
///
/// Wraps a `Decimal` so money never goes through floating point. The cart
/// rejects negative prices at its boundary; `Price` itself stays a plain
/// wrapper so wire values can be deserialized before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an amount in cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// The total for `quantity` units at this price.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Decimal {
        self.0 * Decimal::from(quantity)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        assert_eq!(Price::from_cents(1050).to_string(), "$10.50");
    }

    #[test]
    fn test_times() {
        let price = Price::from_cents(1000);
        assert_eq!(price.times(3), Decimal::new(3000, 2));
    }

    #[test]
    fn test_is_negative() {
        assert!(Price::new(Decimal::NEGATIVE_ONE).is_negative());
        assert!(!Price::default().is_negative());
        assert!(!Price::from_cents(1).is_negative());
    }

    #[test]
    fn test_deserialize_from_number_or_string() {
        let a: Price = serde_json::from_str("10.5").unwrap();
        let b: Price = serde_json::from_str("\"10.5\"").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "$10.50");
    }
}
