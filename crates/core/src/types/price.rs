//! Decimal price representation.
//!
//! The shop sells in a single currency, so a price is just a non-negative
//! decimal amount. Totals are computed with exact decimal arithmetic.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency suffix used when rendering prices.
pub const CURRENCY: &str = "PLN";

/// A price in the shop currency.
///
/// Serialized as a decimal string (e.g. `"20.00"`) so ledger files never lose
/// precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero price (free items, empty carts).
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from an amount in minor units (grosze).
    #[must_use]
    pub fn from_minor(minor: i64) -> Self {
        Self(Decimal::new(minor, 2))
    }

    /// Whether this is a free item.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {CURRENCY}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_two_places() {
        assert_eq!(Price::from_minor(2000).to_string(), "20.00 PLN");
        assert_eq!(Price::ZERO.to_string(), "0.00 PLN");
    }

    #[test]
    fn test_sum_of_empty_is_zero() {
        let total: Price = Vec::<Price>::new().into_iter().sum();
        assert_eq!(total, Price::ZERO);
    }

    #[test]
    fn test_sum_is_exact() {
        let prices = [Price::from_minor(10), Price::from_minor(20)];
        let total: Price = prices.iter().sum();
        assert_eq!(total, Price::from_minor(30));
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&Price::from_minor(26000)).unwrap();
        assert_eq!(json, "\"260.00\"");
    }
}
