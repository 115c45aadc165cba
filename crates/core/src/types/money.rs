//! Money amounts using decimal arithmetic.
//!
//! All prices are USD. Amounts use [`rust_decimal::Decimal`] so that
//! `unit_price * quantity` is exact; floats never touch order totals.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A USD money amount.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Create a money amount from a decimal value.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a money amount from whole dollars.
    #[must_use]
    pub fn from_dollars(dollars: i64) -> Self {
        Self(Decimal::from(dollars))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Zero dollars.
    #[must_use]
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl std::ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), std::ops::Add::add)
    }
}

/// Compute the total for a line of `quantity` jerseys at `unit_price` each.
#[must_use]
pub fn line_total(unit_price: Money, quantity: u32) -> Money {
    Money(unit_price.0 * Decimal::from(quantity))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let unit = Money::from_dollars(25);
        assert_eq!(line_total(unit, 1), Money::from_dollars(25));
        assert_eq!(line_total(unit, 4), Money::from_dollars(100));
    }

    #[test]
    fn test_line_total_fractional_unit_price() {
        let unit = Money::new(Decimal::new(2499, 2)); // $24.99
        assert_eq!(line_total(unit, 3).amount(), Decimal::new(7497, 2));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_dollars(25).to_string(), "$25.00");
        assert_eq!(Money::new(Decimal::new(7497, 2)).to_string(), "$74.97");
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_dollars(10), Money::from_dollars(15)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_dollars(25));
    }

    #[test]
    fn test_serde_as_string() {
        // serde-with-str keeps decimals exact on the wire
        let json = serde_json::to_string(&Money::from_dollars(25)).unwrap();
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Money::from_dollars(25));
    }
}
