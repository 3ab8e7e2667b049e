//! # Money Module
//!
//! Provides the `Money` type for prices and cart totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  A catalog price of 0.10 added to a cart three times:                   │
//! │    0.1 + 0.1 + 0.1 = 0.30000000000000004  ❌                            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    10 + 10 + 10 = 30 cents, always                                      │
//! │                                                                         │
//! │  cartTotal = Σ price × quantity is therefore exact.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let line = price.multiply_quantity(3);
//! assert_eq!(line.cents(), 3297);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// `Money` itself serializes as bare cents. Product prices on the wire are
/// in major units instead; see [`major_units`].
///
/// ## Where Money Flows
/// ```text
/// Product.price ──► CartLineItem.price ──► line_total() ──► Cart::total()
///                                                              │
///                                               "$25.00" ◄─────┘ (display)
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(500).cents(), 500);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a major-unit amount, rounded to the
    /// nearest cent (half away from zero).
    ///
    /// Non-finite input is zero; out-of-range input saturates.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_units(19.99).cents(), 1999);
    /// assert_eq!(Money::from_major_units(0.005).cents(), 1);
    /// ```
    pub fn from_major_units(amount: f64) -> Self {
        if !amount.is_finite() {
            return Money::zero();
        }
        // `as` saturates at the i64 bounds
        Money((amount * 100.0).round() as i64)
    }

    /// Reads a JSON price in major units.
    ///
    /// Integers are exact; fractions are rounded to the cent. Anything that
    /// is not a number is zero.
    pub fn from_json_price(value: &Value) -> Self {
        let Value::Number(number) = value else {
            return Money::zero();
        };

        match number.as_i64() {
            Some(whole) => Money(whole.saturating_mul(100)),
            None => Money::from_major_units(number.as_f64().unwrap_or(0.0)),
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a line quantity.
    ///
    /// Saturates at the `i64` bounds instead of overflowing.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-style rendering. Use the configured currency formatter for UI text.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

/// Summing line totals gives the cart total.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl From<i64> for Money {
    fn from(cents: i64) -> Self {
        Money(cents)
    }
}

// =============================================================================
// Wire Format for Prices
// =============================================================================

/// Serde adapter for product prices, which travel in major units.
///
/// ```text
/// wire        in memory      wire
/// 10     ──►  1000 cents ──► 10
/// 19.99  ──►  1999 cents ──► 19.99
/// "ten"  ──►  0 cents    ──► 0
/// ```
///
/// Use with `#[serde(with = "crate::money::major_units")]`.
pub mod major_units {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        if money.cents_part() == 0 {
            serializer.serialize_i64(money.dollars())
        } else {
            serializer.serialize_f64(money.cents() as f64 / 100.0)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Money::from_json_price(&value))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major_units_rounds_to_cent() {
        assert_eq!(Money::from_major_units(10.99).cents(), 1099);
        assert_eq!(Money::from_major_units(109.95).cents(), 10995);
        assert_eq!(Money::from_major_units(-5.5).cents(), -550);
        assert_eq!(Money::from_major_units(0.004).cents(), 0);
        assert!(Money::from_major_units(f64::NAN).is_zero());
        assert_eq!(Money::from_major_units(f64::MAX).cents(), i64::MAX);
    }

    #[test]
    fn test_from_json_price() {
        use serde_json::json;

        assert_eq!(Money::from_json_price(&json!(10)).cents(), 1000);
        assert_eq!(Money::from_json_price(&json!(19.99)).cents(), 1999);
        assert!(Money::from_json_price(&json!("ten")).is_zero());
        assert!(Money::from_json_price(&Value::Null).is_zero());
    }

    #[test]
    fn test_major_units_wire_format() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Priced {
            #[serde(with = "major_units")]
            price: Money,
        }

        let whole: Priced = serde_json::from_str(r#"{"price": 10}"#).unwrap();
        assert_eq!(whole.price.cents(), 1000);
        assert_eq!(serde_json::to_string(&whole).unwrap(), r#"{"price":10}"#);

        let fractional: Priced = serde_json::from_str(r#"{"price": 19.99}"#).unwrap();
        assert_eq!(fractional.price.cents(), 1999);
        assert_eq!(
            serde_json::to_string(&fractional).unwrap(),
            r#"{"price":19.99}"#
        );

        let bad: Priced = serde_json::from_str(r#"{"price": "ten"}"#).unwrap();
        assert!(bad.price.is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_sum_of_line_totals() {
        let lines = [
            Money::from_cents(10).multiply_quantity(3),
            Money::from_cents(1099).multiply_quantity(1),
        ];
        let total: Money = lines.into_iter().sum();
        assert_eq!(total.cents(), 1129);
    }

    #[test]
    fn test_empty_sum_is_zero() {
        let total: Money = std::iter::empty::<Money>().sum();
        assert!(total.is_zero());
    }

    #[test]
    fn test_multiply_saturates() {
        let huge = Money::from_cents(i64::MAX / 2);
        assert_eq!(huge.multiply_quantity(3).cents(), i64::MAX);
    }

    #[test]
    fn test_serializes_as_bare_integer() {
        let json = serde_json::to_string(&Money::from_cents(1099)).unwrap();
        assert_eq!(json, "1099");

        let back: Money = serde_json::from_str("250").unwrap();
        assert_eq!(back, Money::from_cents(250));
    }
}
