//! Fixed-point currency amounts.
//!
//! All invoice arithmetic runs on [`Money`], a two-decimal wrapper around
//! [`rust_decimal::Decimal`]. On the wire (persisted document and
//! import/export files) amounts stay plain JSON numbers.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use super::number::decimal_number;
use super::number::decimal_from_f64;

/// Round to two decimal places, half away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// A currency amount.
///
/// Amounts computed here carry two decimal places. Amounts read from a
/// document keep whatever precision they were written with, so a load
/// followed by a save reproduces the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Build from a decimal, rounding to two places.
    pub fn new(value: Decimal) -> Self {
        Money(round2(value))
    }

    /// Build from minor units (paise, cents).
    pub fn from_minor(minor: i64) -> Self {
        Money(Decimal::new(minor, 2))
    }

    /// Build from a float, rounding to two places. `None` for NaN, infinite or
    /// out-of-range input.
    pub fn from_f64(value: f64) -> Option<Self> {
        decimal_from_f64(value).map(Money::new)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// `None` when the sum leaves the representable range.
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// `None` when the difference leaves the representable range.
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Total of `amounts`, or `None` on overflow.
    pub fn checked_sum<'a>(amounts: impl IntoIterator<Item = &'a Money>) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |total, amount| total.checked_add(*amount))
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Money::new(value)
    }
}

// Operators saturate at the range bounds. Billing uses the checked forms.

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        decimal_number::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        decimal_number::deserialize(deserializer).map(Money)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_half_away_from_zero() {
        assert_eq!(round2(Decimal::new(10005, 3)), Decimal::new(1001, 2));
        assert_eq!(round2(Decimal::new(10004, 3)), Decimal::new(1000, 2));
    }

    #[test]
    fn test_from_f64_rounds() {
        let money = Money::from_f64(0.1 + 0.2).unwrap();
        assert_eq!(money, Money::from_minor(30));
        assert!(Money::from_f64(f64::NAN).is_none());
    }

    #[test]
    fn test_display_two_places() {
        assert_eq!(Money::from_minor(50000).to_string(), "500.00");
        assert_eq!(Money::from_minor(5).to_string(), "0.05");
    }

    #[test]
    fn test_sum_has_no_drift() {
        let total: Money = std::iter::repeat(Money::from_minor(10)).take(1000).sum();
        assert_eq!(total, Money::from_minor(10000));
    }

    #[test]
    fn test_json_is_plain_number() {
        let json = serde_json::to_string(&Money::from_minor(12550)).unwrap();
        assert_eq!(json, "125.5");

        let back: Money = serde_json::from_str("125.5").unwrap();
        assert_eq!(back, Money::from_minor(12550));

        let integer: Money = serde_json::from_str("500").unwrap();
        assert_eq!(integer, Money::from_minor(50000));
    }

    #[test]
    fn test_read_amounts_keep_their_precision() {
        let money: Money = serde_json::from_str("10.005").unwrap();
        assert_eq!(money.amount(), Decimal::new(10005, 3));
        assert_eq!(serde_json::to_string(&money).unwrap(), "10.005");

        let text: Money = serde_json::from_str(r#""500""#).unwrap();
        assert_eq!(text, Money::from_minor(50000));
    }

    #[test]
    fn test_overflow_is_checked() {
        let big = Money::new(Decimal::MAX);
        assert_eq!(big.checked_add(Money::from_minor(100)), None);
        assert_eq!(Money::checked_sum(&[big, big]), None);
        assert_eq!(
            Money::checked_sum(&[Money::from_minor(150), Money::from_minor(250)]),
            Some(Money::from_minor(400))
        );
        // Operators saturate rather than panic.
        assert_eq!(big + big, big);
        assert!(Money::from_f64(1e40).is_none());
    }
}
