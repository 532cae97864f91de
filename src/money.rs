//! Fixed-point monetary type with 2 decimal places precision.
//!
//! Uses `rust_decimal` internally with scale enforcement so that balances,
//! summaries, and interest thresholds are computed without floating-point
//! errors.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// A signed monetary amount with exactly 2 decimal places.
///
/// Positive values are deposits, negative values are withdrawals. The type
/// wraps `rust_decimal::Decimal` and keeps a consistent scale across all
/// arithmetic.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use bankist_ledger::Money;
///
/// let amount = Money::from_str("10.5").unwrap();
/// assert_eq!(amount.to_string(), "10.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Money(Decimal);

impl Money {
    /// The number of decimal places to maintain.
    pub const SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Money(Decimal::ZERO);

    /// One unit of currency, the qualifying-interest threshold.
    pub const ONE: Self = Money(Decimal::ONE);

    /// Creates a new `Money` from a `Decimal`, normalizing to 2 decimal places.
    pub fn new(value: Decimal) -> Self {
        let mut normalized = value;
        normalized.rescale(Self::SCALE);
        Money(normalized)
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns the absolute value.
    pub fn abs(self) -> Self {
        Money(self.0.abs())
    }

    /// Returns `rate` percent of this amount (`self * rate / 100`).
    ///
    /// Used for per-deposit interest (`rate` is the account's interest rate)
    /// and for the 10%-of-loan qualification threshold.
    pub fn percent(self, rate: Decimal) -> Self {
        Money::new(self.0 * rate / Decimal::ONE_HUNDRED)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Money::new(Decimal::from(value))
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let decimal = Decimal::from_str(trimmed)?;
        Ok(Money::new(decimal))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Money::new(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
        self.0.rescale(Self::SCALE);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Money::new(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
        self.0.rescale(Self::SCALE);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:.2}", self.0))
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Money::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_normalizes_scale() {
        let m = Money::from_str("1.0").unwrap();
        assert_eq!(m.to_string(), "1.00");

        let m = Money::from_str("1.5").unwrap();
        assert_eq!(m.to_string(), "1.50");

        let m = Money::from_str("1.23").unwrap();
        assert_eq!(m.to_string(), "1.23");

        let m = Money::from_str("  2.5  ").unwrap();
        assert_eq!(m.to_string(), "2.50");
    }

    #[test]
    fn test_arithmetic_preserves_scale() {
        let a = Money::from_str("1.5").unwrap();
        let b = Money::from_str("2.5").unwrap();

        assert_eq!((a + b).to_string(), "4.00");
        assert_eq!((b - a).to_string(), "1.00");
    }

    #[test]
    fn test_negation_and_abs() {
        let m = Money::from(400);
        assert_eq!((-m).to_string(), "-400.00");
        assert_eq!((-m).abs(), m);
    }

    #[test]
    fn test_percent() {
        // 1.2% of 200 = 2.40
        let rate = Decimal::new(12, 1);
        assert_eq!(Money::from(200).percent(rate).to_string(), "2.40");

        // 1.2% of 70 = 0.84, below the qualifying threshold
        let interest = Money::from(70).percent(rate);
        assert_eq!(interest.to_string(), "0.84");
        assert!(interest < Money::ONE);

        // 10% of 1000 = 100
        assert_eq!(Money::from(1000).percent(Decimal::TEN), Money::from(100));
    }

    #[test]
    fn test_zero_constant() {
        assert!(Money::ZERO.is_zero());
    }

    #[test]
    fn test_ordering_of_signed_values() {
        let deposit = Money::from_str("1.0").unwrap();
        let withdrawal = Money::from_str("-1.0").unwrap();

        assert!(withdrawal < Money::ZERO);
        assert!(deposit > Money::ZERO);
        assert_eq!((deposit - withdrawal).to_string(), "2.00");
    }
}
