//! Monetary amounts that may be unavailable.
//!
//! A conversion that cannot be performed (no exchange rate inside the
//! fallback window, purchasing-power data exhausted) yields
//! [`Amount::Unavailable`]. It is kept distinct from zero all the way
//! through aggregation and serialization.

use std::iter::Sum;
use std::ops::Add;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A whole-unit monetary amount, or the explicit marker that no value could
/// be produced.
///
/// Addition is absorbing: once any operand is unavailable, the sum is too.
///
/// # Example
///
/// ```
/// use salary_normalizer::models::Amount;
///
/// let total: Amount = [Amount::Known(1000), Amount::Known(2000)].into_iter().sum();
/// assert_eq!(total, Amount::Known(3000));
///
/// let total = Amount::Known(1000) + Amount::Unavailable;
/// assert_eq!(total, Amount::Unavailable);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Amount {
    /// A computed amount in whole currency units.
    Known(i64),
    /// No value could be computed.
    Unavailable,
}

impl Amount {
    /// Rounds a decimal value to the nearest whole unit (ties to even).
    ///
    /// Values outside the `i64` range are reported as unavailable.
    pub fn from_decimal(value: Decimal) -> Self {
        value
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
            .to_i64()
            .map_or(Amount::Unavailable, Amount::Known)
    }

    /// Returns the amount if it is known.
    pub fn value(self) -> Option<i64> {
        match self {
            Amount::Known(value) => Some(value),
            Amount::Unavailable => None,
        }
    }

    /// Returns true if a value was computed.
    pub fn is_known(self) -> bool {
        matches!(self, Amount::Known(_))
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount::Known(value)
    }
}

impl From<Option<i64>> for Amount {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Amount::Unavailable, Amount::Known)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        match (self, rhs) {
            (Amount::Known(a), Amount::Known(b)) => a.checked_add(b).into(),
            _ => Amount::Unavailable,
        }
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::Known(0), Add::add)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<i64>::deserialize(deserializer).map(Amount::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_from_decimal_rounds_to_nearest() {
        assert_eq!(Amount::from_decimal(dec("10199.6")), Amount::Known(10200));
        assert_eq!(Amount::from_decimal(dec("10200.4")), Amount::Known(10200));
        assert_eq!(Amount::from_decimal(dec("-3.7")), Amount::Known(-4));
    }

    #[test]
    fn test_from_decimal_ties_go_to_even() {
        assert_eq!(Amount::from_decimal(dec("2.5")), Amount::Known(2));
        assert_eq!(Amount::from_decimal(dec("3.5")), Amount::Known(4));
    }

    #[test]
    fn test_zero_is_known_not_unavailable() {
        let zero = Amount::Known(0);
        assert!(zero.is_known());
        assert_eq!(zero.value(), Some(0));
        assert_ne!(zero, Amount::Unavailable);
    }

    #[test]
    fn test_unavailable_absorbs_addition() {
        assert_eq!(Amount::Unavailable + Amount::Known(5), Amount::Unavailable);
        assert_eq!(Amount::Known(5) + Amount::Unavailable, Amount::Unavailable);
    }

    #[test]
    fn test_overflowing_sum_is_unavailable() {
        assert_eq!(Amount::Known(i64::MAX) + Amount::Known(1), Amount::Unavailable);
    }

    #[test]
    fn test_sum_of_empty_iterator_is_zero() {
        let total: Amount = std::iter::empty().sum();
        assert_eq!(total, Amount::Known(0));
    }

    #[test]
    fn test_serialization_keeps_zero_and_null_apart() {
        assert_eq!(serde_json::to_string(&Amount::Known(0)).unwrap(), "0");
        assert_eq!(serde_json::to_string(&Amount::Unavailable).unwrap(), "null");

        let parsed: Vec<Amount> = serde_json::from_str("[0, null, 42]").unwrap();
        assert_eq!(
            parsed,
            vec![Amount::Known(0), Amount::Unavailable, Amount::Known(42)]
        );
    }
}
