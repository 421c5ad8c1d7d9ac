//! Decimal-as-string monetary amount.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A positive monetary amount, carried as a decimal string on the wire.
///
/// The remote service accepts `"50"` or `"49.99"` and echoes amounts back
/// normalized to two decimal places; `Amount` applies the same
/// normalization when serializing, so a round-tripped amount compares
/// equal to the original input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount(Decimal);

/// Errors raised when parsing an amount string.
#[derive(Debug, thiserror::Error)]
pub enum AmountError {
    #[error("amount is not a decimal number: {0:?}")]
    NotNumeric(String),

    #[error("amount must be greater than zero")]
    NotPositive,
}

impl Amount {
    /// Parses and validates an amount string.
    pub fn new(value: &str) -> Result<Self, AmountError> {
        let decimal = Decimal::from_str(value.trim())
            .map_err(|_| AmountError::NotNumeric(value.to_string()))?;
        if decimal <= Decimal::ZERO {
            return Err(AmountError::NotPositive);
        }
        Ok(Self(decimal))
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amount::new(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Monetary rounding: midpoints go away from zero, not to even.
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "{rounded:.2}")
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_number_normalizes_to_two_decimals() {
        let amount: Amount = "50".parse().unwrap();
        assert_eq!(amount.to_string(), "50.00");
    }

    #[test]
    fn test_fractional_amount_keeps_cents() {
        let amount: Amount = "49.99".parse().unwrap();
        assert_eq!(amount.to_string(), "49.99");
    }

    #[test]
    fn test_extra_precision_is_rounded() {
        let amount: Amount = "10.004".parse().unwrap();
        assert_eq!(amount.to_string(), "10.00");
    }

    #[test]
    fn test_midpoints_round_away_from_zero() {
        let amount: Amount = "10.005".parse().unwrap();
        assert_eq!(amount.to_string(), "10.01");

        // Nearest-even would give "0.12" here.
        let amount: Amount = "0.125".parse().unwrap();
        assert_eq!(amount.to_string(), "0.13");
    }

    #[test]
    fn test_zero_is_rejected() {
        assert!(matches!(Amount::new("0"), Err(AmountError::NotPositive)));
    }

    #[test]
    fn test_negative_is_rejected() {
        assert!(matches!(Amount::new("-5"), Err(AmountError::NotPositive)));
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(
            Amount::new("fifty"),
            Err(AmountError::NotNumeric(_))
        ));
    }

    #[test]
    fn test_serializes_as_string() {
        let amount: Amount = "50".parse().unwrap();
        let json = serde_json::to_value(amount).unwrap();
        assert_eq!(json, serde_json::json!("50.00"));
    }

    #[test]
    fn test_round_trips_through_json() {
        let amount: Amount = "50".parse().unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(amount, back);
    }
}
