//! Monetary amounts are kept as integer cents and exchanged as decimal
//! numbers on the wire.

use serde::{Deserialize, Deserializer, Serializer};

/// Largest amount a single transaction may carry: one billion, in cents.
/// Sums over tens of millions of such records still fit in an `i64`.
pub const MAX_AMOUNT_CENTS: i64 = 100_000_000_000;

/// Rounds to the nearest cent. `None` for non-finite values and values
/// outside the `i64` range.
pub fn from_decimal(amount: f64) -> Option<i64> {
    if !amount.is_finite() {
        return None;
    }
    let cents = (amount * 100.0).round();
    (cents.abs() < i64::MAX as f64).then_some(cents as i64)
}

pub fn to_decimal(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// An amount as sent by a client: either a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    /// The decimal value, or `None` if it is not a finite number.
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// `#[serde(with = "...")]` adapter for cent fields.
pub mod decimal {
    use super::*;
    use serde::de::Error as _;

    pub fn serialize<S: Serializer>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(to_decimal(*cents))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let value = f64::deserialize(deserializer)?;
        from_decimal(value).ok_or_else(|| D::Error::custom("amount out of range"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decimal_rounds_to_nearest_cent() {
        assert_eq!(from_decimal(12.345), Some(1235));
        assert_eq!(from_decimal(0.1 + 0.2), Some(30));
        assert_eq!(from_decimal(0.004), Some(0));
    }

    #[test]
    fn test_from_decimal_refuses_out_of_range_values() {
        assert_eq!(from_decimal(1e17), None);
        assert_eq!(from_decimal(-1e17), None);
        assert_eq!(from_decimal(f64::NAN), None);
        assert_eq!(from_decimal(1e9), Some(MAX_AMOUNT_CENTS));
    }

    #[test]
    fn test_decimal_deserialize_rejects_out_of_range() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(with = "decimal")]
            cents: i64,
        }

        let ok: Wrapper = serde_json::from_str(r#"{"cents": 12.5}"#).unwrap();
        assert_eq!(ok.cents, 1250);
        assert!(serde_json::from_str::<Wrapper>(r#"{"cents": 1e30}"#).is_err());
    }

    #[test]
    fn test_amount_input_accepts_numeric_strings() {
        let input: AmountInput = serde_json::from_str("\"42.50\"").unwrap();
        assert_eq!(input.value(), Some(42.5));
        let input: AmountInput = serde_json::from_str("15").unwrap();
        assert_eq!(input.value(), Some(15.0));
    }

    #[test]
    fn test_amount_input_rejects_non_numbers() {
        let input: AmountInput = serde_json::from_str("\"ten\"").unwrap();
        assert_eq!(input.value(), None);
        assert_eq!(AmountInput::Text("NaN".into()).value(), None);
        assert_eq!(AmountInput::Number(f64::INFINITY).value(), None);
    }
}
