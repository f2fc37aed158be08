//! Serde adapters for numeric fields.
//!
//! Documents written by other tools sometimes carry numbers as strings
//! (`"age": "34"`, `"price": "500"`). Readers accept either form; writers
//! always emit plain JSON numbers. Text that is not a number is an error.

use rust_decimal::Decimal;
use serde::de::Error;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Exact decimal for a float as its shortest round-tripping representation.
///
/// `12.345_f64` becomes `12.345`, not the binary expansion.
pub fn decimal_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    value
        .to_string()
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_f64_retain(value))
}

fn decimal_from_text(text: &str) -> Option<Decimal> {
    text.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(text).ok())
}

/// Reads an optional number-or-text, giving `None` for null or blank text.
fn read<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NumberOrText>, D::Error> {
    let raw = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(match raw {
        Some(NumberOrText::Text(text)) if text.trim().is_empty() => None,
        other => other,
    })
}

/// `Decimal` as a JSON number. Use with `#[serde(with = "decimal_number")]`.
///
/// Values are read exactly as written; no rounding is applied.
pub mod decimal_number {
    use rust_decimal::prelude::ToPrimitive;
    use rust_decimal::Decimal;
    use serde::de::Error;
    use serde::ser::Error as _;
    use serde::{Deserializer, Serializer};

    use super::{decimal_from_f64, decimal_from_text, read, NumberOrText};

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        let number = value
            .to_string()
            .parse::<f64>()
            .ok()
            .or_else(|| value.to_f64())
            .ok_or_else(|| S::Error::custom(format!("not representable as a number: {}", value)))?;
        serializer.serialize_f64(number)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        match read(deserializer)? {
            None => Ok(Decimal::ZERO),
            Some(NumberOrText::Number(raw)) => decimal_from_f64(raw)
                .ok_or_else(|| D::Error::custom(format!("number out of range: {}", raw))),
            Some(NumberOrText::Text(text)) => decimal_from_text(text.trim())
                .ok_or_else(|| D::Error::custom(format!("not a number: {:?}", text))),
        }
    }
}

/// Non-negative whole number (`u32`) that also reads from numeric text.
///
/// Use with `#[serde(deserialize_with = "whole_number")]`.
pub fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = match read(deserializer)? {
        None => return Ok(0),
        Some(NumberOrText::Number(raw)) => raw,
        Some(NumberOrText::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("not a number: {:?}", text)))?,
    };
    if value.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&value) {
        Ok(value as u32)
    } else {
        Err(D::Error::custom(format!("not a whole number: {}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    struct Row {
        #[serde(with = "decimal_number")]
        amount: Decimal,
        #[serde(deserialize_with = "whole_number")]
        count: u32,
    }

    #[test]
    fn test_numbers_read_exactly() {
        let row: Row = serde_json::from_str(r#"{"amount": 12.345, "count": 7}"#).unwrap();
        assert_eq!(row.amount, Decimal::new(12345, 3));
        assert_eq!(row.count, 7);
        assert_eq!(serde_json::to_value(&row).unwrap()["amount"], 12.345);
    }

    #[test]
    fn test_numeric_text_is_accepted() {
        let row: Row = serde_json::from_str(r#"{"amount": " 500 ", "count": "34"}"#).unwrap();
        assert_eq!(row.amount, Decimal::new(500, 0));
        assert_eq!(row.count, 34);

        let blank: Row = serde_json::from_str(r#"{"amount": "", "count": null}"#).unwrap();
        assert_eq!(blank.amount, Decimal::ZERO);
        assert_eq!(blank.count, 0);
    }

    #[test]
    fn test_non_numbers_are_rejected() {
        assert!(serde_json::from_str::<Row>(r#"{"count": "old"}"#).is_err());
        assert!(serde_json::from_str::<Row>(r#"{"count": -1}"#).is_err());
        assert!(serde_json::from_str::<Row>(r#"{"count": 2.5}"#).is_err());
        assert!(serde_json::from_str::<Row>(r#"{"amount": "lots"}"#).is_err());
        assert!(serde_json::from_str::<Row>(r#"{"amount": 1e40}"#).is_err());
    }
}
