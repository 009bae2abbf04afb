//! Lenient deserializers for request fields.
//!
//! Form front-ends send numbers as JSON numbers, as strings with currency
//! symbols and thousands separators, as empty strings or as null. None of
//! these should fail a request: anything that does not read as a finite
//! number becomes zero.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::calculation::{coerce_f64, round_to_unit};

fn parse_decimal(text: &str) -> Decimal {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '$' && *c != ',')
        .collect();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .unwrap_or_else(|_| cleaned.parse::<f64>().map(coerce_f64).unwrap_or(Decimal::ZERO))
}

/// Reads a decimal out of any JSON value; non-numeric values read as zero.
pub fn decimal_from_value(value: &Value) -> Decimal {
    match value {
        Value::Number(number) => parse_decimal(&number.to_string()),
        Value::String(text) => parse_decimal(text),
        _ => Decimal::ZERO,
    }
}

/// Reads a whole count out of any JSON value, rounding half up; negative and
/// non-numeric values read as zero.
pub fn count_from_value(value: &Value) -> u32 {
    let rounded = round_to_unit(decimal_from_value(value));
    if rounded <= Decimal::ZERO {
        return 0;
    }
    rounded.to_u32().unwrap_or(u32::MAX)
}

/// Deserializes a currency amount leniently.
pub fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(decimal_from_value).unwrap_or(Decimal::ZERO))
}

/// Deserializes a non-negative count leniently.
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(count_from_value).unwrap_or(0))
}

/// Deserializes a value, treating null as the type's default.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
