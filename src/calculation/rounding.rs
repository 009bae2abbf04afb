//! Rounding primitives used by every worksheet line.
//!
//! Worksheet lines round half up: x.50 goes to the next unit, never to the
//! nearest even one. Both functions saturate rather than panic on values
//! near the limits of `Decimal`.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

fn half() -> Decimal {
    Decimal::new(5, 1)
}

/// Rounds to a whole currency unit, half up.
///
/// # Examples
///
/// ```
/// use guideline_engine::calculation::round_to_unit;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_to_unit(Decimal::from_str("2.49").unwrap()), Decimal::from(2));
/// assert_eq!(round_to_unit(Decimal::from_str("2.50").unwrap()), Decimal::from(3));
/// assert_eq!(round_to_unit(Decimal::from_str("-2.50").unwrap()), Decimal::from(-2));
/// ```
pub fn round_to_unit(value: Decimal) -> Decimal {
    value
        .checked_add(half())
        .map(|shifted| shifted.floor())
        .unwrap_or_else(|| value.floor())
}

/// Rounds to cents, half up, always carrying two decimal places.
///
/// Used for monthly figures derived from annual ones.
///
/// # Examples
///
/// ```
/// use guideline_engine::calculation::round_to_cents;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let monthly = round_to_cents(Decimal::from(10000) / Decimal::from(12));
/// assert_eq!(monthly.to_string(), "833.33");
/// assert_eq!(round_to_cents(Decimal::from_str("0.125").unwrap()).to_string(), "0.13");
/// ```
pub fn round_to_cents(value: Decimal) -> Decimal {
    let mut rounded = value
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.checked_add(half()))
        .map(|cents| cents.floor() / Decimal::ONE_HUNDRED)
        .unwrap_or(value);
    rounded.rescale(2);
    rounded
}

/// Converts a float to a decimal, mapping NaN, infinities and anything out of
/// range to zero.
///
/// # Examples
///
/// ```
/// use guideline_engine::calculation::coerce_f64;
/// use rust_decimal::Decimal;
///
/// assert_eq!(coerce_f64(f64::NAN), Decimal::ZERO);
/// assert_eq!(coerce_f64(f64::INFINITY), Decimal::ZERO);
/// assert_eq!(coerce_f64(1250.0), Decimal::from(1250));
/// ```
pub fn coerce_f64(value: f64) -> Decimal {
    if !value.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}
