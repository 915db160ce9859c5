//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to
//! `f64` for storage/serialization. Arithmetic on amounts is checked; an
//! overflow surfaces as a [`PricingError`] instead of a panic.

use rust_decimal::prelude::*;

use super::error::PricingError;

/// Monetary values keep 2 decimal places, rounded half away from zero
const DECIMAL_PLACES: u32 = 2;

/// Convert a bounded input amount to Decimal.
///
/// Rejects non-finite values, negatives and anything above `max`, so the
/// conversion itself can no longer fail.
pub fn checked_amount(value: f64, field: &'static str, max: f64) -> Result<Decimal, PricingError> {
    if !value.is_finite() || value < 0.0 || value > max {
        return Err(PricingError::OutOfRange { field, value, max });
    }
    Decimal::from_f64(value).ok_or(PricingError::OutOfRange { field, value, max })
}

/// Convert f64 to Decimal for values already known to be in range.
///
/// NaN maps to zero; magnitudes past the `Decimal` range saturate.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    match Decimal::from_f64(value) {
        Some(d) => d,
        None if value.is_nan() => Decimal::ZERO,
        None if value > 0.0 => Decimal::MAX,
        None => Decimal::MIN,
    }
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// Round to cents, half away from zero
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamp a percentage into 0-100
#[inline]
pub fn clamp_percent(percent: f64) -> Decimal {
    to_decimal(percent).clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// `amount * percent / 100`, rounded to cents
pub fn percent_of(
    amount: Decimal,
    percent: f64,
    stage: &'static str,
) -> Result<Decimal, PricingError> {
    amount
        .checked_mul(clamp_percent(percent))
        .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
        .map(round_money)
        .ok_or(PricingError::Overflow { stage })
}
