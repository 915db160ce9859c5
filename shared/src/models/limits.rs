//! Input limits
//!
//! Every amount that reaches the pricing engine is bounded here, so that
//! `price * reels` and every discount derived from it stay well inside the
//! `Decimal` range and keep cent precision as `f64`.

use crate::error::{AppError, ErrorCode};

/// Highest configurable price for one reel
pub const MAX_PRICE_PER_REEL: f64 = 1_000_000.0;

/// Highest reel estimate a campaign may carry
pub const MAX_EXPECTED_REELS: i64 = 10_000_000;

/// Highest balance, deposit or budget (`MAX_PRICE_PER_REEL * MAX_EXPECTED_REELS`)
pub const MAX_MONEY_AMOUNT: f64 = 10_000_000_000_000.0;

/// Validate that a f64 value is finite (not NaN, not Infinity)
pub fn require_finite(value: f64, field: &str, code: ErrorCode) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(
            AppError::with_message(code, format!("{field} must be a finite number, got {value}"))
                .with_detail("field", field),
        );
    }
    Ok(())
}

/// Validate a non-negative amount no larger than `max`
pub fn validate_amount(value: f64, field: &str, max: f64, code: ErrorCode) -> Result<(), AppError> {
    require_finite(value, field, code)?;
    if value < 0.0 {
        return Err(
            AppError::with_message(code, format!("{field} must be non-negative, got {value}"))
                .with_detail("field", field),
        );
    }
    if value > max {
        return Err(AppError::with_message(
            code,
            format!("{field} exceeds maximum allowed ({max}), got {value}"),
        )
        .with_detail("field", field)
        .with_detail("max", max));
    }
    Ok(())
}
