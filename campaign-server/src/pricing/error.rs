//! Pricing outcomes the requester must see
//!
//! None of these are faults: they are rejected inputs rendered as inline
//! feedback next to the campaign form.

use shared::error::{AppError, ErrorCode};
use shared::models::Affordability;

use crate::db::repository::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    /// Unknown or inactive coupon (the two are not distinguished)
    #[error("Invalid or expired coupon code.")]
    InvalidCoupon { code: String },

    /// Active coupon whose finite usage limit has been reached
    #[error("This coupon has reached its usage limit.")]
    CouponLimitExceeded { code: String },

    /// Budget exceeds the account balance
    #[error("Insufficient balance: {balance:.2} available, {required:.2} required")]
    InsufficientFunds {
        balance: f64,
        required: f64,
        shortfall: f64,
    },

    /// Input amount outside the accepted range
    #[error("{field} must be between 0 and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        max: f64,
    },

    /// Intermediate amount past what can be represented
    #[error("Amount overflowed while computing the {stage}")]
    Overflow { stage: &'static str },

    /// A collaborator store failed
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl PricingError {
    pub fn insufficient_funds(check: &Affordability) -> Self {
        Self::InsufficientFunds {
            balance: check.balance,
            required: check.required,
            shortfall: check.shortfall,
        }
    }
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::InvalidCoupon { code } => {
                AppError::new(ErrorCode::CouponInvalid).with_detail("code", code)
            }
            PricingError::CouponLimitExceeded { code } => {
                AppError::new(ErrorCode::CouponLimitExceeded).with_detail("code", code)
            }
            PricingError::InsufficientFunds {
                balance,
                required,
                shortfall,
            } => AppError::with_message(
                ErrorCode::InsufficientFunds,
                format!(
                    "Insufficient balance: {balance:.2} available, {required:.2} required ({shortfall:.2} short)"
                ),
            )
            .with_detail("balance", balance)
            .with_detail("required", required)
            .with_detail("shortfall", shortfall),
            PricingError::OutOfRange { field, value, max } => {
                AppError::with_message(
                    ErrorCode::ValueOutOfRange,
                    format!("{field} must be between 0 and {max}, got {value}"),
                )
                    .with_detail("field", field)
                    .with_detail("max", max)
            }
            PricingError::Overflow { stage } => {
                AppError::with_message(ErrorCode::ValueOutOfRange, format!("{stage} is too large"))
                    .with_detail("stage", stage)
            }
            PricingError::Repo(e) => e.into(),
        }
    }
}
