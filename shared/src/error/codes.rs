//! Unified error codes for the campaign service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 3xxx: Account errors
//! - 4xxx: Campaign errors
//! - 5xxx: Payment / balance errors
//! - 6xxx: Coupon errors
//! - 7xxx: Pricing configuration errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility with the dashboard frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Amount or count outside the accepted range
    ValueOutOfRange = 8,

    // ==================== 3xxx: Account ====================
    /// Account not found
    AccountNotFound = 3001,
    /// Account name is empty or too long
    AccountNameInvalid = 3002,

    // ==================== 4xxx: Campaign ====================
    /// Campaign not found
    CampaignNotFound = 4001,
    /// Campaign name is empty or too long
    CampaignNameInvalid = 4002,
    /// Campaign needs a positive reel estimate before submission
    CampaignReelsRequired = 4003,
    /// Status change not allowed from the current status
    CampaignStatusTransition = 4004,

    // ==================== 5xxx: Payment ====================
    /// Account balance does not cover the campaign budget
    InsufficientFunds = 5001,
    /// Deposit amount is not a positive finite number
    DepositInvalidAmount = 5002,

    // ==================== 6xxx: Coupon ====================
    /// Coupon is unknown or inactive
    CouponInvalid = 6001,
    /// Coupon has been used up
    CouponLimitExceeded = 6002,
    /// Coupon code already exists
    CouponCodeExists = 6003,
    /// Coupon not found (admin lookups)
    CouponNotFound = 6004,

    // ==================== 7xxx: Pricing ====================
    /// Pricing configuration failed shape validation
    PricingConfigInvalid = 7001,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the user-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Account
            ErrorCode::AccountNotFound => "Account not found",
            ErrorCode::AccountNameInvalid => "Account name is invalid",

            // Campaign
            ErrorCode::CampaignNotFound => "Campaign not found",
            ErrorCode::CampaignNameInvalid => "Campaign name is invalid",
            ErrorCode::CampaignReelsRequired => "Expected reels must be a positive number",
            ErrorCode::CampaignStatusTransition => "Campaign status change is not allowed",

            // Payment
            ErrorCode::InsufficientFunds => "Insufficient balance for this campaign",
            ErrorCode::DepositInvalidAmount => "Deposit amount must be positive",

            // Coupon
            ErrorCode::CouponInvalid => "Invalid or expired coupon code.",
            ErrorCode::CouponLimitExceeded => "This coupon has reached its usage limit.",
            ErrorCode::CouponCodeExists => "Coupon code already exists",
            ErrorCode::CouponNotFound => "Coupon not found",

            // Pricing
            ErrorCode::PricingConfigInvalid => "Pricing configuration is invalid",

            // System
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Account
            3001 => Ok(ErrorCode::AccountNotFound),
            3002 => Ok(ErrorCode::AccountNameInvalid),

            // Campaign
            4001 => Ok(ErrorCode::CampaignNotFound),
            4002 => Ok(ErrorCode::CampaignNameInvalid),
            4003 => Ok(ErrorCode::CampaignReelsRequired),
            4004 => Ok(ErrorCode::CampaignStatusTransition),

            // Payment
            5001 => Ok(ErrorCode::InsufficientFunds),
            5002 => Ok(ErrorCode::DepositInvalidAmount),

            // Coupon
            6001 => Ok(ErrorCode::CouponInvalid),
            6002 => Ok(ErrorCode::CouponLimitExceeded),
            6003 => Ok(ErrorCode::CouponCodeExists),
            6004 => Ok(ErrorCode::CouponNotFound),

            // Pricing
            7001 => Ok(ErrorCode::PricingConfigInvalid),

            // System
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}
