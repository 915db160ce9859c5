//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::NotFound
            | Self::AccountNotFound
            | Self::CampaignNotFound
            | Self::CouponNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists | Self::CouponCodeExists | Self::CampaignStatusTransition => {
                StatusCode::CONFLICT
            }

            // 402 Payment Required
            Self::InsufficientFunds => StatusCode::PAYMENT_REQUIRED,

            // 422 Unprocessable (coupon rejected by business rules)
            Self::CouponInvalid | Self::CouponLimitExceeded => StatusCode::UNPROCESSABLE_ENTITY,

            // 500 Internal Server Error
            Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
