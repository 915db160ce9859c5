//! Unified error system for the campaign service
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ErrorResponse`]: JSON body of every failed request
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 3xxx: Account errors
//! - 4xxx: Campaign errors
//! - 5xxx: Payment / balance errors
//! - 6xxx: Coupon errors
//! - 7xxx: Pricing configuration errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ErrorResponse};
//!
//! // Create a simple error
//! let err = AppError::new(ErrorCode::CouponInvalid);
//!
//! // Create an error with details
//! let err = AppError::with_message(ErrorCode::InsufficientFunds, "Insufficient balance")
//!     .with_detail("shortfall", 220.0);
//!
//! // Body sent to the client
//! let body = ErrorResponse::from(&err);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorResponse};
