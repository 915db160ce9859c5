//! Repository Module
//!
//! SQLite access for pricing configuration, coupons, accounts and
//! campaigns, plus the read-only store traits the pricing engine is
//! written against.

pub mod account;
pub mod campaign;
pub mod coupon;
pub mod pricing_config;

// Re-exports
pub use account::AccountRepository;
pub use campaign::CampaignRepository;
pub use coupon::CouponRepository;
pub use pricing_config::PricingConfigRepository;

use async_trait::async_trait;
use shared::error::{AppError, ErrorCode};
use shared::models::{Coupon, PricingConfig};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_unique_violation()
        {
            return RepoError::Duplicate(db_err.message().to_string());
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Repository failure");
                AppError::database(msg)
            }
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// Pricing inputs
// =============================================================================

/// Source of the current pricing configuration
#[async_trait]
pub trait PricingConfigStore: Send + Sync {
    async fn current_config(&self) -> RepoResult<PricingConfig>;
}

/// Coupon lookup by normalized code
#[async_trait]
pub trait CouponStore: Send + Sync {
    async fn find_coupon(&self, code: &str) -> RepoResult<Option<Coupon>>;
}

/// Spendable balance of an account, `None` for unknown accounts
#[async_trait]
pub trait BalanceStore: Send + Sync {
    async fn balance_of(&self, account_id: i64) -> RepoResult<Option<f64>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_error_to_app_error() {
        let err: AppError = RepoError::Duplicate("coupon SUMMER".into()).into();
        assert_eq!(err.code, ErrorCode::AlreadyExists);

        let err: AppError = RepoError::Validation("bad".into()).into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let err: AppError = RepoError::Database("disk full".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
