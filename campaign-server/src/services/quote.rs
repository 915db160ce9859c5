//! Budget quotes
//!
//! Async entry points of the pricing engine. Inputs are read from the
//! stores on every call, so a quote always reflects the configuration and
//! coupon state at the time it was asked for.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Affordability, BudgetBreakdown};

use crate::db::repository::{BalanceStore, CouponStore, PricingConfigStore};
use crate::pricing::{PricingError, can_afford_campaign, compute_campaign_budget, validate_coupon};

/// Compute the budget for `expected_reels` with an optional coupon code.
///
/// A blank code means no coupon. A code that is given but cannot be used
/// rejects the whole quote so the requester sees why.
pub async fn quote_budget<P, C>(
    configs: &P,
    coupons: &C,
    expected_reels: i64,
    coupon_code: Option<&str>,
) -> Result<BudgetBreakdown, PricingError>
where
    P: PricingConfigStore + ?Sized,
    C: CouponStore + ?Sized,
{
    let config = configs.current_config().await?;

    let coupon = match coupon_code.map(str::trim).filter(|c| !c.is_empty()) {
        Some(code) => Some(validate_coupon(code, coupons).await?),
        None => None,
    };

    compute_campaign_budget(expected_reels, &config, coupon.as_ref())
}

/// Balance check for an account against a computed total
pub async fn check_balance<B>(
    balances: &B,
    account_id: i64,
    total_budget: f64,
) -> AppResult<Affordability>
where
    B: BalanceStore + ?Sized,
{
    let balance = balances
        .balance_of(account_id)
        .await?
        .ok_or_else(|| account_not_found(account_id))?;
    Ok(can_afford_campaign(total_budget, balance)?)
}

pub(crate) fn account_not_found(account_id: i64) -> AppError {
    AppError::new(ErrorCode::AccountNotFound).with_detail("account_id", account_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::RepoResult;
    use async_trait::async_trait;
    use shared::models::{Coupon, DiscountTier, PricingConfig, UsageLimit};
    use std::sync::Mutex;

    /// In-memory stand-in for all three stores
    struct Fixture {
        config: Mutex<PricingConfig>,
        coupons: Vec<Coupon>,
        balance: f64,
    }

    #[async_trait]
    impl PricingConfigStore for Fixture {
        async fn current_config(&self) -> RepoResult<PricingConfig> {
            Ok(self.config.lock().unwrap().clone())
        }
    }

    #[async_trait]
    impl CouponStore for Fixture {
        async fn find_coupon(&self, code: &str) -> RepoResult<Option<Coupon>> {
            Ok(self.coupons.iter().find(|c| c.code == code).cloned())
        }
    }

    #[async_trait]
    impl BalanceStore for Fixture {
        async fn balance_of(&self, account_id: i64) -> RepoResult<Option<f64>> {
            Ok((account_id == 1).then_some(self.balance))
        }
    }

    fn fixture() -> Fixture {
        Fixture {
            config: Mutex::new(PricingConfig::new(
                10.0,
                vec![DiscountTier::new(50, 10.0), DiscountTier::new(100, 20.0)],
            )),
            coupons: vec![Coupon {
                code: "REEL10".into(),
                discount_percent: 10.0,
                usage_limit: UsageLimit::Limited(10),
                used_count: 9,
                is_active: true,
                created_at: 0,
                updated_at: 0,
            }],
            balance: 500.0,
        }
    }

    #[tokio::test]
    async fn test_quote_with_coupon() {
        let f = fixture();
        let quote = quote_budget(&f, &f, 100, Some("reel10")).await.unwrap();
        assert_eq!(quote.total_budget, 720.0);
        assert_eq!(quote.coupon_code.as_deref(), Some("REEL10"));
    }

    #[tokio::test]
    async fn test_blank_code_means_no_coupon() {
        let f = fixture();
        let quote = quote_budget(&f, &f, 100, Some("  ")).await.unwrap();
        assert_eq!(quote.total_budget, 800.0);
        assert!(quote.coupon_code.is_none());
    }

    #[tokio::test]
    async fn test_unknown_coupon_rejects_quote() {
        let f = fixture();
        let err = quote_budget(&f, &f, 100, Some("NOPE")).await.unwrap_err();
        assert!(matches!(err, PricingError::InvalidCoupon { .. }));
    }

    #[tokio::test]
    async fn test_quote_follows_config_changes() {
        let f = fixture();
        assert_eq!(quote_budget(&f, &f, 40, None).await.unwrap().total_budget, 400.0);

        *f.config.lock().unwrap() = PricingConfig::new(12.0, vec![]);
        assert_eq!(quote_budget(&f, &f, 40, None).await.unwrap().total_budget, 480.0);
    }

    #[tokio::test]
    async fn test_oversized_estimate_rejects_quote() {
        let f = fixture();
        let err = quote_budget(&f, &f, i64::MAX, Some("REEL10")).await.unwrap_err();
        assert!(matches!(err, PricingError::OutOfRange { .. }));
    }

    #[tokio::test]
    async fn test_check_balance() {
        let f = fixture();
        let check = check_balance(&f, 1, 720.0).await.unwrap();
        assert!(!check.allowed);
        assert_eq!(check.shortfall, 220.0);

        let err = check_balance(&f, 2, 1.0).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AccountNotFound);
    }
}
