//! Coupon validation and application

use rust_decimal::Decimal;
use shared::models::{Coupon, normalize_code};

use super::error::PricingError;
use super::money::{clamp_percent, percent_of, to_f64};
use crate::db::repository::CouponStore;

/// Coupon stage of the budget
#[derive(Debug, Clone, PartialEq)]
pub struct CouponDiscount {
    /// Applied coupon code, `None` without a coupon
    pub code: Option<String>,
    pub discount_percent: f64,
    pub discount_amount: Decimal,
    /// `subtotal - discount_amount`, never negative
    pub total: Decimal,
}

/// Decide whether a looked-up coupon may be used.
///
/// Missing and inactive coupons are both reported as invalid; an active
/// coupon whose finite limit is used up is reported separately.
pub fn check_coupon(code: &str, found: Option<Coupon>) -> Result<Coupon, PricingError> {
    match found {
        Some(coupon) if coupon.is_active => {
            if coupon.usage_limit.is_reached(coupon.used_count) {
                Err(PricingError::CouponLimitExceeded {
                    code: code.to_string(),
                })
            } else {
                Ok(coupon)
            }
        }
        _ => Err(PricingError::InvalidCoupon {
            code: code.to_string(),
        }),
    }
}

/// Look a coupon up by code and check that it can be applied.
///
/// Read-only: redemption is counted when a campaign is finalized.
pub async fn validate_coupon<S>(raw_code: &str, store: &S) -> Result<Coupon, PricingError>
where
    S: CouponStore + ?Sized,
{
    let code = normalize_code(raw_code);
    let found = if code.is_empty() {
        None
    } else {
        store.find_coupon(&code).await?
    };

    let result = check_coupon(&code, found);
    if let Err(e) = &result {
        tracing::warn!(code = %code, error = %e, "Coupon rejected");
    }
    result
}

/// Apply an already validated coupon to the post-volume-discount subtotal
pub fn apply_coupon(
    subtotal: Decimal,
    coupon: Option<&Coupon>,
) -> Result<CouponDiscount, PricingError> {
    let Some(coupon) = coupon else {
        return Ok(CouponDiscount {
            code: None,
            discount_percent: 0.0,
            discount_amount: Decimal::ZERO,
            total: subtotal,
        });
    };

    let discount_amount = percent_of(subtotal, coupon.discount_percent, "coupon discount")?;
    let total = subtotal
        .checked_sub(discount_amount)
        .ok_or(PricingError::Overflow { stage: "total" })?;
    Ok(CouponDiscount {
        code: Some(coupon.code.clone()),
        discount_percent: to_f64(clamp_percent(coupon.discount_percent)),
        discount_amount,
        total: total.max(Decimal::ZERO),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::RepoResult;
    use crate::pricing::money::to_decimal;
    use shared::models::UsageLimit;
    use std::collections::HashMap;

    fn coupon(code: &str, percent: f64, limit: UsageLimit, used: i64, active: bool) -> Coupon {
        Coupon {
            code: code.to_string(),
            discount_percent: percent,
            usage_limit: limit,
            used_count: used,
            is_active: active,
            created_at: 0,
            updated_at: 0,
        }
    }

    struct MemoryCoupons(HashMap<String, Coupon>);

    #[async_trait::async_trait]
    impl CouponStore for MemoryCoupons {
        async fn find_coupon(&self, code: &str) -> RepoResult<Option<Coupon>> {
            Ok(self.0.get(code).cloned())
        }
    }

    fn store() -> MemoryCoupons {
        let coupons = [
            coupon("REEL10", 10.0, UsageLimit::Limited(10), 9, true),
            coupon("USEDUP", 10.0, UsageLimit::Limited(10), 10, true),
            coupon("RETIRED", 50.0, UsageLimit::Unlimited, 0, false),
            coupon("FOREVER", 5.0, UsageLimit::Unlimited, 123_456, true),
        ];
        MemoryCoupons(coupons.into_iter().map(|c| (c.code.clone(), c)).collect())
    }

    #[tokio::test]
    async fn test_validate_normalizes_case() {
        let found = validate_coupon("  reel10 ", &store()).await.unwrap();
        assert_eq!(found.code, "REEL10");
    }

    #[tokio::test]
    async fn test_usage_limit_boundary() {
        assert!(validate_coupon("REEL10", &store()).await.is_ok());
        let err = validate_coupon("USEDUP", &store()).await.unwrap_err();
        assert!(matches!(err, PricingError::CouponLimitExceeded { .. }));
    }

    #[tokio::test]
    async fn test_missing_and_inactive_are_indistinguishable() {
        let missing = validate_coupon("NOSUCH", &store()).await.unwrap_err();
        let inactive = validate_coupon("retired", &store()).await.unwrap_err();
        assert!(matches!(missing, PricingError::InvalidCoupon { .. }));
        assert!(matches!(inactive, PricingError::InvalidCoupon { .. }));
        assert_eq!(missing.to_string(), inactive.to_string());
    }

    #[tokio::test]
    async fn test_empty_code_is_invalid() {
        let err = validate_coupon("   ", &store()).await.unwrap_err();
        assert!(matches!(err, PricingError::InvalidCoupon { .. }));
    }

    #[tokio::test]
    async fn test_unlimited_never_exhausts() {
        assert!(validate_coupon("forever", &store()).await.is_ok());
    }

    #[test]
    fn test_apply_without_coupon() {
        let applied = apply_coupon(to_decimal(800.0), None).unwrap();
        assert_eq!(applied.discount_amount, Decimal::ZERO);
        assert_eq!(applied.total, to_decimal(800.0));
        assert!(applied.code.is_none());
    }

    #[test]
    fn test_apply_percentage() {
        let c = coupon("REEL10", 10.0, UsageLimit::Unlimited, 0, true);
        let applied = apply_coupon(to_decimal(800.0), Some(&c)).unwrap();
        assert_eq!(applied.discount_amount, to_decimal(80.0));
        assert_eq!(applied.total, to_decimal(720.0));
        assert_eq!(applied.code.as_deref(), Some("REEL10"));
    }

    #[test]
    fn test_full_discount_bottoms_out_at_zero() {
        let c = coupon("FREE", 100.0, UsageLimit::Unlimited, 0, true);
        let applied = apply_coupon(to_decimal(123.45), Some(&c)).unwrap();
        assert_eq!(applied.total, Decimal::ZERO);
    }
}
