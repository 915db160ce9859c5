//! Campaign Budget Calculation
//!
//! base = reels * price_per_reel
//! subtotal = base - volume discount
//! total = subtotal - coupon discount
//!
//! Every stage is rounded to cents before the next one is derived, so the
//! figures shown to the requester always add up.

use rust_decimal::Decimal;
use shared::models::{
    Affordability, BudgetBreakdown, Coupon, MAX_EXPECTED_REELS, MAX_MONEY_AMOUNT,
    MAX_PRICE_PER_REEL, PricingConfig,
};

use super::coupon::apply_coupon;
use super::error::PricingError;
use super::money::{checked_amount, round_money, to_f64};
use super::tier::compute_volume_discount;

/// Compute the full budget breakdown for a campaign.
///
/// Non-positive reel counts mean "no estimate" and produce an all-zero
/// breakdown (the configured price is still reported). Counts above
/// [`MAX_EXPECTED_REELS`] and prices above [`MAX_PRICE_PER_REEL`] are
/// rejected. The coupon, if any, must already have been validated.
pub fn compute_campaign_budget(
    expected_reels: i64,
    config: &PricingConfig,
    coupon: Option<&Coupon>,
) -> Result<BudgetBreakdown, PricingError> {
    let reels = expected_reels.max(0);
    if reels > MAX_EXPECTED_REELS {
        return Err(PricingError::OutOfRange {
            field: "expected_reels",
            value: reels as f64,
            max: MAX_EXPECTED_REELS as f64,
        });
    }
    let price = checked_amount(config.price_per_reel, "price_per_reel", MAX_PRICE_PER_REEL)?;

    let base_cost = price
        .checked_mul(Decimal::from(reels))
        .map(round_money)
        .ok_or(PricingError::Overflow { stage: "base cost" })?;

    let volume = compute_volume_discount(reels, base_cost, &config.discount_tiers)?;
    let subtotal = base_cost
        .checked_sub(volume.discount_amount)
        .ok_or(PricingError::Overflow { stage: "subtotal" })?
        .max(Decimal::ZERO);
    let coupon = apply_coupon(subtotal, coupon)?;

    Ok(BudgetBreakdown {
        expected_reels: reels,
        price_per_reel: config.price_per_reel,
        base_cost: to_f64(base_cost),
        volume_discount_percent: volume.discount_percent,
        volume_discount_amount: to_f64(volume.discount_amount),
        subtotal_after_volume_discount: to_f64(subtotal),
        coupon_code: coupon.code,
        coupon_discount_percent: coupon.discount_percent,
        coupon_discount_amount: to_f64(coupon.discount_amount),
        total_budget: to_f64(coupon.total),
    })
}

/// Check whether `balance` covers `total_budget`.
///
/// Equality is enough to proceed; the shortfall is reported when it isn't.
/// Either amount outside 0..=[`MAX_MONEY_AMOUNT`] is an error.
pub fn can_afford_campaign(total_budget: f64, balance: f64) -> Result<Affordability, PricingError> {
    let required = round_money(checked_amount(total_budget, "total_budget", MAX_MONEY_AMOUNT)?);
    let available = round_money(checked_amount(balance, "balance", MAX_MONEY_AMOUNT)?);

    Ok(Affordability {
        allowed: required <= available,
        balance: to_f64(available),
        required: to_f64(required),
        shortfall: to_f64((required - available).max(Decimal::ZERO)),
    })
}

/// Like [`can_afford_campaign`], but turns a failed check into an error
pub fn ensure_affordable(total_budget: f64, balance: f64) -> Result<Affordability, PricingError> {
    let check = can_afford_campaign(total_budget, balance)?;
    if check.allowed {
        Ok(check)
    } else {
        Err(PricingError::insufficient_funds(&check))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::money::to_decimal;
    use shared::models::{DiscountTier, UsageLimit};

    fn config() -> PricingConfig {
        PricingConfig::new(
            10.0,
            vec![DiscountTier::new(50, 10.0), DiscountTier::new(100, 20.0)],
        )
    }

    fn reel10() -> Coupon {
        Coupon {
            code: "REEL10".to_string(),
            discount_percent: 10.0,
            usage_limit: UsageLimit::Limited(10),
            used_count: 9,
            is_active: true,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_top_tier_with_coupon() {
        let budget = compute_campaign_budget(100, &config(), Some(&reel10())).unwrap();

        assert_eq!(budget.base_cost, 1000.0);
        assert_eq!(budget.volume_discount_percent, 20.0);
        assert_eq!(budget.volume_discount_amount, 200.0);
        assert_eq!(budget.subtotal_after_volume_discount, 800.0);
        assert_eq!(budget.coupon_code.as_deref(), Some("REEL10"));
        assert_eq!(budget.coupon_discount_amount, 80.0);
        assert_eq!(budget.total_budget, 720.0);
    }

    #[test]
    fn test_below_every_tier_without_coupon() {
        let budget = compute_campaign_budget(40, &config(), None).unwrap();

        assert_eq!(budget.base_cost, 400.0);
        assert_eq!(budget.volume_discount_amount, 0.0);
        assert_eq!(budget.subtotal_after_volume_discount, 400.0);
        assert_eq!(budget.coupon_discount_amount, 0.0);
        assert!(budget.coupon_code.is_none());
        assert_eq!(budget.total_budget, 400.0);
    }

    #[test]
    fn test_no_estimate_is_free() {
        for reels in [0, -1, i64::MIN] {
            let budget = compute_campaign_budget(reels, &config(), Some(&reel10())).unwrap();
            assert_eq!(budget.expected_reels, 0);
            assert_eq!(budget.base_cost, 0.0);
            assert_eq!(budget.volume_discount_amount, 0.0);
            assert_eq!(budget.coupon_discount_amount, 0.0);
            assert_eq!(budget.total_budget, 0.0);
        }
    }

    #[test]
    fn test_stages_add_up() {
        let config = PricingConfig::new(3.33, vec![DiscountTier::new(7, 12.5)]);
        let mut coupon = reel10();
        coupon.discount_percent = 33.0;

        for reels in 1..200 {
            let b = compute_campaign_budget(reels, &config, Some(&coupon)).unwrap();
            let subtotal = to_decimal(b.base_cost) - to_decimal(b.volume_discount_amount);
            assert_eq!(to_f64(subtotal), b.subtotal_after_volume_discount);
            let total = subtotal - to_decimal(b.coupon_discount_amount);
            assert_eq!(to_f64(total), b.total_budget);
            assert!(b.total_budget >= 0.0);
        }
    }

    #[test]
    fn test_total_never_negative() {
        let config = PricingConfig::new(10.0, vec![DiscountTier::new(1, 100.0)]);
        let mut coupon = reel10();
        coupon.discount_percent = 100.0;

        let budget = compute_campaign_budget(25, &config, Some(&coupon)).unwrap();
        assert_eq!(budget.subtotal_after_volume_discount, 0.0);
        assert_eq!(budget.total_budget, 0.0);
    }

    #[test]
    fn test_largest_accepted_inputs_price_exactly() {
        let config = PricingConfig::new(MAX_PRICE_PER_REEL, vec![DiscountTier::new(1, 20.0)]);
        assert!(config.validate().is_ok());
        let mut coupon = reel10();
        coupon.discount_percent = 50.0;

        let budget = compute_campaign_budget(MAX_EXPECTED_REELS, &config, Some(&coupon)).unwrap();
        assert_eq!(budget.base_cost, MAX_MONEY_AMOUNT);
        assert_eq!(budget.volume_discount_amount, 2_000_000_000_000.0);
        assert_eq!(budget.subtotal_after_volume_discount, 8_000_000_000_000.0);
        assert_eq!(budget.coupon_discount_amount, 4_000_000_000_000.0);
        assert_eq!(budget.total_budget, 4_000_000_000_000.0);

        assert!(can_afford_campaign(budget.base_cost, MAX_MONEY_AMOUNT).unwrap().allowed);
    }

    #[test]
    fn test_reel_count_above_limit_is_rejected() {
        let config = PricingConfig::new(1e6, vec![DiscountTier::new(1, 20.0)]);
        assert!(config.validate().is_ok());

        // A lenient "1e30" form value saturates to i64::MAX
        for reels in [MAX_EXPECTED_REELS + 1, i64::MAX] {
            let err = compute_campaign_budget(reels, &config, Some(&reel10())).unwrap_err();
            assert!(matches!(
                err,
                PricingError::OutOfRange {
                    field: "expected_reels",
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_unrepresentable_price_is_rejected_not_zeroed() {
        for price in [1e29, MAX_PRICE_PER_REEL + 0.01, f64::NAN, -1.0] {
            let config = PricingConfig::new(price, vec![]);
            let err = compute_campaign_budget(10, &config, None).unwrap_err();
            assert!(matches!(
                err,
                PricingError::OutOfRange {
                    field: "price_per_reel",
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_unrepresentable_balance_is_rejected_not_zeroed() {
        let err = can_afford_campaign(100.0, 1e30).unwrap_err();
        assert!(matches!(err, PricingError::OutOfRange { field: "balance", .. }));

        let err = ensure_affordable(f64::INFINITY, 100.0).unwrap_err();
        assert!(matches!(
            err,
            PricingError::OutOfRange {
                field: "total_budget",
                ..
            }
        ));
    }

    #[test]
    fn test_affordability() {
        let short = can_afford_campaign(720.0, 500.0).unwrap();
        assert!(!short.allowed);
        assert_eq!(short.shortfall, 220.0);

        let exact = can_afford_campaign(720.0, 720.0).unwrap();
        assert!(exact.allowed);
        assert_eq!(exact.shortfall, 0.0);

        assert!(can_afford_campaign(0.0, 0.0).unwrap().allowed);
    }

    #[test]
    fn test_ensure_affordable_reports_shortfall() {
        let err = ensure_affordable(720.0, 500.0).unwrap_err();
        match err {
            PricingError::InsufficientFunds {
                balance,
                required,
                shortfall,
            } => {
                assert_eq!(balance, 500.0);
                assert_eq!(required, 720.0);
                assert_eq!(shortfall, 220.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(ensure_affordable(720.0, 1000.0).is_ok());
    }
}
