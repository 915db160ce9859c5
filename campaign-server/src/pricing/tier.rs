//! Volume Tier Selection
//!
//! The highest threshold a reel count reaches decides the volume discount.
//! Tiers sharing a threshold are resolved in favour of the larger discount,
//! so the result never depends on the order tiers were stored in.

use rust_decimal::Decimal;
use shared::models::DiscountTier;

use super::error::PricingError;
use super::money::{clamp_percent, percent_of, to_f64};

/// Volume discount selected for a reel count
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolumeDiscount {
    /// The applicable tier, `None` when the count is below every threshold
    pub tier: Option<DiscountTier>,
    /// Percentage off the base cost (0 when no tier applies)
    pub discount_percent: f64,
    /// `base_cost * discount_percent / 100`, rounded to cents
    pub discount_amount: Decimal,
}

/// Sort tiers into scan order: threshold descending, then discount descending
pub fn sort_tiers_for_scan(tiers: &mut [&DiscountTier]) {
    tiers.sort_by(|a, b| {
        b.reels_threshold
            .cmp(&a.reels_threshold)
            .then_with(|| b.discount_percent.total_cmp(&a.discount_percent))
    });
}

/// Find the tier that applies to `reel_count`.
///
/// Scans tiers by descending threshold and returns the first one whose
/// threshold the count meets. Non-positive counts never qualify.
pub fn select_volume_tier(reel_count: i64, tiers: &[DiscountTier]) -> Option<&DiscountTier> {
    if reel_count <= 0 {
        return None;
    }

    let mut ordered: Vec<&DiscountTier> = tiers.iter().collect();
    sort_tiers_for_scan(&mut ordered);

    ordered
        .into_iter()
        .find(|tier| tier.reels_threshold <= reel_count)
}

/// Compute the volume discount on `base_cost` for `reel_count` reels.
///
/// An empty tier set, or a count below every threshold, yields 0.
pub fn compute_volume_discount(
    reel_count: i64,
    base_cost: Decimal,
    tiers: &[DiscountTier],
) -> Result<VolumeDiscount, PricingError> {
    let discount = match select_volume_tier(reel_count, tiers) {
        Some(tier) => VolumeDiscount {
            tier: Some(tier.clone()),
            discount_percent: to_f64(clamp_percent(tier.discount_percent)),
            discount_amount: percent_of(base_cost, tier.discount_percent, "volume discount")?,
        },
        None => VolumeDiscount::default(),
    };
    Ok(discount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::money::to_decimal;

    fn tiers() -> Vec<DiscountTier> {
        vec![DiscountTier::new(50, 10.0), DiscountTier::new(100, 20.0)]
    }

    #[test]
    fn test_highest_qualifying_threshold_wins() {
        let tiers = tiers();
        assert_eq!(select_volume_tier(100, &tiers), Some(&tiers[1]));
        assert_eq!(select_volume_tier(250, &tiers), Some(&tiers[1]));
        assert_eq!(select_volume_tier(99, &tiers), Some(&tiers[0]));
        assert_eq!(select_volume_tier(50, &tiers), Some(&tiers[0]));
    }

    #[test]
    fn test_below_every_threshold() {
        let discount = compute_volume_discount(40, to_decimal(400.0), &tiers()).unwrap();
        assert_eq!(discount.tier, None);
        assert_eq!(discount.discount_percent, 0.0);
        assert_eq!(discount.discount_amount, Decimal::ZERO);
    }

    #[test]
    fn test_empty_tier_set() {
        let discount = compute_volume_discount(1_000, to_decimal(10_000.0), &[]).unwrap();
        assert_eq!(discount, VolumeDiscount::default());
    }

    #[test]
    fn test_non_positive_count_never_qualifies() {
        let tiers = vec![DiscountTier::new(0, 5.0)];
        assert!(select_volume_tier(0, &tiers).is_none());
        assert!(select_volume_tier(-5, &tiers).is_none());
        assert!(select_volume_tier(1, &tiers).is_some());
    }

    #[test]
    fn test_amount_is_percent_of_base() {
        let discount = compute_volume_discount(100, to_decimal(1000.0), &tiers()).unwrap();
        assert_eq!(discount.discount_percent, 20.0);
        assert_eq!(discount.discount_amount, to_decimal(200.0));
    }

    #[test]
    fn test_oversized_base_is_an_error() {
        let err = compute_volume_discount(100, Decimal::MAX, &tiers()).unwrap_err();
        assert!(matches!(err, PricingError::Overflow { .. }));
    }

    #[test]
    fn test_tie_break_prefers_larger_discount() {
        let forward = vec![
            DiscountTier::new(50, 5.0),
            DiscountTier::new(50, 15.0),
            DiscountTier::new(10, 2.0),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        for tiers in [&forward, &reversed] {
            let selected = select_volume_tier(60, tiers).unwrap();
            assert_eq!(selected.discount_percent, 15.0);
        }
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let mut shuffled = vec![
            DiscountTier::new(100, 20.0),
            DiscountTier::new(10, 2.0),
            DiscountTier::new(50, 10.0),
        ];
        assert_eq!(select_volume_tier(75, &shuffled).unwrap().discount_percent, 10.0);
        shuffled.sort_by_key(|t| t.reels_threshold);
        assert_eq!(select_volume_tier(75, &shuffled).unwrap().discount_percent, 10.0);
    }

    #[test]
    fn test_discount_non_decreasing_for_growing_tiers() {
        let tiers = vec![
            DiscountTier::new(10, 2.0),
            DiscountTier::new(50, 10.0),
            DiscountTier::new(100, 20.0),
            DiscountTier::new(500, 35.0),
        ];
        let mut previous = 0.0;
        for reels in 1..=600 {
            let percent = select_volume_tier(reels, &tiers)
                .map(|t| t.discount_percent)
                .unwrap_or(0.0);
            assert!(percent >= previous, "discount dropped at {reels} reels");
            previous = percent;
        }
    }
}
