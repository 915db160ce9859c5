//! Pricing Configuration Model

use serde::{Deserialize, Serialize};

use super::limits::{MAX_PRICE_PER_REEL, validate_amount};
use crate::error::{AppError, ErrorCode};

/// Upper bound for any discount percentage
pub const MAX_DISCOUNT_PERCENT: f64 = 100.0;

/// Volume discount tier: campaigns with at least `reels_threshold` reels get
/// `discount_percent` off the base cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiscountTier {
    #[serde(rename = "reels", alias = "reels_threshold")]
    pub reels_threshold: i64,
    /// Percentage off (10 = 10%)
    #[serde(rename = "discount", alias = "discount_percent")]
    pub discount_percent: f64,
}

impl DiscountTier {
    pub fn new(reels_threshold: i64, discount_percent: f64) -> Self {
        Self {
            reels_threshold,
            discount_percent,
        }
    }
}

/// Current pricing configuration, managed by administrators.
///
/// Tiers are kept in the order the administrator entered them; selection
/// never depends on that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(alias = "pricePerReel")]
    pub price_per_reel: f64,
    #[serde(default, alias = "discountTiers")]
    pub discount_tiers: Vec<DiscountTier>,
    /// Last change (Unix millis), set by the server
    #[serde(default)]
    pub updated_at: i64,
}

impl PricingConfig {
    pub fn new(price_per_reel: f64, discount_tiers: Vec<DiscountTier>) -> Self {
        Self {
            price_per_reel,
            discount_tiers,
            updated_at: 0,
        }
    }

    /// Shape check applied before a configuration is stored.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_amount(
            self.price_per_reel,
            "price_per_reel",
            MAX_PRICE_PER_REEL,
            ErrorCode::PricingConfigInvalid,
        )?;
        for (index, tier) in self.discount_tiers.iter().enumerate() {
            if tier.reels_threshold < 0 {
                return Err(invalid(format!(
                    "tier {index}: reels threshold must be >= 0, got {}",
                    tier.reels_threshold
                ))
                .with_detail("tier", index));
            }
            if !is_valid_percent(tier.discount_percent) {
                return Err(invalid(format!(
                    "tier {index}: discount must be within 0-100, got {}",
                    tier.discount_percent
                ))
                .with_detail("tier", index));
            }
        }
        Ok(())
    }
}

/// True when `value` is a finite percentage within 0-100
pub fn is_valid_percent(value: f64) -> bool {
    value.is_finite() && (0.0..=MAX_DISCOUNT_PERCENT).contains(&value)
}

fn invalid(message: String) -> AppError {
    AppError::with_message(ErrorCode::PricingConfigInvalid, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_dashboard_shape() {
        let config: PricingConfig = serde_json::from_value(json!({
            "pricePerReel": 10,
            "discountTiers": [
                { "reels": 50, "discount": 10 },
                { "reels": 100, "discount": 20 }
            ]
        }))
        .unwrap();

        assert_eq!(config.price_per_reel, 10.0);
        assert_eq!(config.discount_tiers.len(), 2);
        assert_eq!(config.discount_tiers[1], DiscountTier::new(100, 20.0));
    }

    #[test]
    fn test_tiers_default_to_empty() {
        let config: PricingConfig =
            serde_json::from_value(json!({ "price_per_reel": 5.5 })).unwrap();
        assert!(config.discount_tiers.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let config = PricingConfig::new(-1.0, vec![]);
        let err = config.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::PricingConfigInvalid);
    }

    #[test]
    fn test_validate_rejects_price_above_limit() {
        assert!(PricingConfig::new(MAX_PRICE_PER_REEL, vec![]).validate().is_ok());

        for price in [MAX_PRICE_PER_REEL + 1.0, 1e29, f64::INFINITY] {
            let err = PricingConfig::new(price, vec![]).validate().unwrap_err();
            assert_eq!(err.code, ErrorCode::PricingConfigInvalid);
        }
    }

    #[test]
    fn test_validate_rejects_out_of_range_discount() {
        let config = PricingConfig::new(10.0, vec![DiscountTier::new(10, 120.0)]);
        assert!(config.validate().is_err());

        let config = PricingConfig::new(10.0, vec![DiscountTier::new(-3, 10.0)]);
        assert!(config.validate().is_err());

        let config = PricingConfig::new(10.0, vec![DiscountTier::new(10, f64::NAN)]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_thresholds_are_allowed() {
        let config = PricingConfig::new(
            10.0,
            vec![DiscountTier::new(50, 5.0), DiscountTier::new(50, 15.0)],
        );
        assert!(config.validate().is_ok());
    }
}
