//! Coupon Model

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Wire value for an unlimited coupon
pub const UNLIMITED: &str = "unlimited";

/// How many times a coupon may be redeemed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UsageLimit {
    #[default]
    Unlimited,
    Limited(i64),
}

impl UsageLimit {
    /// Build from the nullable `usage_limit` column (NULL = unlimited)
    pub fn from_column(value: Option<i64>) -> Self {
        match value {
            Some(limit) => Self::Limited(limit),
            None => Self::Unlimited,
        }
    }

    /// Nullable column representation
    pub fn to_column(self) -> Option<i64> {
        match self {
            Self::Unlimited => None,
            Self::Limited(limit) => Some(limit),
        }
    }

    /// True once `used_count` has reached a finite limit
    pub fn is_reached(self, used_count: i64) -> bool {
        match self {
            Self::Unlimited => false,
            Self::Limited(limit) => used_count >= limit,
        }
    }
}

impl Serialize for UsageLimit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unlimited => serializer.serialize_str(UNLIMITED),
            Self::Limited(limit) => serializer.serialize_i64(*limit),
        }
    }
}

impl<'de> Deserialize<'de> for UsageLimit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct UsageLimitVisitor;

        impl<'de> Visitor<'de> for UsageLimitVisitor {
            type Value = UsageLimit;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a whole number or \"unlimited\"")
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                Ok(UsageLimit::Limited(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                i64::try_from(value)
                    .map(UsageLimit::Limited)
                    .map_err(|_| E::custom(format!("usage limit too large: {value}")))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
                if value.is_finite() && value.fract() == 0.0 {
                    Ok(UsageLimit::Limited(value as i64))
                } else {
                    Err(E::custom(format!("usage limit must be whole, got {value}")))
                }
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                if value.trim().eq_ignore_ascii_case(UNLIMITED) {
                    Ok(UsageLimit::Unlimited)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(value), &self))
                }
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(UsageLimit::Unlimited)
            }
        }

        deserializer.deserialize_any(UsageLimitVisitor)
    }
}

/// Normalize a coupon code for storage and lookup.
///
/// Codes are case-insensitive; surrounding whitespace is ignored.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Coupon entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    /// Normalized (uppercase) code
    pub code: String,
    /// Percentage off the post-volume-discount subtotal (10 = 10%)
    #[serde(rename = "discount", alias = "discount_percent")]
    pub discount_percent: f64,
    #[serde(rename = "limit", alias = "usage_limit", default)]
    pub usage_limit: UsageLimit,
    #[serde(rename = "used", alias = "used_count", default)]
    pub used_count: i64,
    pub is_active: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

impl Coupon {
    /// Active and not used up
    pub fn is_applicable(&self) -> bool {
        self.is_active && !self.usage_limit.is_reached(self.used_count)
    }

    /// Redemptions left, `None` when unlimited
    pub fn remaining_uses(&self) -> Option<i64> {
        match self.usage_limit {
            UsageLimit::Unlimited => None,
            UsageLimit::Limited(limit) => Some((limit - self.used_count).max(0)),
        }
    }
}

/// Create coupon payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponCreate {
    pub code: String,
    #[serde(alias = "discount")]
    pub discount_percent: f64,
    #[serde(default, alias = "limit")]
    pub usage_limit: UsageLimit,
    pub is_active: Option<bool>,
}

/// Update coupon payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CouponUpdate {
    #[serde(alias = "discount")]
    pub discount_percent: Option<f64>,
    #[serde(alias = "limit")]
    pub usage_limit: Option<UsageLimit>,
    pub is_active: Option<bool>,
}

/// Coupon validation request (POST /api/coupons/validate)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponValidateRequest {
    pub code: String,
}
