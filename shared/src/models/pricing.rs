//! Pricing wire types
//!
//! Results of the pricing engine as the dashboard sees them. Every stage
//! of the calculation is exposed, not just the final number.

use serde::{Deserialize, Serialize};

use super::serde_helpers::lenient_reels;

/// Quote request (POST /api/pricing/quote)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteRequest {
    #[serde(default, deserialize_with = "lenient_reels")]
    pub expected_reels: i64,
    pub coupon_code: Option<String>,
    /// When set, the quote also reports whether this account can pay
    #[serde(default)]
    pub account_id: Option<i64>,
}

/// Stage-by-stage campaign budget
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetBreakdown {
    /// Reel count used (0 when no estimate was given)
    pub expected_reels: i64,
    pub price_per_reel: f64,
    /// expected_reels * price_per_reel
    pub base_cost: f64,
    /// Percentage of the applied volume tier (0 when none qualifies)
    pub volume_discount_percent: f64,
    pub volume_discount_amount: f64,
    /// base_cost - volume_discount_amount
    pub subtotal_after_volume_discount: f64,
    /// Applied coupon (normalized code)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    pub coupon_discount_percent: f64,
    pub coupon_discount_amount: f64,
    /// Amount to charge
    pub total_budget: f64,
}

/// Balance check outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Affordability {
    pub allowed: bool,
    pub balance: f64,
    pub required: f64,
    /// required - balance, 0 when allowed
    pub shortfall: f64,
}

/// Quote result: the breakdown, plus the balance check when an account was given
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResponse {
    #[serde(flatten)]
    pub breakdown: BudgetBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affordability: Option<Affordability>,
}
