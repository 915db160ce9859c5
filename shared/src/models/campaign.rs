//! Campaign Model

use serde::{Deserialize, Serialize};

use super::serde_helpers::lenient_reels;

/// Campaign lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum CampaignStatus {
    Pending,
    Active,
    Completed,
    Cancelled,
}

impl CampaignStatus {
    /// Allowed moves: PENDING -> ACTIVE | CANCELLED, ACTIVE -> COMPLETED | CANCELLED
    pub fn can_transition_to(self, next: CampaignStatus) -> bool {
        use CampaignStatus::*;
        matches!(
            (self, next),
            (Pending, Active) | (Pending, Cancelled) | (Active, Completed) | (Active, Cancelled)
        )
    }
}

/// Campaign entity
///
/// Carries the full pricing breakdown captured at submission; `budget` is
/// the amount that was charged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Campaign {
    pub id: i64,
    pub account_id: i64,
    pub name: String,
    pub expected_reels: i64,
    pub price_per_reel: f64,
    pub base_cost: f64,
    pub volume_discount_percent: f64,
    pub volume_discount_amount: f64,
    pub coupon_code: Option<String>,
    pub coupon_discount_percent: f64,
    pub coupon_discount_amount: f64,
    pub budget: f64,
    pub status: CampaignStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Campaign submission payload (POST /api/accounts/{id}/campaigns)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignCreate {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_reels")]
    pub expected_reels: i64,
    pub coupon_code: Option<String>,
}

/// Submission result: the stored campaign and the balance left after the charge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignReceipt {
    pub campaign: Campaign,
    pub remaining_balance: f64,
}

/// Status change payload (PUT /api/campaigns/{id}/status)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignStatusUpdate {
    pub status: CampaignStatus,
}
