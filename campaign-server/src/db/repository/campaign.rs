//! Campaign Repository

use shared::models::{BudgetBreakdown, Campaign, CampaignStatus};
use sqlx::{SqliteConnection, SqlitePool};

use super::{RepoError, RepoResult};

const COLUMNS: &str = "id, account_id, name, expected_reels, price_per_reel, base_cost, \
     volume_discount_percent, volume_discount_amount, coupon_code, coupon_discount_percent, \
     coupon_discount_amount, budget, status, created_at, updated_at";

#[derive(Clone)]
pub struct CampaignRepository {
    pool: SqlitePool,
}

impl CampaignRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Campaign>> {
        let campaign = sqlx::query_as::<_, Campaign>(&format!(
            "SELECT {COLUMNS} FROM campaign WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(campaign)
    }

    /// Campaigns of an account, newest first
    pub async fn find_by_account(&self, account_id: i64) -> RepoResult<Vec<Campaign>> {
        let campaigns = sqlx::query_as::<_, Campaign>(&format!(
            "SELECT {COLUMNS} FROM campaign WHERE account_id = ? ORDER BY created_at DESC, id DESC"
        ))
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(campaigns)
    }

    /// Record a priced campaign inside the caller's transaction.
    ///
    /// The charged budget is the breakdown's total.
    pub async fn insert(
        conn: &mut SqliteConnection,
        account_id: i64,
        name: &str,
        breakdown: &BudgetBreakdown,
    ) -> RepoResult<Campaign> {
        let now = shared::util::now_millis();
        let campaign = Campaign {
            id: shared::util::snowflake_id(),
            account_id,
            name: name.to_string(),
            expected_reels: breakdown.expected_reels,
            price_per_reel: breakdown.price_per_reel,
            base_cost: breakdown.base_cost,
            volume_discount_percent: breakdown.volume_discount_percent,
            volume_discount_amount: breakdown.volume_discount_amount,
            coupon_code: breakdown.coupon_code.clone(),
            coupon_discount_percent: breakdown.coupon_discount_percent,
            coupon_discount_amount: breakdown.coupon_discount_amount,
            budget: breakdown.total_budget,
            status: CampaignStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(&format!(
            "INSERT INTO campaign ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(campaign.id)
        .bind(campaign.account_id)
        .bind(&campaign.name)
        .bind(campaign.expected_reels)
        .bind(campaign.price_per_reel)
        .bind(campaign.base_cost)
        .bind(campaign.volume_discount_percent)
        .bind(campaign.volume_discount_amount)
        .bind(&campaign.coupon_code)
        .bind(campaign.coupon_discount_percent)
        .bind(campaign.coupon_discount_amount)
        .bind(campaign.budget)
        .bind(campaign.status)
        .bind(campaign.created_at)
        .bind(campaign.updated_at)
        .execute(conn)
        .await?;

        Ok(campaign)
    }

    /// Move a campaign from `from` to `to`.
    ///
    /// The update only applies while the stored status is still `from`, so
    /// two racing transitions cannot both succeed.
    pub async fn update_status(
        &self,
        id: i64,
        from: CampaignStatus,
        to: CampaignStatus,
    ) -> RepoResult<Option<Campaign>> {
        let result = sqlx::query("UPDATE campaign SET status = ?, updated_at = ? WHERE id = ? AND status = ?")
            .bind(to)
            .bind(shared::util::now_millis())
            .bind(id)
            .bind(from)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id)
            .await?
            .map(Some)
            .ok_or_else(|| RepoError::NotFound(format!("Campaign {id} not found")))
    }
}
