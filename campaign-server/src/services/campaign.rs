//! Campaign submission and lifecycle
//!
//! Submission re-prices the campaign from fresh reads, gates it on the
//! account balance, then charges it atomically: the campaign row, the
//! coupon redemption and the balance debit commit together or not at all.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Campaign, CampaignCreate, CampaignReceipt, CampaignStatus};
use sqlx::SqlitePool;

use super::quote::{account_not_found, quote_budget};
use crate::db::repository::{
    AccountRepository, BalanceStore, CampaignRepository, CouponRepository,
    PricingConfigRepository, RepoError,
};
use crate::pricing::{PricingError, ensure_affordable};
use crate::utils::validation::{MAX_NAME_LEN, validate_text_with};

#[derive(Clone)]
pub struct CampaignService {
    pool: SqlitePool,
    configs: PricingConfigRepository,
    coupons: CouponRepository,
    accounts: AccountRepository,
    campaigns: CampaignRepository,
}

impl CampaignService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            configs: PricingConfigRepository::new(pool.clone()),
            coupons: CouponRepository::new(pool.clone()),
            accounts: AccountRepository::new(pool.clone()),
            campaigns: CampaignRepository::new(pool.clone()),
            pool,
        }
    }

    /// Price, charge and record a new campaign for `account_id`
    pub async fn submit(&self, account_id: i64, data: CampaignCreate) -> AppResult<CampaignReceipt> {
        validate_text_with(&data.name, "name", MAX_NAME_LEN, ErrorCode::CampaignNameInvalid)?;
        if data.expected_reels <= 0 {
            return Err(AppError::new(ErrorCode::CampaignReelsRequired)
                .with_detail("expected_reels", data.expected_reels));
        }

        let balance = self
            .accounts
            .balance_of(account_id)
            .await?
            .ok_or_else(|| account_not_found(account_id))?;

        let breakdown = quote_budget(
            &self.configs,
            &self.coupons,
            data.expected_reels,
            data.coupon_code.as_deref(),
        )
        .await?;

        let check = ensure_affordable(breakdown.total_budget, balance).inspect_err(|e| {
            tracing::warn!(account_id, error = %e, "Campaign blocked by balance");
        })?;

        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;

        if let Some(code) = &breakdown.coupon_code
            && !CouponRepository::consume(&mut *tx, code).await?
        {
            // Used up (or retired) between validation and charge
            tracing::warn!(account_id, code = %code, "Coupon exhausted during submission");
            return Err(PricingError::CouponLimitExceeded { code: code.clone() }.into());
        }

        if !AccountRepository::debit(&mut *tx, account_id, breakdown.total_budget).await? {
            tracing::warn!(account_id, "Balance changed during submission");
            return Err(PricingError::insufficient_funds(&check).into());
        }

        let name = data.name.trim();
        let campaign = CampaignRepository::insert(&mut *tx, account_id, name, &breakdown).await?;

        tx.commit().await.map_err(RepoError::from)?;

        let remaining_balance = self.accounts.balance_of(account_id).await?.unwrap_or(0.0);

        tracing::info!(
            account_id,
            campaign_id = campaign.id,
            budget = campaign.budget,
            coupon = ?campaign.coupon_code,
            "Campaign submitted"
        );

        Ok(CampaignReceipt {
            campaign,
            remaining_balance,
        })
    }

    pub async fn get(&self, id: i64) -> AppResult<Campaign> {
        self.campaigns
            .find_by_id(id)
            .await?
            .ok_or_else(|| campaign_not_found(id))
    }

    pub async fn list_for_account(&self, account_id: i64) -> AppResult<Vec<Campaign>> {
        if self.accounts.find_by_id(account_id).await?.is_none() {
            return Err(account_not_found(account_id));
        }
        Ok(self.campaigns.find_by_account(account_id).await?)
    }

    /// Apply a lifecycle transition.
    ///
    /// Balance is not touched: the budget stays charged whatever the outcome.
    pub async fn change_status(&self, id: i64, next: CampaignStatus) -> AppResult<Campaign> {
        let current = self.get(id).await?;
        if !current.status.can_transition_to(next) {
            return Err(transition_error(current.status, next));
        }

        match self.campaigns.update_status(id, current.status, next).await? {
            Some(updated) => {
                tracing::info!(campaign_id = id, from = ?current.status, to = ?next, "Campaign status changed");
                Ok(updated)
            }
            // Someone else moved it first
            None => {
                let latest = self.get(id).await?;
                Err(transition_error(latest.status, next))
            }
        }
    }
}

fn campaign_not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::CampaignNotFound).with_detail("campaign_id", id)
}

fn transition_error(from: CampaignStatus, to: CampaignStatus) -> AppError {
    AppError::with_message(
        ErrorCode::CampaignStatusTransition,
        format!("Cannot move campaign from {from:?} to {to:?}"),
    )
    .with_detail("from", serde_json::to_value(from).unwrap_or_default())
    .with_detail("to", serde_json::to_value(to).unwrap_or_default())
}
