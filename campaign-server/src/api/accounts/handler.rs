//! Account API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::{AppError, ErrorCode};
use shared::message::resource;
use shared::models::{
    Account, AccountBalance, AccountCreate, Campaign, CampaignCreate, CampaignReceipt,
    DepositRequest,
};

use crate::core::ServerState;
use crate::db::repository::{AccountRepository, RepoError};
use crate::services::CampaignService;
use crate::services::quote::account_not_found;
use crate::utils::AppResult;
use crate::utils::validation::{MAX_NAME_LEN, validate_text_with};

/// POST /api/accounts
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AccountCreate>,
) -> AppResult<Json<Account>> {
    validate_text_with(&payload.name, "name", MAX_NAME_LEN, ErrorCode::AccountNameInvalid)?;

    let repo = AccountRepository::new(state.pool());
    let account = repo.create(payload).await?;

    tracing::info!(account_id = account.id, balance = account.balance, "Account created");
    state.broadcast_sync(resource::ACCOUNT, "created", &account.id.to_string(), Some(&account));

    Ok(Json(account))
}

/// GET /api/accounts/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Account>> {
    let repo = AccountRepository::new(state.pool());
    let account = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| account_not_found(id))?;
    Ok(Json(account))
}

/// GET /api/accounts/{id}/balance
pub async fn balance(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AccountBalance>> {
    let repo = AccountRepository::new(state.pool());
    let account = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| account_not_found(id))?;
    Ok(Json(AccountBalance {
        account_id: account.id,
        balance: account.balance,
    }))
}

/// POST /api/accounts/{id}/deposit
pub async fn deposit(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DepositRequest>,
) -> AppResult<Json<AccountBalance>> {
    let repo = AccountRepository::new(state.pool());
    let account = repo.deposit(id, payload.amount).await.map_err(|e| match e {
        RepoError::NotFound(_) => account_not_found(id),
        RepoError::Validation(msg) => AppError::with_message(ErrorCode::DepositInvalidAmount, msg)
            .with_detail("amount", payload.amount),
        other => other.into(),
    })?;

    tracing::info!(account_id = id, amount = payload.amount, balance = account.balance, "Deposit");
    state.broadcast_sync(resource::ACCOUNT, "updated", &id.to_string(), Some(&account));

    Ok(Json(AccountBalance {
        account_id: account.id,
        balance: account.balance,
    }))
}

/// GET /api/accounts/{id}/campaigns
pub async fn list_campaigns(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Campaign>>> {
    let service = CampaignService::new(state.pool());
    Ok(Json(service.list_for_account(id).await?))
}

/// POST /api/accounts/{id}/campaigns
pub async fn submit_campaign(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CampaignCreate>,
) -> AppResult<Json<CampaignReceipt>> {
    let service = CampaignService::new(state.pool());
    let receipt = service.submit(id, payload).await?;

    let campaign = &receipt.campaign;
    state.broadcast_sync(resource::CAMPAIGN, "created", &campaign.id.to_string(), Some(campaign));
    state.broadcast_sync(
        resource::ACCOUNT,
        "updated",
        &id.to_string(),
        Some(&AccountBalance {
            account_id: id,
            balance: receipt.remaining_balance,
        }),
    );
    if let Some(code) = &campaign.coupon_code {
        // Usage count moved; the coupon may now be exhausted
        state.broadcast_sync::<()>(resource::COUPON, "updated", code, None);
    }

    Ok(Json(receipt))
}
