//! Pricing API Handlers

use axum::{Json, extract::State};
use shared::message::resource;
use shared::models::{PricingConfig, QuoteRequest, QuoteResponse};

use crate::core::ServerState;
use crate::db::repository::{AccountRepository, CouponRepository, PricingConfigRepository};
use crate::services::{check_balance, quote_budget};
use crate::utils::AppResult;
use crate::utils::validation::{MAX_COUPON_CODE_LEN, validate_optional_text};

/// POST /api/pricing/quote
pub async fn quote(
    State(state): State<ServerState>,
    Json(payload): Json<QuoteRequest>,
) -> AppResult<Json<QuoteResponse>> {
    validate_optional_text(&payload.coupon_code, "coupon_code", MAX_COUPON_CODE_LEN)?;

    let configs = PricingConfigRepository::new(state.pool());
    let coupons = CouponRepository::new(state.pool());
    let breakdown = quote_budget(
        &configs,
        &coupons,
        payload.expected_reels,
        payload.coupon_code.as_deref(),
    )
    .await?;

    let affordability = match payload.account_id {
        Some(account_id) => {
            let accounts = AccountRepository::new(state.pool());
            Some(check_balance(&accounts, account_id, breakdown.total_budget).await?)
        }
        None => None,
    };

    Ok(Json(QuoteResponse {
        breakdown,
        affordability,
    }))
}

/// GET /api/pricing/config
pub async fn get_config(State(state): State<ServerState>) -> AppResult<Json<PricingConfig>> {
    let repo = PricingConfigRepository::new(state.pool());
    Ok(Json(repo.get().await?))
}

/// PUT /api/pricing/config
pub async fn replace_config(
    State(state): State<ServerState>,
    Json(payload): Json<PricingConfig>,
) -> AppResult<Json<PricingConfig>> {
    // Shape errors carry the pricing error code and the offending tier
    payload.validate()?;

    let repo = PricingConfigRepository::new(state.pool());
    let config = repo.replace(&payload).await?;

    state.broadcast_sync(resource::PRICING_CONFIG, "updated", "1", Some(&config));

    Ok(Json(config))
}
