//! Coupon API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::{AppError, ErrorCode};
use shared::message::resource;
use shared::models::{Coupon, CouponCreate, CouponUpdate, CouponValidateRequest};

use crate::core::ServerState;
use crate::db::repository::{CouponRepository, RepoError};
use crate::pricing::validate_coupon;
use crate::utils::AppResult;
use crate::utils::validation::{MAX_COUPON_CODE_LEN, validate_required_text};

/// GET /api/coupons
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Coupon>>> {
    let repo = CouponRepository::new(state.pool());
    Ok(Json(repo.find_all().await?))
}

/// GET /api/coupons/{code}
pub async fn get_by_code(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<Coupon>> {
    let repo = CouponRepository::new(state.pool());
    let coupon = repo
        .find_by_code(&code)
        .await?
        .ok_or_else(|| coupon_not_found(&code))?;
    Ok(Json(coupon))
}

/// POST /api/coupons
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CouponCreate>,
) -> AppResult<Json<Coupon>> {
    validate_required_text(&payload.code, "code", MAX_COUPON_CODE_LEN)?;

    let repo = CouponRepository::new(state.pool());
    let coupon = repo.create(payload).await.map_err(|e| match e {
        RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::CouponCodeExists, msg),
        other => other.into(),
    })?;

    tracing::info!(code = %coupon.code, discount = coupon.discount_percent, "Coupon created");
    state.broadcast_sync(resource::COUPON, "created", &coupon.code, Some(&coupon));

    Ok(Json(coupon))
}

/// PUT /api/coupons/{code}
pub async fn update(
    State(state): State<ServerState>,
    Path(code): Path<String>,
    Json(payload): Json<CouponUpdate>,
) -> AppResult<Json<Coupon>> {
    let repo = CouponRepository::new(state.pool());
    let coupon = repo.update(&code, payload).await.map_err(|e| match e {
        RepoError::NotFound(_) => coupon_not_found(&code),
        other => other.into(),
    })?;

    state.broadcast_sync(resource::COUPON, "updated", &coupon.code, Some(&coupon));

    Ok(Json(coupon))
}

/// DELETE /api/coupons/{code} (soft delete)
pub async fn delete(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = CouponRepository::new(state.pool());
    if !repo.deactivate(&code).await? {
        return Err(coupon_not_found(&code));
    }

    let coupon = repo.find_by_code(&code).await?;
    if let Some(coupon) = &coupon {
        tracing::info!(code = %coupon.code, "Coupon deactivated");
        state.broadcast_sync(resource::COUPON, "updated", &coupon.code, Some(coupon));
    }

    Ok(Json(true))
}

/// POST /api/coupons/validate
///
/// Read-only: redemption is counted when a campaign is submitted.
pub async fn validate(
    State(state): State<ServerState>,
    Json(payload): Json<CouponValidateRequest>,
) -> AppResult<Json<Coupon>> {
    let repo = CouponRepository::new(state.pool());
    let coupon = validate_coupon(&payload.code, &repo).await?;
    Ok(Json(coupon))
}

fn coupon_not_found(code: &str) -> AppError {
    AppError::new(ErrorCode::CouponNotFound).with_detail("code", code)
}
