//! Campaign API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::message::resource;
use shared::models::{Campaign, CampaignStatusUpdate};

use crate::core::ServerState;
use crate::services::CampaignService;
use crate::utils::AppResult;

/// GET /api/campaigns/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Campaign>> {
    let service = CampaignService::new(state.pool());
    Ok(Json(service.get(id).await?))
}

/// PUT /api/campaigns/{id}/status
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CampaignStatusUpdate>,
) -> AppResult<Json<Campaign>> {
    let service = CampaignService::new(state.pool());
    let campaign = service.change_status(id, payload.status).await?;

    state.broadcast_sync(resource::CAMPAIGN, "updated", &id.to_string(), Some(&campaign));

    Ok(Json(campaign))
}
