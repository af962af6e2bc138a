//! Banner route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use enzobay_core::{Banner, BannerId, BannerPosition};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters for banners by slot.
#[derive(Debug, Deserialize)]
pub struct PositionQuery {
    pub position: BannerPosition,
}

/// Live banners for a slot, minus the ones this visitor dismissed.
#[instrument(skip(state))]
pub async fn by_position(
    State(state): State<AppState>,
    Query(query): Query<PositionQuery>,
) -> Json<Vec<Banner>> {
    let banners = state.banners().get_banners_by_position(query.position).await;
    Json(state.closed_banners().visible(banners))
}

/// Every banner, including inactive and out-of-window ones.
pub async fn all(State(state): State<AppState>) -> Json<Vec<Banner>> {
    Json(state.banners().get_all_banners().await)
}

#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Banner>> {
    let id = BannerId::new(id);
    state
        .banners()
        .get_banner_by_id(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("banner {id}")))
}

/// Dismiss a banner for the rest of the session.
#[instrument(skip(state))]
pub async fn dismiss(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    let id = BannerId::new(id);
    if state.banners().get_banner_by_id(&id).await.is_none() {
        return Err(AppError::NotFound(format!("banner {id}")));
    }
    state.closed_banners().dismiss(id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reset_dismissed(State(state): State<AppState>) -> StatusCode {
    state.closed_banners().reset();
    StatusCode::NO_CONTENT
}
