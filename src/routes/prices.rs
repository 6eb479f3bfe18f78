use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::models::PriceCacheEntry;
use crate::routes::CurrentUser;
use crate::services::pricing::{self, RefreshSummary};
use crate::state::AppState;
use crate::db;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_prices))
        .route("/refresh", post(refresh_prices))
}

pub async fn list_prices(
    State(state): State<AppState>,
    CurrentUser(_user_id): CurrentUser,
) -> Result<Json<Vec<PriceCacheEntry>>, AppError> {
    info!("GET /api/prices - Listing price cache");

    let entries = db::price_queries::fetch_all(&state.pool).await.map_err(|e| {
        error!("Failed to list price cache: {}", e);
        AppError::Db(e)
    })?;

    Ok(Json(entries))
}

#[derive(Debug, Deserialize)]
pub struct RefreshParams {
    #[serde(default)]
    pub force: bool,
}

pub async fn refresh_prices(
    State(state): State<AppState>,
    CurrentUser(_user_id): CurrentUser,
    Query(params): Query<RefreshParams>,
) -> Result<Json<RefreshSummary>, AppError> {
    info!("POST /api/prices/refresh - Refreshing quotes (force: {})", params.force);

    let summary = pricing::refresh_prices(
        &state.pool,
        &state.price_cache,
        state.quotes.as_ref(),
        params.force,
    )
    .await
    .map_err(|e| {
        match &e {
            AppError::RateLimited => warn!("Rate limited during price refresh"),
            _ => error!("Price refresh failed: {}", e),
        }
        e
    })?;

    Ok(Json(summary))
}
