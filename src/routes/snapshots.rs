use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info};

use crate::db;
use crate::errors::AppError;
use crate::models::PortfolioSnapshot;
use crate::routes::CurrentUser;
use crate::services::snapshot_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_snapshots))
        .route("/refresh", post(refresh_snapshots))
        .route("/reset", delete(reset_snapshots))
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    /// How many days of history to return; defaults to a year.
    pub days: Option<i32>,
}

pub async fn list_snapshots(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<PortfolioSnapshot>>, AppError> {
    let days = params.days.unwrap_or(365).max(1);
    info!("GET /api/snapshots - Fetching {} day(s) of history", days);

    let snapshots = db::snapshot_queries::fetch_recent(&state.pool, user_id, days)
        .await
        .map_err(|e| {
            error!("Failed to fetch snapshots: {}", e);
            AppError::Db(e)
        })?;

    Ok(Json(snapshots))
}

/// Manual trigger. The handler reports its own success; the snapshot and
/// backfill work underneath is best-effort and logs its own failures.
pub async fn refresh_snapshots(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<StatusCode, AppError> {
    info!("POST /api/snapshots/refresh - Manual snapshot refresh");

    snapshot_service::create_daily_snapshot(&state.pool, &state.price_cache, user_id).await;

    Ok(StatusCode::ACCEPTED)
}

pub async fn reset_snapshots(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<StatusCode, AppError> {
    info!("DELETE /api/snapshots/reset - Bulk snapshot reset");

    let deleted = db::snapshot_queries::delete_all(&state.pool, user_id)
        .await
        .map_err(|e| {
            error!("Failed to reset snapshots: {}", e);
            AppError::Db(e)
        })?;

    info!("Deleted {} snapshot row(s)", deleted);
    Ok(StatusCode::NO_CONTENT)
}
