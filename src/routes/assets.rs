use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Asset, AssetOverview, CreateAsset, UpdateAsset};
use crate::routes::CurrentUser;
use crate::services::asset_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_assets).post(create_asset))
        .route(
            "/:asset_id",
            axum::routing::put(update_asset).delete(delete_asset),
        )
}

pub async fn list_assets(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<AssetOverview>>, AppError> {
    info!("GET /api/assets - Listing assets with performance");

    let assets = asset_service::overview(&state.pool, &state.price_cache, user_id)
        .await
        .map_err(|e| {
            error!("Failed to list assets: {}", e);
            e
        })?;

    Ok(Json(assets))
}

pub async fn create_asset(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(input): Json<CreateAsset>,
) -> Result<(StatusCode, Json<Asset>), AppError> {
    info!("POST /api/assets - Creating asset '{}'", input.name);

    let asset = asset_service::create(&state.pool, user_id, input)
        .await
        .map_err(|e| {
            error!("Failed to create asset: {}", e);
            e
        })?;

    Ok((StatusCode::CREATED, Json(asset)))
}

pub async fn update_asset(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateAsset>,
) -> Result<Json<Asset>, AppError> {
    info!("PUT /api/assets/{} - Updating asset", id);

    let asset = asset_service::update(&state.pool, user_id, id, input)
        .await
        .map_err(|e| {
            error!("Failed to update asset {}: {}", id, e);
            e
        })?;

    Ok(Json(asset))
}

pub async fn delete_asset(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    info!("DELETE /api/assets/{} - Deleting asset", id);

    asset_service::delete(&state.pool, user_id, id)
        .await
        .map_err(|e| {
            error!("Failed to delete asset {}: {}", id, e);
            e
        })?;

    Ok(StatusCode::NO_CONTENT)
}
