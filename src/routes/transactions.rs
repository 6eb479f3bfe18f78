use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{CreateTransaction, Transaction};
use crate::routes::CurrentUser;
use crate::services::transaction_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/assets/:asset_id/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route("/transactions/:id", delete(delete_transaction))
}

pub async fn list_transactions(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(asset_id): Path<Uuid>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    info!("GET /api/assets/{}/transactions - Listing transactions", asset_id);

    let txns = transaction_service::list_for_asset(&state.pool, user_id, asset_id)
        .await
        .map_err(|e| {
            error!("Failed to list transactions for asset {}: {}", asset_id, e);
            e
        })?;

    Ok(Json(txns))
}

pub async fn create_transaction(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(asset_id): Path<Uuid>,
    Json(input): Json<CreateTransaction>,
) -> Result<(StatusCode, Json<Transaction>), AppError> {
    info!("POST /api/assets/{}/transactions - Recording transaction", asset_id);

    let txn = transaction_service::create(
        &state.pool,
        &state.price_cache,
        user_id,
        asset_id,
        input,
    )
    .await
    .map_err(|e| {
        error!("Failed to record transaction for asset {}: {}", asset_id, e);
        e
    })?;

    Ok((StatusCode::CREATED, Json(txn)))
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    info!("DELETE /api/transactions/{} - Deleting transaction", id);

    transaction_service::delete(&state.pool, &state.price_cache, user_id, id)
        .await
        .map_err(|e| {
            error!("Failed to delete transaction {}: {}", id, e);
            e
        })?;

    Ok(StatusCode::NO_CONTENT)
}
