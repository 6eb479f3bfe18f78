use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::{CreateTransaction, Transaction};
use crate::services::pricing::PriceCache;
use crate::services::snapshot_service;

pub async fn list_for_asset(
    pool: &PgPool,
    user_id: Uuid,
    asset_id: Uuid,
) -> Result<Vec<Transaction>, AppError> {
    db::asset_queries::fetch_one(pool, user_id, asset_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", asset_id)))?;

    Ok(db::transaction_queries::fetch_by_asset(pool, user_id, asset_id).await?)
}

/// Record a buy or sell and kick off a background snapshot recompute.
/// Overselling is not rejected here; the ledger invariant is the user's to
/// keep, matching long-standing behavior.
pub async fn create(
    pool: &PgPool,
    cache: &PriceCache,
    user_id: Uuid,
    asset_id: Uuid,
    input: CreateTransaction,
) -> Result<Transaction, AppError> {
    if input.quantity <= 0.0 {
        return Err(AppError::Validation("Quantity must be positive".into()));
    }
    if input.price_per_unit < 0.0 {
        return Err(AppError::Validation("Price cannot be negative".into()));
    }
    if input.fees < 0.0 {
        return Err(AppError::Validation("Fees cannot be negative".into()));
    }

    db::asset_queries::fetch_one(pool, user_id, asset_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", asset_id)))?;

    let txn =
        db::transaction_queries::insert(pool, Transaction::new(user_id, asset_id, input)).await?;

    spawn_snapshot_recompute(pool, cache, user_id);
    Ok(txn)
}

pub async fn delete(
    pool: &PgPool,
    cache: &PriceCache,
    user_id: Uuid,
    id: Uuid,
) -> Result<(), AppError> {
    match db::transaction_queries::delete(pool, user_id, id).await? {
        0 => Err(AppError::NotFound(format!("Transaction {} not found", id))),
        _ => {
            spawn_snapshot_recompute(pool, cache, user_id);
            Ok(())
        }
    }
}

// Fire-and-forget: the mutation already succeeded, snapshot maintenance is
// best-effort and logs its own failures.
fn spawn_snapshot_recompute(pool: &PgPool, cache: &PriceCache, user_id: Uuid) {
    let pool = pool.clone();
    let cache = cache.clone();
    debug!("Scheduling snapshot recompute for user {}", user_id);
    tokio::spawn(async move {
        snapshot_service::create_daily_snapshot(&pool, &cache, user_id).await;
    });
}
