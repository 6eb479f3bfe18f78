use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Transaction;

pub async fn fetch_by_asset(
    pool: &PgPool,
    user_id: Uuid,
    asset_id: Uuid,
) -> Result<Vec<Transaction>, sqlx::Error> {
    sqlx::query_as::<_, Transaction>(
        "SELECT id, asset_id, user_id, txn_type, quantity, price_per_unit, fees,
                txn_date, notes, created_at
         FROM transactions
         WHERE user_id = $1 AND asset_id = $2
         ORDER BY txn_date DESC",
    )
    .bind(user_id)
    .bind(asset_id)
    .fetch_all(pool)
    .await
}

// Insertion order (created_at) is the tiebreak the engine's stable sort
// relies on for same-date transactions.
pub async fn fetch_all_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<Transaction>, sqlx::Error> {
    sqlx::query_as::<_, Transaction>(
        "SELECT id, asset_id, user_id, txn_type, quantity, price_per_unit, fees,
                txn_date, notes, created_at
         FROM transactions
         WHERE user_id = $1
         ORDER BY created_at",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn insert(pool: &PgPool, txn: Transaction) -> Result<Transaction, sqlx::Error> {
    sqlx::query_as::<_, Transaction>(
        "INSERT INTO transactions
         (id, asset_id, user_id, txn_type, quantity, price_per_unit, fees,
          txn_date, notes, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
         RETURNING id, asset_id, user_id, txn_type, quantity, price_per_unit, fees,
                   txn_date, notes, created_at",
    )
    .bind(txn.id)
    .bind(txn.asset_id)
    .bind(txn.user_id)
    .bind(txn.txn_type)
    .bind(txn.quantity)
    .bind(txn.price_per_unit)
    .bind(txn.fees)
    .bind(txn.txn_date)
    .bind(&txn.notes)
    .bind(txn.created_at)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM transactions WHERE user_id = $1 AND id = $2")
        .bind(user_id)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn earliest_txn_date(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<DateTime<Utc>>, sqlx::Error> {
    sqlx::query_scalar::<_, Option<DateTime<Utc>>>(
        "SELECT MIN(txn_date) FROM transactions WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Users that have at least one transaction, for the daily snapshot job.
pub async fn distinct_user_ids(pool: &PgPool) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>(
        "SELECT DISTINCT user_id FROM transactions ORDER BY user_id",
    )
    .fetch_all(pool)
    .await
}
