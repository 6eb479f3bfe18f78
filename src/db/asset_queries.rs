use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Asset, AssetType, UpdateAsset};

pub async fn fetch_all(pool: &PgPool, user_id: Uuid) -> Result<Vec<Asset>, sqlx::Error> {
    sqlx::query_as::<_, Asset>(
        "SELECT id, user_id, name, asset_type, symbol, platform, manual_price,
                quantity, invested_amount, created_at
         FROM assets
         WHERE user_id = $1
         ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn fetch_one(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<Option<Asset>, sqlx::Error> {
    sqlx::query_as::<_, Asset>(
        "SELECT id, user_id, name, asset_type, symbol, platform, manual_price,
                quantity, invested_amount, created_at
         FROM assets
         WHERE user_id = $1 AND id = $2",
    )
    .bind(user_id)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn insert(pool: &PgPool, asset: Asset) -> Result<Asset, sqlx::Error> {
    sqlx::query_as::<_, Asset>(
        "INSERT INTO assets
         (id, user_id, name, asset_type, symbol, platform, manual_price,
          quantity, invested_amount, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
         RETURNING id, user_id, name, asset_type, symbol, platform, manual_price,
                   quantity, invested_amount, created_at",
    )
    .bind(asset.id)
    .bind(asset.user_id)
    .bind(&asset.name)
    .bind(asset.asset_type)
    .bind(&asset.symbol)
    .bind(&asset.platform)
    .bind(asset.manual_price)
    .bind(asset.quantity)
    .bind(asset.invested_amount)
    .bind(asset.created_at)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    input: UpdateAsset,
) -> Result<Option<Asset>, sqlx::Error> {
    sqlx::query_as::<_, Asset>(
        "UPDATE assets
         SET name = COALESCE($3, name),
             symbol = COALESCE($4, symbol),
             platform = COALESCE($5, platform),
             manual_price = COALESCE($6, manual_price)
         WHERE user_id = $1 AND id = $2
         RETURNING id, user_id, name, asset_type, symbol, platform, manual_price,
                   quantity, invested_amount, created_at",
    )
    .bind(user_id)
    .bind(id)
    .bind(input.name)
    .bind(input.symbol)
    .bind(input.platform)
    .bind(input.manual_price)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM assets WHERE user_id = $1 AND id = $2")
        .bind(user_id)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Distinct (type, symbol) pairs across all users that need a market quote.
pub async fn distinct_quoted_symbols(
    pool: &PgPool,
) -> Result<Vec<(AssetType, String)>, sqlx::Error> {
    sqlx::query_as::<_, (AssetType, String)>(
        "SELECT DISTINCT asset_type, symbol
         FROM assets
         WHERE symbol IS NOT NULL
           AND symbol <> ''
           AND asset_type IN ('CRYPTO', 'STOCK', 'MUTUAL_FUND')
         ORDER BY asset_type, symbol",
    )
    .fetch_all(pool)
    .await
}
