use sqlx::PgPool;

use crate::models::PriceCacheEntry;

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<PriceCacheEntry>, sqlx::Error> {
    sqlx::query_as::<_, PriceCacheEntry>(
        "SELECT cache_key, current_price, previous_price, updated_at
         FROM price_cache
         ORDER BY cache_key",
    )
    .fetch_all(pool)
    .await
}

pub async fn fetch_one(
    pool: &PgPool,
    cache_key: &str,
) -> Result<Option<PriceCacheEntry>, sqlx::Error> {
    sqlx::query_as::<_, PriceCacheEntry>(
        "SELECT cache_key, current_price, previous_price, updated_at
         FROM price_cache
         WHERE cache_key = $1",
    )
    .bind(cache_key)
    .fetch_optional(pool)
    .await
}

// The caller decides what `previous_price` becomes; the shift-forward rule
// (only on a fresh fetch) lives in the pricing service.
pub async fn upsert(
    pool: &PgPool,
    cache_key: &str,
    current_price: f64,
    previous_price: Option<f64>,
) -> Result<PriceCacheEntry, sqlx::Error> {
    sqlx::query_as::<_, PriceCacheEntry>(
        "INSERT INTO price_cache (cache_key, current_price, previous_price, updated_at)
         VALUES ($1, $2, $3, now())
         ON CONFLICT (cache_key)
         DO UPDATE SET current_price = EXCLUDED.current_price,
                       previous_price = EXCLUDED.previous_price,
                       updated_at = now()
         RETURNING cache_key, current_price, previous_price, updated_at",
    )
    .bind(cache_key)
    .bind(current_price)
    .bind(previous_price)
    .fetch_one(pool)
    .await
}
