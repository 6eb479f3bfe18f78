use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::PortfolioSnapshot;

pub async fn fetch_recent(
    pool: &PgPool,
    user_id: Uuid,
    days: i32,
) -> Result<Vec<PortfolioSnapshot>, sqlx::Error> {
    sqlx::query_as::<_, PortfolioSnapshot>(
        "SELECT id, user_id, snapshot_date, net_worth_inr, invested_inr,
                profit_loss_inr, created_at, updated_at
         FROM portfolio_snapshots
         WHERE user_id = $1
           AND snapshot_date >= CURRENT_DATE - $2::int
         ORDER BY snapshot_date",
    )
    .bind(user_id)
    .bind(days)
    .fetch_all(pool)
    .await
}

// One row per (user, day); re-running a snapshot for the same day overwrites
// it rather than accumulating.
pub async fn upsert(
    pool: &PgPool,
    user_id: Uuid,
    snapshot_date: NaiveDate,
    net_worth_inr: f64,
    invested_inr: f64,
) -> Result<PortfolioSnapshot, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query_as::<_, PortfolioSnapshot>(
        "INSERT INTO portfolio_snapshots
         (id, user_id, snapshot_date, net_worth_inr, invested_inr, profit_loss_inr)
         VALUES ($1, $2, $3, $4, $5, $4 - $5)
         ON CONFLICT (user_id, snapshot_date)
         DO UPDATE SET net_worth_inr = EXCLUDED.net_worth_inr,
                       invested_inr = EXCLUDED.invested_inr,
                       profit_loss_inr = EXCLUDED.profit_loss_inr,
                       updated_at = now()
         RETURNING id, user_id, snapshot_date, net_worth_inr, invested_inr,
                   profit_loss_inr, created_at, updated_at",
    )
    .bind(id)
    .bind(user_id)
    .bind(snapshot_date)
    .bind(net_worth_inr)
    .bind(invested_inr)
    .fetch_one(pool)
    .await
}

/// Bulk reset of a user's snapshot history.
pub async fn delete_all(pool: &PgPool, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM portfolio_snapshots WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
