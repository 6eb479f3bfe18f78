use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// One row per user per calendar day. `profit_loss_inr` always equals
// `net_worth_inr - invested_inr` by construction.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PortfolioSnapshot {
    pub id: Uuid,
    pub user_id: Uuid,
    pub snapshot_date: NaiveDate,
    pub net_worth_inr: f64,
    pub invested_inr: f64,
    pub profit_loss_inr: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
