use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "txn_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TxnType {
    Buy,
    Sell,
}

// A buy or sell against one asset. Immutable once created, except deletion.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transaction {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub user_id: Uuid,
    pub txn_type: TxnType,
    pub quantity: f64,
    pub price_per_unit: f64,
    pub fees: f64,
    pub txn_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(user_id: Uuid, asset_id: Uuid, input: CreateTransaction) -> Self {
        Self {
            id: Uuid::new_v4(),
            asset_id,
            user_id,
            txn_type: input.txn_type,
            quantity: input.quantity,
            price_per_unit: input.price_per_unit,
            fees: input.fees,
            txn_date: input.txn_date.unwrap_or_else(Utc::now),
            notes: input.notes,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTransaction {
    pub txn_type: TxnType,
    pub quantity: f64,
    pub price_per_unit: f64,
    #[serde(default)]
    pub fees: f64,
    pub txn_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}
