use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Persisted row of the price cache, keyed by "TYPE:SYMBOL".
// `previous_price` only moves forward when a fresh quote is fetched;
// serving a cached value never touches it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PriceCacheEntry {
    pub cache_key: String,
    pub current_price: f64,
    pub previous_price: Option<f64>,
    pub updated_at: DateTime<Utc>,
}

/// Current/previous pair as seen by valuation callers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePair {
    pub current: f64,
    pub previous: Option<f64>,
}
