use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Category of a tracked asset. Determines how its price is resolved:
/// CASH is fixed at 1, GOLD/SILVER use manual prices, everything else
/// goes through the market-data providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "asset_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    Crypto,
    Stock,
    MutualFund,
    Gold,
    Silver,
    Cash,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Crypto => "CRYPTO",
            AssetType::Stock => "STOCK",
            AssetType::MutualFund => "MUTUAL_FUND",
            AssetType::Gold => "GOLD",
            AssetType::Silver => "SILVER",
            AssetType::Cash => "CASH",
        }
    }

    /// Types whose price comes from an external quote source.
    pub fn is_quoted(&self) -> bool {
        matches!(
            self,
            AssetType::Crypto | AssetType::Stock | AssetType::MutualFund
        )
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// A holding owned by a user (e.g., "Bitcoin on CoinDCX"). `quantity` and
// `invested_amount` are the values entered at creation time and are kept for
// display only; authoritative figures are derived from transactions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Asset {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub asset_type: AssetType,
    pub symbol: Option<String>,
    pub platform: String,
    pub manual_price: Option<f64>,
    pub quantity: f64,
    pub invested_amount: f64,
    pub created_at: DateTime<Utc>,
}

impl Asset {
    pub fn new(user_id: Uuid, input: CreateAsset) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: input.name,
            asset_type: input.asset_type,
            symbol: input.symbol.map(|s| s.trim().to_string()),
            platform: input.platform,
            manual_price: input.manual_price,
            quantity: input.quantity,
            invested_amount: input.invested_amount,
            created_at: Utc::now(),
        }
    }

    /// Key into the price cache ("TYPE:SYMBOL"). None when the asset has no
    /// symbol to quote.
    pub fn cache_key(&self) -> Option<String> {
        self.symbol
            .as_ref()
            .filter(|s| !s.is_empty())
            .map(|s| format!("{}:{}", self.asset_type.as_str(), s.to_uppercase()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAsset {
    pub name: String,
    pub asset_type: AssetType,
    pub symbol: Option<String>,
    #[serde(default)]
    pub platform: String,
    pub manual_price: Option<f64>,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub invested_amount: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAsset {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub platform: Option<String>,
    pub manual_price: Option<f64>,
}
