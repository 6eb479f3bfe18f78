use serde::Serialize;

use crate::models::Asset;

/// Output of the performance engine for a single asset.
///
/// All figures are in the asset's pricing unit (INR for everything this
/// backend tracks); no currency conversion happens here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AssetPerformance {
    pub holding_quantity: f64,
    pub avg_buy_price: f64,
    pub total_invested: f64,
    pub current_value: f64,
    pub unrealized_pnl: f64,
    pub realized_pnl: f64,
    pub total_pnl: f64,
}

impl AssetPerformance {
    pub fn zero() -> Self {
        Self {
            holding_quantity: 0.0,
            avg_buy_price: 0.0,
            total_invested: 0.0,
            current_value: 0.0,
            unrealized_pnl: 0.0,
            realized_pnl: 0.0,
            total_pnl: 0.0,
        }
    }
}

/// Asset enriched with derived figures, as served by `GET /api/assets`.
#[derive(Debug, Clone, Serialize)]
pub struct AssetOverview {
    #[serde(flatten)]
    pub asset: Asset,
    pub current_price: f64,
    pub performance: AssetPerformance,
    pub day_change_inr: f64,
    pub day_change_pct: f64,
}
