use async_trait::async_trait;
use thiserror::Error;

use crate::models::AssetType;

/// A spot quote in INR. `previous_close` feeds the day-change figures and
/// may be missing for sources that only publish a single value.
#[derive(Debug, Clone, Copy)]
pub struct Quote {
    pub price_inr: f64,
    pub previous_close: Option<f64>,
}

#[derive(Debug, Error)]
pub enum QuoteProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("rate limited")]
    RateLimited,

    #[error("symbol not found: {0}")]
    NotFound(String),

    #[error("no quote source for asset type {0}")]
    Unsupported(AssetType),
}

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn fetch_quote(
        &self,
        asset_type: AssetType,
        symbol: &str,
    ) -> Result<Quote, QuoteProviderError>;
}
