use std::collections::HashMap;

use async_trait::async_trait;

use crate::external::quote_provider::{Quote, QuoteProvider, QuoteProviderError};
use crate::models::AssetType;

/// Crypto spot prices in INR from the CoinGecko simple-price endpoint.
/// The asset's symbol field holds the CoinGecko id (e.g., "bitcoin").
pub struct CoinGeckoProvider {
    client: reqwest::Client,
    base_url: String,
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: "https://api.coingecko.com".to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteProvider for CoinGeckoProvider {
    async fn fetch_quote(
        &self,
        _asset_type: AssetType,
        symbol: &str,
    ) -> Result<Quote, QuoteProviderError> {
        let id = symbol.to_lowercase();
        let url = format!(
            "{}/api/v3/simple/price?ids={id}&vs_currencies=inr&include_24hr_change=true",
            self.base_url
        );

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| QuoteProviderError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(QuoteProviderError::RateLimited);
        }

        // {"bitcoin": {"inr": 5123456.0, "inr_24h_change": 1.8}}
        let body = resp
            .json::<HashMap<String, HashMap<String, f64>>>()
            .await
            .map_err(|e| QuoteProviderError::Parse(e.to_string()))?;

        let entry = body
            .get(&id)
            .ok_or_else(|| QuoteProviderError::NotFound(id.clone()))?;

        let price = *entry
            .get("inr")
            .ok_or_else(|| QuoteProviderError::BadResponse("missing inr price".into()))?;

        // Back out yesterday's close from the 24h change percentage.
        let previous_close = entry
            .get("inr_24h_change")
            .map(|chg| price / (1.0 + chg / 100.0));

        Ok(Quote {
            price_inr: price,
            previous_close,
        })
    }
}
