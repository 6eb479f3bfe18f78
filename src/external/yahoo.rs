use async_trait::async_trait;
use serde::Deserialize;

use crate::external::quote_provider::{Quote, QuoteProvider, QuoteProviderError};
use crate::models::AssetType;

/// Stock quotes from the Yahoo v8 chart endpoint. NSE listings use the
/// ".NS" suffix (e.g., "RELIANCE.NS"); Yahoo already serves those in INR.
pub struct YahooProvider {
    client: reqwest::Client,
    base_url: String,
}

impl YahooProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: "https://query1.finance.yahoo.com".to_string(),
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

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

// Minimal response structs (only what we need)
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    #[allow(dead_code)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
    #[serde(rename = "chartPreviousClose")]
    chart_previous_close: Option<f64>,
}

#[async_trait]
impl QuoteProvider for YahooProvider {
    async fn fetch_quote(
        &self,
        _asset_type: AssetType,
        symbol: &str,
    ) -> Result<Quote, QuoteProviderError> {
        let url = format!(
            "{}/v8/finance/chart/{symbol}?range=1d&interval=1d",
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
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(QuoteProviderError::NotFound(symbol.to_string()));
        }

        let body = resp
            .json::<ChartResponse>()
            .await
            .map_err(|e| QuoteProviderError::Parse(e.to_string()))?;

        let result = body
            .chart
            .result
            .and_then(|mut r| r.pop())
            .ok_or_else(|| QuoteProviderError::BadResponse("missing result".into()))?;

        let price = result
            .meta
            .regular_market_price
            .ok_or_else(|| QuoteProviderError::BadResponse("missing market price".into()))?;

        Ok(Quote {
            price_inr: price,
            previous_close: result.meta.chart_previous_close,
        })
    }
}
