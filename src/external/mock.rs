use async_trait::async_trait;

use crate::external::quote_provider::{Quote, QuoteProvider, QuoteProviderError};
use crate::models::AssetType;

/// Random-walk quotes for local development (`PRICE_PROVIDER=mock`).
/// The base price is derived from the symbol so repeated fetches stay in
/// the same ballpark.
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn base_price(symbol: &str) -> f64 {
    let seed: u32 = symbol.bytes().map(u32::from).sum();
    100.0 + f64::from(seed % 5000)
}

#[async_trait]
impl QuoteProvider for MockProvider {
    async fn fetch_quote(
        &self,
        asset_type: AssetType,
        symbol: &str,
    ) -> Result<Quote, QuoteProviderError> {
        if !asset_type.is_quoted() {
            return Err(QuoteProviderError::Unsupported(asset_type));
        }

        let base = base_price(symbol);
        let price = base * (1.0 + (rand::random::<f64>() - 0.5) * 0.04);
        let previous = base * (1.0 + (rand::random::<f64>() - 0.5) * 0.04);

        Ok(Quote {
            price_inr: price,
            previous_close: Some(previous),
        })
    }
}
