use async_trait::async_trait;

use crate::external::amfi::AmfiProvider;
use crate::external::coingecko::CoinGeckoProvider;
use crate::external::quote_provider::{Quote, QuoteProvider, QuoteProviderError};
use crate::external::yahoo::YahooProvider;
use crate::models::AssetType;

/// Dispatches quote requests to the right upstream per asset type.
/// CASH and the metals never reach a provider; the pricing policy handles
/// them before any fetch.
pub struct MarketDataRouter {
    crypto: Box<dyn QuoteProvider>,
    stocks: Box<dyn QuoteProvider>,
    funds: Box<dyn QuoteProvider>,
}

impl MarketDataRouter {
    pub fn new() -> Self {
        Self {
            crypto: Box::new(CoinGeckoProvider::new()),
            stocks: Box::new(YahooProvider::new()),
            funds: Box::new(AmfiProvider::new()),
        }
    }

    pub fn with_providers(
        crypto: Box<dyn QuoteProvider>,
        stocks: Box<dyn QuoteProvider>,
        funds: Box<dyn QuoteProvider>,
    ) -> Self {
        Self {
            crypto,
            stocks,
            funds,
        }
    }
}

impl Default for MarketDataRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteProvider for MarketDataRouter {
    async fn fetch_quote(
        &self,
        asset_type: AssetType,
        symbol: &str,
    ) -> Result<Quote, QuoteProviderError> {
        match asset_type {
            AssetType::Crypto => self.crypto.fetch_quote(asset_type, symbol).await,
            AssetType::Stock => self.stocks.fetch_quote(asset_type, symbol).await,
            AssetType::MutualFund => self.funds.fetch_quote(asset_type, symbol).await,
            other => Err(QuoteProviderError::Unsupported(other)),
        }
    }
}
