use async_trait::async_trait;

use crate::external::quote_provider::{Quote, QuoteProvider, QuoteProviderError};
use crate::models::AssetType;

/// Indian mutual-fund NAVs from the AMFI daily feed. The asset's symbol is
/// the AMFI scheme code (e.g., "120503").
///
/// The feed is one big semicolon-separated text file:
/// `code;ISIN payout;ISIN reinvest;scheme name;NAV;date`
pub struct AmfiProvider {
    client: reqwest::Client,
    base_url: String,
}

impl AmfiProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: "https://www.amfiindia.com".to_string(),
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

impl Default for AmfiProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_nav_line(line: &str, scheme_code: &str) -> Option<f64> {
    let mut fields = line.split(';');
    if fields.next()?.trim() != scheme_code {
        return None;
    }
    line.split(';').nth(4)?.trim().parse::<f64>().ok()
}

#[async_trait]
impl QuoteProvider for AmfiProvider {
    async fn fetch_quote(
        &self,
        _asset_type: AssetType,
        symbol: &str,
    ) -> Result<Quote, QuoteProviderError> {
        let url = format!("{}/spages/NAVAll.txt", self.base_url);

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| QuoteProviderError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(QuoteProviderError::RateLimited);
        }

        let body = resp
            .text()
            .await
            .map_err(|e| QuoteProviderError::Parse(e.to_string()))?;

        let scheme_code = symbol.trim();
        body.lines()
            .find_map(|line| parse_nav_line(line, scheme_code))
            .map(|nav| Quote {
                price_inr: nav,
                previous_close: None,
            })
            .ok_or_else(|| QuoteProviderError::NotFound(scheme_code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = "\
Scheme Code;ISIN Div Payout/ ISIN Growth;ISIN Div Reinvestment;Scheme Name;Net Asset Value;Date
Open Ended Schemes(Equity Scheme - Large Cap Fund)
120503;INF846K01EW2;INF846K01EX0;Axis Bluechip Fund - Direct Plan - Growth;58.37;28-Aug-2026
119551;INF209KB18E2;-;Aditya Birla Frontline Equity - Growth;512.10;28-Aug-2026";

    #[test]
    fn parses_nav_for_matching_scheme_code() {
        let nav = FEED
            .lines()
            .find_map(|line| parse_nav_line(line, "120503"));
        assert_eq!(nav, Some(58.37));
    }

    #[test]
    fn skips_headers_and_unmatched_codes() {
        let nav = FEED
            .lines()
            .find_map(|line| parse_nav_line(line, "999999"));
        assert_eq!(nav, None);
    }
}
