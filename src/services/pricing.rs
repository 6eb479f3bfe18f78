use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::db;
use crate::errors::AppError;
use crate::external::quote_provider::{Quote, QuoteProvider, QuoteProviderError};
use crate::models::{Asset, AssetType, PricePair};

/// Equities go stale fast during market hours; everything else is fine on a
/// five minute cycle.
const EQUITY_TTL_SECS: i64 = 60;
const GENERIC_TTL_SECS: i64 = 300;

#[derive(Debug, Clone)]
pub struct CachedQuote {
    pub current: f64,
    pub previous: Option<f64>,
    pub fetched_at: DateTime<Utc>,
}

/// In-memory price cache keyed by "TYPE:SYMBOL", with TTL metadata.
///
/// Constructed once at startup and handed to the refresh routine and the
/// valuation paths through `AppState`/`JobContext` — there is deliberately
/// no ambient global. The persisted `price_cache` table mirrors it so a
/// restart starts warm.
#[derive(Clone)]
pub struct PriceCache {
    entries: Arc<DashMap<String, CachedQuote>>,
}

impl PriceCache {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
        }
    }

    pub fn get(&self, key: &str) -> Option<CachedQuote> {
        self.entries.get(key).map(|e| e.value().clone())
    }

    pub fn insert(&self, key: &str, current: f64, previous: Option<f64>) {
        self.entries.insert(
            key.to_string(),
            CachedQuote {
                current,
                previous,
                fetched_at: Utc::now(),
            },
        );
    }

    #[cfg(test)]
    pub fn insert_fetched_at(
        &self,
        key: &str,
        current: f64,
        previous: Option<f64>,
        fetched_at: DateTime<Utc>,
    ) {
        self.entries.insert(
            key.to_string(),
            CachedQuote {
                current,
                previous,
                fetched_at,
            },
        );
    }

    pub fn ttl_for(asset_type: AssetType) -> i64 {
        match asset_type {
            AssetType::Stock => EQUITY_TTL_SECS,
            _ => GENERIC_TTL_SECS,
        }
    }

    pub fn is_fresh(&self, key: &str, asset_type: AssetType) -> bool {
        match self.get(key) {
            Some(entry) => {
                Utc::now() - entry.fetched_at < Duration::seconds(Self::ttl_for(asset_type))
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overlay this cache's entries onto a persisted map; in-memory values
    /// are at least as fresh as their database mirror.
    pub fn overlay(&self, map: &mut HashMap<String, PricePair>) {
        for entry in self.entries.iter() {
            map.insert(
                entry.key().clone(),
                PricePair {
                    current: entry.value().current,
                    previous: entry.value().previous,
                },
            );
        }
    }
}

impl Default for PriceCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Price-resolution policy, applied per asset on every valuation:
/// CASH is one rupee per rupee; metals with a manual price use it (silver's
/// manual price is per kilogram, holdings are in grams); everything else
/// looks up the cache and falls back to the manual price, then zero.
pub fn resolve_price(asset: &Asset, prices: &HashMap<String, PricePair>) -> f64 {
    match asset.asset_type {
        AssetType::Cash => 1.0,
        AssetType::Gold if asset.manual_price.is_some() => asset.manual_price.unwrap_or(0.0),
        AssetType::Silver if asset.manual_price.is_some() => {
            asset.manual_price.unwrap_or(0.0) / 1000.0
        }
        _ => asset
            .cache_key()
            .and_then(|key| prices.get(&key).map(|p| p.current))
            .or(asset.manual_price)
            .unwrap_or(0.0),
    }
}

/// Previous price under the same policy, used for day-change figures.
/// Manual and CASH prices have no previous value.
pub fn resolve_previous(asset: &Asset, prices: &HashMap<String, PricePair>) -> Option<f64> {
    if !asset.asset_type.is_quoted() {
        return None;
    }
    asset
        .cache_key()
        .and_then(|key| prices.get(&key).and_then(|p| p.previous))
}

/// The full "TYPE:SYMBOL" -> (current, previous) view valuation callers
/// consume: persisted rows first, overlaid with the in-memory cache.
pub async fn load_price_map(
    pool: &PgPool,
    cache: &PriceCache,
) -> Result<HashMap<String, PricePair>, AppError> {
    let rows = db::price_queries::fetch_all(pool).await?;

    let mut map: HashMap<String, PricePair> = rows
        .into_iter()
        .map(|r| {
            (
                r.cache_key,
                PricePair {
                    current: r.current_price,
                    previous: r.previous_price,
                },
            )
        })
        .collect();

    cache.overlay(&mut map);
    Ok(map)
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RefreshSummary {
    pub refreshed: u32,
    pub skipped: u32,
    pub failed: u32,
}

/// The previous price moves only on a successful fetch: the provider's own
/// previous close when it has one, otherwise the current value being
/// replaced. Skipped and failed symbols keep their stored pair untouched.
pub fn shifted_previous(quote: &Quote, prior_current: Option<f64>) -> Option<f64> {
    quote.previous_close.or(prior_current)
}

/// Refresh quotes for every distinct (type, symbol) pair any user holds.
///
/// Entries still inside their TTL are skipped unless `force` is set. A
/// failed fetch logs and leaves the last known value serving — upstream
/// trouble never reaches valuation callers. The one exception is a provider
/// rate limit: that aborts the whole cycle, since the remaining symbols
/// would only hammer an upstream that already said stop.
pub async fn refresh_prices(
    pool: &PgPool,
    cache: &PriceCache,
    provider: &dyn QuoteProvider,
    force: bool,
) -> Result<RefreshSummary, AppError> {
    let symbols = db::asset_queries::distinct_quoted_symbols(pool).await?;
    let mut summary = RefreshSummary::default();

    for (asset_type, symbol) in symbols {
        let key = format!("{}:{}", asset_type.as_str(), symbol.to_uppercase());

        if !force && cache.is_fresh(&key, asset_type) {
            summary.skipped += 1;
            continue;
        }

        match provider.fetch_quote(asset_type, &symbol).await {
            Ok(quote) => {
                let prior_current = match cache.get(&key) {
                    Some(entry) => Some(entry.current),
                    None => db::price_queries::fetch_one(pool, &key)
                        .await?
                        .map(|r| r.current_price),
                };
                let previous = shifted_previous(&quote, prior_current);

                db::price_queries::upsert(pool, &key, quote.price_inr, previous).await?;
                cache.insert(&key, quote.price_inr, previous);
                summary.refreshed += 1;
            }
            Err(QuoteProviderError::RateLimited) => {
                warn!("Provider rate limit hit at {}, aborting this refresh cycle", key);
                return Err(AppError::RateLimited);
            }
            Err(e) => {
                warn!("Quote fetch failed for {}, serving last known value: {}", key, e);
                summary.failed += 1;
            }
        }
    }

    info!(
        "Price refresh done: {} refreshed, {} skipped, {} failed",
        summary.refreshed, summary.skipped, summary.failed
    );
    Ok(summary)
}
