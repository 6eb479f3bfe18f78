use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::{Asset, PricePair, Transaction};
use crate::services::{asset_service, performance, pricing};
use crate::services::pricing::PriceCache;

/// Snapshot days roll at midnight IST, not UTC: an evening trade in India
/// lands on the calendar day the user made it.
const IST_OFFSET_MINUTES: i64 = 330;

pub fn local_day(ts: DateTime<Utc>) -> NaiveDate {
    (ts + Duration::minutes(IST_OFFSET_MINUTES)).date_naive()
}

fn today_local() -> NaiveDate {
    local_day(Utc::now())
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DayTotals {
    pub net_worth: f64,
    pub invested: f64,
}

/// Portfolio totals as of the end of `day`: each asset's transactions are
/// cut off at that calendar day, assets with no qualifying transactions yet
/// are left out entirely, and prices are whatever the cache says *today* —
/// there is no historical price series, so backfilled days carry current
/// prices. Pure, so backfill is recomputation and re-running it is
/// idempotent by construction.
pub fn totals_for_day(
    assets: &[(Asset, Vec<Transaction>)],
    prices: &HashMap<String, PricePair>,
    day: NaiveDate,
) -> DayTotals {
    let mut totals = DayTotals::default();

    for (asset, txns) in assets {
        let qualifying: Vec<Transaction> = txns
            .iter()
            .filter(|t| local_day(t.txn_date) <= day)
            .cloned()
            .collect();
        if qualifying.is_empty() {
            continue;
        }

        let price = pricing::resolve_price(asset, prices);
        let perf = performance::compute_performance(&qualifying, price);
        totals.net_worth += perf.current_value;
        totals.invested += perf.total_invested;
    }

    totals
}

/// Today's totals over every transaction, no date cutoff.
fn current_totals(
    assets: &[(Asset, Vec<Transaction>)],
    prices: &HashMap<String, PricePair>,
) -> DayTotals {
    let mut totals = DayTotals::default();

    for (asset, txns) in assets {
        let price = pricing::resolve_price(asset, prices);
        let perf = performance::compute_performance(txns, price);
        totals.net_worth += perf.current_value;
        totals.invested += perf.total_invested;
    }

    totals
}

/// Best-effort daily snapshot: backfills any gap first, then upserts today's
/// row. Errors are logged and swallowed — the next scheduled or triggered
/// run retries naturally, and each day's upsert is atomic on its own row.
pub async fn create_daily_snapshot(pool: &PgPool, cache: &PriceCache, user_id: Uuid) {
    if let Err(e) = try_create_daily_snapshot(pool, cache, user_id).await {
        error!("Daily snapshot failed for user {}: {}", user_id, e);
    }
}

pub async fn try_create_daily_snapshot(
    pool: &PgPool,
    cache: &PriceCache,
    user_id: Uuid,
) -> Result<(), AppError> {
    try_sync_missing_snapshots(pool, cache, user_id).await?;

    let assets = asset_service::fetch_with_transactions(pool, user_id).await?;
    let prices = pricing::load_price_map(pool, cache).await?;
    let totals = current_totals(&assets, &prices);

    let today = today_local();
    db::snapshot_queries::upsert(pool, user_id, today, totals.net_worth, totals.invested).await?;

    info!(
        "Snapshot for user {} on {}: net worth ₹{:.2}, invested ₹{:.2}",
        user_id, today, totals.net_worth, totals.invested
    );
    Ok(())
}

/// Best-effort wrapper over the backfill, same logging policy as
/// `create_daily_snapshot`.
pub async fn sync_missing_snapshots(pool: &PgPool, cache: &PriceCache, user_id: Uuid) {
    if let Err(e) = try_sync_missing_snapshots(pool, cache, user_id).await {
        error!("Snapshot backfill failed for user {}: {}", user_id, e);
    }
}

/// Walk every day from the user's earliest transaction to today inclusive
/// and upsert that day's totals. No transactions means nothing to do.
/// Sequential on purpose: this is a catch-up path, not a hot path.
pub async fn try_sync_missing_snapshots(
    pool: &PgPool,
    cache: &PriceCache,
    user_id: Uuid,
) -> Result<u32, AppError> {
    let Some(earliest) = db::transaction_queries::earliest_txn_date(pool, user_id).await? else {
        return Ok(0);
    };

    let assets = asset_service::fetch_with_transactions(pool, user_id).await?;
    let prices = pricing::load_price_map(pool, cache).await?;

    let today = today_local();
    let mut day = local_day(earliest);
    let mut written = 0u32;

    while day <= today {
        let totals = totals_for_day(&assets, &prices, day);
        db::snapshot_queries::upsert(pool, user_id, day, totals.net_worth, totals.invested)
            .await?;
        written += 1;

        day = day
            .succ_opt()
            .ok_or_else(|| AppError::Validation("date overflow during backfill".into()))?;
    }

    if written > 0 {
        info!("Backfilled {} snapshot day(s) for user {}", written, user_id);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssetType, CreateAsset, CreateTransaction, TxnType};
    use chrono::TimeZone;

    fn asset(asset_type: AssetType, symbol: Option<&str>, manual_price: Option<f64>) -> Asset {
        Asset::new(
            Uuid::new_v4(),
            CreateAsset {
                name: "test".into(),
                asset_type,
                symbol: symbol.map(String::from),
                platform: String::new(),
                manual_price,
                quantity: 0.0,
                invested_amount: 0.0,
            },
        )
    }

    fn buy(asset: &Asset, quantity: f64, price: f64, day: u32, hour: u32) -> Transaction {
        Transaction::new(
            asset.user_id,
            asset.id,
            CreateTransaction {
                txn_type: TxnType::Buy,
                quantity,
                price_per_unit: price,
                fees: 0.0,
                txn_date: Some(Utc.with_ymd_and_hms(2026, 8, day, hour, 0, 0).unwrap()),
                notes: None,
            },
        )
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    #[test]
    fn asset_is_excluded_until_its_first_transaction() {
        // Asset A trades on day 1, asset B only on day 2. Day 1 totals must
        // not see B at all; days 2 and 3 include both.
        let a = asset(AssetType::Cash, None, None);
        let b = asset(AssetType::Stock, Some("TCS.NS"), None);
        let assets = vec![
            (a.clone(), vec![buy(&a, 1000.0, 1.0, 1, 10)]),
            (b.clone(), vec![buy(&b, 2.0, 4000.0, 2, 11)]),
        ];
        let prices: HashMap<String, PricePair> = [(
            "STOCK:TCS.NS".to_string(),
            PricePair {
                current: 4200.0,
                previous: None,
            },
        )]
        .into();

        let d1 = totals_for_day(&assets, &prices, day(1));
        assert_eq!(d1.net_worth, 1000.0);
        assert_eq!(d1.invested, 1000.0);

        let d2 = totals_for_day(&assets, &prices, day(2));
        assert_eq!(d2.net_worth, 1000.0 + 2.0 * 4200.0);
        assert_eq!(d2.invested, 1000.0 + 2.0 * 4000.0);

        let d3 = totals_for_day(&assets, &prices, day(3));
        assert_eq!(d3, d2);
    }

    #[test]
    fn user_with_nothing_before_range_start_totals_zero() {
        let b = asset(AssetType::Stock, Some("TCS.NS"), None);
        let assets = vec![(b.clone(), vec![buy(&b, 2.0, 4000.0, 2, 11)])];

        let d1 = totals_for_day(&assets, &HashMap::new(), day(1));
        assert_eq!(d1, DayTotals::default());
    }

    #[test]
    fn same_day_transaction_counts_regardless_of_time() {
        // 18:00 UTC is 23:30 IST, still the same calendar day
        let a = asset(AssetType::Cash, None, None);
        let assets = vec![(a.clone(), vec![buy(&a, 500.0, 1.0, 5, 18)])];

        let totals = totals_for_day(&assets, &HashMap::new(), day(5));
        assert_eq!(totals.net_worth, 500.0);
    }

    #[test]
    fn late_utc_evening_trade_rolls_to_the_next_ist_day() {
        // 20:00 UTC on the 5th is already 01:30 IST on the 6th
        let a = asset(AssetType::Cash, None, None);
        let assets = vec![(a.clone(), vec![buy(&a, 500.0, 1.0, 5, 20)])];

        assert_eq!(totals_for_day(&assets, &HashMap::new(), day(5)), DayTotals::default());
        assert_eq!(totals_for_day(&assets, &HashMap::new(), day(6)).net_worth, 500.0);

        assert_eq!(
            local_day(Utc.with_ymd_and_hms(2026, 8, 5, 20, 0, 0).unwrap()),
            day(6)
        );
        assert_eq!(
            local_day(Utc.with_ymd_and_hms(2026, 8, 5, 18, 29, 59).unwrap()),
            day(5)
        );
    }

    #[test]
    fn recomputation_is_idempotent() {
        let a = asset(AssetType::Crypto, Some("bitcoin"), None);
        let assets = vec![(
            a.clone(),
            vec![buy(&a, 0.5, 3_000_000.0, 1, 9), buy(&a, 0.25, 3_500_000.0, 3, 9)],
        )];
        let prices: HashMap<String, PricePair> = [(
            "CRYPTO:BITCOIN".to_string(),
            PricePair {
                current: 4_000_000.0,
                previous: None,
            },
        )]
        .into();

        for d in 1..=4 {
            let first = totals_for_day(&assets, &prices, day(d));
            let second = totals_for_day(&assets, &prices, day(d));
            assert_eq!(first, second);
        }
    }
}
