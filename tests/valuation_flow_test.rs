//! End-to-end valuation flow without a database: price resolution feeding
//! the performance engine feeding per-day portfolio totals.

use std::collections::HashMap;

use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use nivesh_backend::models::{
    Asset, AssetType, CreateAsset, CreateTransaction, PricePair, Transaction, TxnType,
};
use nivesh_backend::services::performance::compute_performance;
use nivesh_backend::services::pricing::resolve_price;
use nivesh_backend::services::snapshot_service::totals_for_day;

fn asset(
    user_id: Uuid,
    name: &str,
    asset_type: AssetType,
    symbol: Option<&str>,
    manual_price: Option<f64>,
) -> Asset {
    Asset::new(
        user_id,
        CreateAsset {
            name: name.into(),
            asset_type,
            symbol: symbol.map(String::from),
            platform: "Zerodha".into(),
            manual_price,
            quantity: 0.0,
            invested_amount: 0.0,
        },
    )
}

fn txn(
    asset: &Asset,
    txn_type: TxnType,
    quantity: f64,
    price: f64,
    day: u32,
) -> Transaction {
    Transaction::new(
        asset.user_id,
        asset.id,
        CreateTransaction {
            txn_type,
            quantity,
            price_per_unit: price,
            fees: 0.0,
            txn_date: Some(Utc.with_ymd_and_hms(2026, 8, day, 10, 0, 0).unwrap()),
            notes: None,
        },
    )
}

#[test]
fn silver_manual_price_flows_through_the_engine_per_gram() {
    let user = Uuid::new_v4();
    // Manual price is per kilogram; holdings are grams
    let silver = asset(user, "Silver coins", AssetType::Silver, None, Some(90_000.0));

    let price = resolve_price(&silver, &HashMap::new());
    assert_eq!(price, 90.0);

    // 200 g bought at ₹75/g
    let perf = compute_performance(&[txn(&silver, TxnType::Buy, 200.0, 75.0, 1)], price);
    assert_eq!(perf.current_value, 18_000.0);
    assert_eq!(perf.total_invested, 15_000.0);
    assert_eq!(perf.unrealized_pnl, 3_000.0);
}

#[test]
fn portfolio_totals_combine_policy_and_engine_across_assets() {
    let user = Uuid::new_v4();
    let cash = asset(user, "Savings", AssetType::Cash, None, None);
    let btc = asset(user, "Bitcoin", AssetType::Crypto, Some("bitcoin"), None);
    let unquoted = asset(user, "Unlisted fund", AssetType::MutualFund, Some("999999"), None);

    let assets = vec![
        (cash.clone(), vec![txn(&cash, TxnType::Buy, 50_000.0, 1.0, 1)]),
        (btc.clone(), vec![txn(&btc, TxnType::Buy, 0.1, 4_000_000.0, 2)]),
        (
            unquoted.clone(),
            vec![txn(&unquoted, TxnType::Buy, 100.0, 25.0, 3)],
        ),
    ];

    let prices: HashMap<String, PricePair> = [(
        "CRYPTO:BITCOIN".to_string(),
        PricePair {
            current: 5_000_000.0,
            previous: Some(4_800_000.0),
        },
    )]
    .into();

    let today = NaiveDate::from_ymd_opt(2026, 8, 10).unwrap();
    let totals = totals_for_day(&assets, &prices, today);

    // Cash at par, bitcoin at the cached quote, the unquoted fund at zero
    assert_eq!(totals.net_worth, 50_000.0 + 0.1 * 5_000_000.0);
    assert_eq!(totals.invested, 50_000.0 + 0.1 * 4_000_000.0 + 100.0 * 25.0);
}

#[test]
fn backfill_walk_matches_per_day_recomputation() {
    let user = Uuid::new_v4();
    let stock = asset(user, "Infosys", AssetType::Stock, Some("INFY.NS"), None);
    let assets = vec![(
        stock.clone(),
        vec![
            txn(&stock, TxnType::Buy, 10.0, 1500.0, 2),
            txn(&stock, TxnType::Sell, 4.0, 1600.0, 4),
        ],
    )];
    let prices: HashMap<String, PricePair> = [(
        "STOCK:INFY.NS".to_string(),
        PricePair {
            current: 1550.0,
            previous: None,
        },
    )]
    .into();

    let day = |d| NaiveDate::from_ymd_opt(2026, 8, d).unwrap();

    // Day 1: nothing qualifies yet
    assert_eq!(totals_for_day(&assets, &prices, day(1)).net_worth, 0.0);

    // Days 2-3: only the buy
    let d2 = totals_for_day(&assets, &prices, day(2));
    assert_eq!(d2.net_worth, 10.0 * 1550.0);
    assert_eq!(d2.invested, 10.0 * 1500.0);
    assert_eq!(totals_for_day(&assets, &prices, day(3)), d2);

    // Day 4 onward: the sell shrinks the holding
    let d4 = totals_for_day(&assets, &prices, day(4));
    assert_eq!(d4.net_worth, 6.0 * 1550.0);
    assert_eq!(d4.invested, 6.0 * 1500.0);

    // Identical inputs give identical rows on a second pass
    assert_eq!(totals_for_day(&assets, &prices, day(4)), d4);
}

#[test]
fn gold_lots_blend_into_one_average_cost() {
    let user = Uuid::new_v4();
    let gold = asset(user, "Gold ETF stash", AssetType::Gold, None, Some(7_200.0));
    let assets = vec![(
        gold.clone(),
        vec![
            txn(&gold, TxnType::Buy, 15.0, 6_100.0, 1),
            txn(&gold, TxnType::Buy, 5.0, 6_800.0, 3),
        ],
    )];

    // Day 1: only the first lot, valued at the manual price
    let d1 = totals_for_day(&assets, &HashMap::new(), NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
    assert_eq!(d1.net_worth, 15.0 * 7_200.0);
    assert_eq!(d1.invested, 15.0 * 6_100.0);

    // Day 3 onward: both lots, average cost blends the two buys
    let d3 = totals_for_day(&assets, &HashMap::new(), NaiveDate::from_ymd_opt(2026, 8, 3).unwrap());
    assert_eq!(d3.net_worth, 20.0 * 7_200.0);
    assert_eq!(d3.invested, 15.0 * 6_100.0 + 5.0 * 6_800.0);
}
