use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::{
    Asset, AssetOverview, CreateAsset, CreateTransaction, Transaction, TxnType, UpdateAsset,
};
use crate::services::pricing::PriceCache;
use crate::services::{performance, pricing};

/// Create an asset. A non-zero starting quantity also synthesizes the
/// opening BUY so the derived figures match what the user typed in; the
/// stored quantity/invested_amount stay as display-only legacy fields.
pub async fn create(pool: &PgPool, user_id: Uuid, input: CreateAsset) -> Result<Asset, AppError> {
    if input.name.trim().is_empty() {
        return Err(AppError::Validation("Asset name cannot be empty".into()));
    }
    if input.quantity < 0.0 {
        return Err(AppError::Validation("Quantity cannot be negative".into()));
    }
    if input.invested_amount < 0.0 {
        return Err(AppError::Validation(
            "Invested amount cannot be negative".into(),
        ));
    }

    let quantity = input.quantity;
    let invested_amount = input.invested_amount;

    let asset = db::asset_queries::insert(pool, Asset::new(user_id, input)).await?;

    if quantity > 0.0 {
        let opening_buy = Transaction::new(
            user_id,
            asset.id,
            CreateTransaction {
                txn_type: TxnType::Buy,
                quantity,
                price_per_unit: invested_amount / quantity,
                fees: 0.0,
                txn_date: None,
                notes: Some("Initial holding".into()),
            },
        );
        db::transaction_queries::insert(pool, opening_buy).await?;
    }

    Ok(asset)
}

pub async fn update(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    input: UpdateAsset,
) -> Result<Asset, AppError> {
    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Asset name cannot be empty".into()));
        }
    }
    db::asset_queries::update(pool, user_id, id, input)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))
}

pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
    match db::asset_queries::delete(pool, user_id, id).await? {
        0 => Err(AppError::NotFound(format!("Asset {} not found", id))),
        _ => Ok(()),
    }
}

/// The `listAssetsWithTransactions` collaborator: every asset of the user
/// paired with its (unsorted) transactions. The engine does its own sorting.
pub async fn fetch_with_transactions(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<(Asset, Vec<Transaction>)>, AppError> {
    let assets = db::asset_queries::fetch_all(pool, user_id).await?;
    let txns = db::transaction_queries::fetch_all_for_user(pool, user_id).await?;

    let mut by_asset: HashMap<Uuid, Vec<Transaction>> = HashMap::new();
    for txn in txns {
        by_asset.entry(txn.asset_id).or_default().push(txn);
    }

    Ok(assets
        .into_iter()
        .map(|asset| {
            let txns = by_asset.remove(&asset.id).unwrap_or_default();
            (asset, txns)
        })
        .collect())
}

/// Assets with live performance for the dashboard list.
pub async fn overview(
    pool: &PgPool,
    cache: &PriceCache,
    user_id: Uuid,
) -> Result<Vec<AssetOverview>, AppError> {
    let assets = fetch_with_transactions(pool, user_id).await?;
    let prices = pricing::load_price_map(pool, cache).await?;

    let mut out = Vec::with_capacity(assets.len());
    for (asset, txns) in assets {
        let current_price = pricing::resolve_price(&asset, &prices);
        let perf = performance::compute_performance(&txns, current_price);

        let (day_change_inr, day_change_pct) = match pricing::resolve_previous(&asset, &prices) {
            Some(previous) if previous > 0.0 => (
                perf.holding_quantity * (current_price - previous),
                (current_price - previous) / previous * 100.0,
            ),
            _ => (0.0, 0.0),
        };

        out.push(AssetOverview {
            asset,
            current_price,
            performance: perf,
            day_change_inr,
            day_change_pct,
        });
    }

    Ok(out)
}
