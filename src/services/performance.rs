use crate::models::{AssetPerformance, Transaction, TxnType};

/// Weighted-average-cost valuation of one asset's ledger.
///
/// Pure and synchronous: takes the transaction list in any order plus the
/// already-resolved unit price, sorts by transaction date (stable, so
/// same-day entries keep insertion order), and produces the performance
/// record. No I/O, no currency conversion.
///
/// Realized P&L is computed against the single average buy price taken over
/// *all* buys, not a point-in-time average recomputed before each sale. A
/// ledger with sells and no buys therefore realizes the full sell proceeds
/// minus fees. Both are long-standing behavior, kept on purpose.
pub fn compute_performance(transactions: &[Transaction], current_price: f64) -> AssetPerformance {
    if transactions.is_empty() {
        return AssetPerformance::zero();
    }

    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by_key(|t| t.txn_date);

    let mut total_buy_qty = 0.0;
    let mut total_buy_cost = 0.0;
    let mut total_sell_qty = 0.0;

    for txn in &ordered {
        match txn.txn_type {
            TxnType::Buy => {
                total_buy_qty += txn.quantity;
                total_buy_cost += txn.quantity * txn.price_per_unit + txn.fees;
            }
            TxnType::Sell => {
                total_sell_qty += txn.quantity;
            }
        }
    }

    let avg_buy_price = if total_buy_qty > 0.0 {
        total_buy_cost / total_buy_qty
    } else {
        0.0
    };

    let mut realized_pnl = 0.0;
    for txn in ordered.iter().filter(|t| t.txn_type == TxnType::Sell) {
        realized_pnl += txn.quantity * (txn.price_per_unit - avg_buy_price) - txn.fees;
    }

    let holding_quantity = total_buy_qty - total_sell_qty;
    let total_invested = holding_quantity * avg_buy_price;
    let current_value = holding_quantity * current_price;
    let unrealized_pnl = current_value - total_invested;

    AssetPerformance {
        holding_quantity,
        avg_buy_price,
        total_invested,
        current_value,
        unrealized_pnl,
        realized_pnl,
        total_pnl: realized_pnl + unrealized_pnl,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateTransaction;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn txn(txn_type: TxnType, quantity: f64, price: f64, fees: f64, day: u32) -> Transaction {
        Transaction::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            CreateTransaction {
                txn_type,
                quantity,
                price_per_unit: price,
                fees,
                txn_date: Some(Utc.with_ymd_and_hms(2026, 1, day, 12, 0, 0).unwrap()),
                notes: None,
            },
        )
    }

    #[test]
    fn empty_ledger_is_all_zeros() {
        let perf = compute_performance(&[], 150.0);
        assert_eq!(perf, AssetPerformance::zero());
    }

    #[test]
    fn single_buy_unrealized_gain() {
        // BUY 10 @ 100, price now 150
        let perf = compute_performance(&[txn(TxnType::Buy, 10.0, 100.0, 0.0, 1)], 150.0);

        assert_eq!(perf.holding_quantity, 10.0);
        assert_eq!(perf.avg_buy_price, 100.0);
        assert_eq!(perf.total_invested, 1000.0);
        assert_eq!(perf.current_value, 1500.0);
        assert_eq!(perf.unrealized_pnl, 500.0);
        assert_eq!(perf.realized_pnl, 0.0);
        assert_eq!(perf.total_pnl, 500.0);
    }

    #[test]
    fn buy_then_partial_sell() {
        // BUY 10 @ 100, SELL 4 @ 120, price now 130
        let perf = compute_performance(
            &[
                txn(TxnType::Buy, 10.0, 100.0, 0.0, 1),
                txn(TxnType::Sell, 4.0, 120.0, 0.0, 5),
            ],
            130.0,
        );

        assert_eq!(perf.avg_buy_price, 100.0);
        assert_eq!(perf.realized_pnl, 80.0);
        assert_eq!(perf.holding_quantity, 6.0);
        assert_eq!(perf.current_value, 780.0);
        assert_eq!(perf.unrealized_pnl, 180.0);
        assert_eq!(perf.total_pnl, 260.0);
    }

    #[test]
    fn fees_are_part_of_cost_basis_and_sell_proceeds() {
        // BUY 10 @ 100 with 50 fees -> avg = 1050 / 10 = 105
        let perf = compute_performance(
            &[
                txn(TxnType::Buy, 10.0, 100.0, 50.0, 1),
                txn(TxnType::Sell, 2.0, 110.0, 10.0, 2),
            ],
            105.0,
        );

        assert_eq!(perf.avg_buy_price, 105.0);
        // 2 * (110 - 105) - 10
        assert_eq!(perf.realized_pnl, 0.0);
        assert_eq!(perf.holding_quantity, 8.0);
    }

    #[test]
    fn buys_only_identities_hold() {
        let txns = vec![
            txn(TxnType::Buy, 3.0, 200.0, 5.0, 1),
            txn(TxnType::Buy, 7.0, 250.0, 15.0, 3),
        ];
        let perf = compute_performance(&txns, 260.0);

        let total_qty = 10.0;
        let total_cost = 3.0 * 200.0 + 5.0 + 7.0 * 250.0 + 15.0;
        assert_eq!(perf.holding_quantity, total_qty);
        assert_eq!(perf.avg_buy_price, total_cost / total_qty);
        assert_eq!(perf.realized_pnl, 0.0);
    }

    #[test]
    fn total_pnl_is_realized_plus_unrealized() {
        let txns = vec![
            txn(TxnType::Buy, 12.5, 81.3, 2.25, 1),
            txn(TxnType::Sell, 3.7, 95.0, 1.1, 4),
            txn(TxnType::Buy, 4.0, 88.0, 0.0, 8),
            txn(TxnType::Sell, 1.2, 70.0, 0.5, 9),
        ];
        let perf = compute_performance(&txns, 92.4);

        assert!((perf.total_pnl - (perf.realized_pnl + perf.unrealized_pnl)).abs() < 1e-9);
    }

    #[test]
    fn sell_with_no_buys_realizes_full_proceeds() {
        // Malformed ledger: avg buy price falls back to 0, realized P&L is
        // proceeds minus fees. The engine does not second-guess the ledger.
        let perf = compute_performance(&[txn(TxnType::Sell, 5.0, 40.0, 3.0, 1)], 40.0);

        assert_eq!(perf.avg_buy_price, 0.0);
        assert_eq!(perf.realized_pnl, 5.0 * 40.0 - 3.0);
        assert_eq!(perf.holding_quantity, -5.0);
    }

    #[test]
    fn input_order_does_not_matter() {
        let a = txn(TxnType::Buy, 10.0, 100.0, 0.0, 1);
        let b = txn(TxnType::Sell, 4.0, 120.0, 0.0, 5);
        let forward = compute_performance(&[a.clone(), b.clone()], 130.0);
        let reversed = compute_performance(&[b, a], 130.0);

        assert_eq!(forward, reversed);
    }
}
