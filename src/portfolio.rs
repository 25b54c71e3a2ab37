//! Portfolio aggregation.
//!
//! Folds a list of trades into the [`StatisticsSnapshot`] shown on the
//! dashboard. Pure over its input and cheap enough to recompute on every
//! request.

use indexmap::IndexMap;

use crate::models::TradeType;
use crate::models::stats::{StatisticsSnapshot, SymbolActivity};
use crate::models::trade::Trade;

/// Derives summary statistics from `trades`.
///
/// Totals do not depend on input order. Symbols are reported in the order
/// they first appear. Records from a remote store are unbounded, so every
/// sum saturates instead of overflowing.
pub fn aggregate(trades: &[Trade]) -> StatisticsSnapshot {
    let mut snapshot = StatisticsSnapshot::default();
    let mut symbols: IndexMap<&str, SymbolActivity> = IndexMap::new();

    for trade in trades {
        match trade.trade_type {
            TradeType::Buy => {
                snapshot.total_buys += 1;
                snapshot.total_invested = snapshot.total_invested.saturating_add(trade.net_amount);
            }
            TradeType::Sell => {
                snapshot.total_sells += 1;
                snapshot.total_realized = snapshot.total_realized.saturating_add(trade.net_amount);
            }
        }
        snapshot.total_taxes_paid = snapshot
            .total_taxes_paid
            .saturating_add(trade.capital_gain_tax);
        snapshot.total_fees_paid = snapshot.total_fees_paid.saturating_add(trade.total_fees());

        let activity = symbols
            .entry(trade.symbol.as_str())
            .or_insert_with(|| SymbolActivity {
                symbol: trade.symbol.clone(),
                trade_count: 0,
                volume: 0,
            });
        activity.trade_count += 1;
        activity.volume = activity.volume.saturating_add(trade.quantity);
    }

    snapshot.total_trades = trades.len();
    snapshot.total_profit = snapshot
        .total_realized
        .saturating_sub(snapshot.total_invested);
    snapshot.symbols = symbols.into_values().collect();
    snapshot
}
