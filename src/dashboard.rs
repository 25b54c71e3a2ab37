//! Dashboard view model.
//!
//! Turns a list of trades into the display strings of the trading
//! dashboard. Construction is pure; [`refresh`] is the only entry point that
//! touches a store, and it is called explicitly by the caller. A failed fetch
//! is returned as an error rather than replaced with placeholder data.

use std::fmt;

use tracing::debug;

use crate::format::{ProfitDirection, npr};
use crate::models::stats::StatisticsSnapshot;
use crate::models::trade::Trade;
use crate::portfolio::aggregate;
use crate::store::TradeStore;

/// Text shown in place of the top-symbol list when there are no trades.
pub const NO_DATA: &str = "No trading data available";

/// A labelled figure with a short caption underneath.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    pub caption: String,
}

/// One entry of the top-symbols list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolCard {
    pub symbol: String,
    /// e.g. `"2 trades • 100 shares"`.
    pub summary: String,
}

/// Everything the dashboard renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub snapshot: StatisticsSnapshot,
    pub profit_direction: ProfitDirection,
    pub cards: Vec<StatCard>,
    pub top_symbols: Vec<SymbolCard>,
}

impl DashboardView {
    /// Builds the view from a fetched trade list.
    pub fn from_trades(trades: &[Trade]) -> Self {
        Self::from_snapshot(aggregate(trades))
    }

    /// Builds the view from precomputed statistics.
    pub fn from_snapshot(snapshot: StatisticsSnapshot) -> Self {
        let direction = ProfitDirection::of(snapshot.total_profit);

        let cards = vec![
            StatCard {
                label: "Total Trades",
                value: snapshot.total_trades.to_string(),
                caption: format!(
                    "{} Buys • {} Sells",
                    snapshot.total_buys, snapshot.total_sells
                ),
            },
            StatCard {
                label: "Total Invested",
                value: npr(snapshot.total_invested),
                caption: format!("{} Buy Orders", snapshot.total_buys),
            },
            StatCard {
                label: "Total Realized",
                value: npr(snapshot.total_realized),
                caption: format!("{} Sell Orders", snapshot.total_sells),
            },
            StatCard {
                label: "Net Profit/Loss",
                value: npr(snapshot.total_profit.abs()),
                caption: direction.to_string(),
            },
            StatCard {
                label: "Total Taxes Paid",
                value: npr(snapshot.total_taxes_paid),
                caption: "Capital Gain Tax".to_string(),
            },
            StatCard {
                label: "Total Fees Paid",
                value: npr(snapshot.total_fees_paid),
                caption: "Broker + SEBON + DP".to_string(),
            },
        ];

        let top_symbols = snapshot
            .top_symbols()
            .iter()
            .map(|s| SymbolCard {
                symbol: s.symbol.clone(),
                summary: format!("{} trades • {} shares", s.trade_count, s.volume),
            })
            .collect();

        Self {
            snapshot,
            profit_direction: direction,
            cards,
            top_symbols,
        }
    }

    /// Looks up a card by its label.
    pub fn card(&self, label: &str) -> Option<&StatCard> {
        self.cards.iter().find(|c| c.label == label)
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Trading Dashboard")?;
        for card in &self.cards {
            writeln!(f, "  {:<18} {:>20}  {}", card.label, card.value, card.caption)?;
        }
        writeln!(f, "Top Trading Symbols")?;
        if self.top_symbols.is_empty() {
            writeln!(f, "  {NO_DATA}")?;
        }
        for entry in &self.top_symbols {
            writeln!(f, "  {:<10} {}", entry.symbol, entry.summary)?;
        }
        Ok(())
    }
}

/// Fetches the current trade list from `store` and rebuilds the view.
///
/// # Errors
///
/// Propagates any store failure unchanged.
pub async fn refresh(store: &dyn TradeStore) -> crate::Result<DashboardView> {
    let trades = store.list_trades().await?;
    debug!(count = trades.len(), "Refreshed dashboard");
    Ok(DashboardView::from_trades(&trades))
}
