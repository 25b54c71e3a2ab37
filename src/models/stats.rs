//! Dashboard statistics snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of symbols shown in the dashboard's top-symbols list.
pub const TOP_SYMBOL_LIMIT: usize = 6;

/// Aggregate statistics over a set of trades. Recomputed on demand, never
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    pub total_trades: usize,
    pub total_buys: usize,
    pub total_sells: usize,
    /// Sum of BUY net amounts.
    pub total_invested: Decimal,
    /// Sum of SELL net amounts.
    pub total_realized: Decimal,
    /// `total_realized - total_invested`.
    pub total_profit: Decimal,
    /// Sum of capital gain tax.
    pub total_taxes_paid: Decimal,
    /// Sum of broker commission, SEBON fee and DP charge.
    pub total_fees_paid: Decimal,
    /// Per-symbol activity in first-occurrence order.
    #[serde(default)]
    pub symbols: Vec<SymbolActivity>,
}

impl StatisticsSnapshot {
    /// First [`TOP_SYMBOL_LIMIT`] symbols in first-occurrence order.
    pub fn top_symbols(&self) -> &[SymbolActivity] {
        let end = self.symbols.len().min(TOP_SYMBOL_LIMIT);
        &self.symbols[..end]
    }
}

/// Trade count and share volume for one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolActivity {
    pub symbol: String,
    pub trade_count: usize,
    /// Total shares across BUY and SELL trades.
    pub volume: u64,
}
