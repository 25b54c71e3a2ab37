//! In-process trade store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::info;

use super::TradeStore;
use crate::fees::{FeeSchedule, compute_trade};
use crate::models::trade::{Trade, TradeOrder};
use crate::TradebookError;

struct Inner {
    next_id: u64,
    trades: BTreeMap<u64, Trade>,
}

/// Trade store backed by a map, pricing orders with its own [`FeeSchedule`].
///
/// Ids start at 1 and increase monotonically; deleted ids are not reused.
pub struct MemoryTradeStore {
    schedule: FeeSchedule,
    inner: Mutex<Inner>,
}

impl MemoryTradeStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(schedule: FeeSchedule) -> Self {
        Self {
            schedule,
            inner: Mutex::new(Inner {
                next_id: 1,
                trades: BTreeMap::new(),
            }),
        }
    }

    /// The schedule new and updated trades are priced with.
    pub fn schedule(&self) -> &FeeSchedule {
        &self.schedule
    }
}

impl Default for MemoryTradeStore {
    fn default() -> Self {
        Self::new(FeeSchedule::default())
    }
}

#[async_trait]
impl TradeStore for MemoryTradeStore {
    async fn list_trades(&self) -> crate::Result<Vec<Trade>> {
        let inner = self.inner.lock().await;
        let mut trades: Vec<Trade> = inner.trades.values().cloned().collect();
        trades.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(trades)
    }

    async fn get_trade(&self, id: u64) -> crate::Result<Trade> {
        let inner = self.inner.lock().await;
        inner
            .trades
            .get(&id)
            .cloned()
            .ok_or(TradebookError::NotFound(id))
    }

    async fn create_trade(&self, order: &TradeOrder) -> crate::Result<Trade> {
        let quote = compute_trade(order, &self.schedule)?;

        let mut inner = self.inner.lock().await;
        let id = inner.next_id;
        inner.next_id += 1;
        let trade = quote.into_trade(id, Utc::now());
        inner.trades.insert(id, trade.clone());

        info!(
            id,
            symbol = %trade.symbol,
            trade_type = %trade.trade_type,
            net_amount = %trade.net_amount,
            "Created trade"
        );
        Ok(trade)
    }

    async fn update_trade(&self, id: u64, order: &TradeOrder) -> crate::Result<Trade> {
        let quote = compute_trade(order, &self.schedule)?;

        let mut inner = self.inner.lock().await;
        let existing = inner.trades.get_mut(&id).ok_or(TradebookError::NotFound(id))?;
        let updated = quote.into_trade(id, existing.created_at);
        *existing = updated.clone();

        info!(id, symbol = %updated.symbol, "Updated trade");
        Ok(updated)
    }

    async fn delete_trade(&self, id: u64) -> crate::Result<()> {
        let mut inner = self.inner.lock().await;
        inner
            .trades
            .remove(&id)
            .ok_or(TradebookError::NotFound(id))?;

        info!(id, "Deleted trade");
        Ok(())
    }
}
