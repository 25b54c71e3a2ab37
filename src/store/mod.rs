//! Trade store seam.
//!
//! [`TradeStore`] is the contract of the journal's REST collection: list,
//! fetch, create, update and delete trades. [`http::HttpTradeStore`] talks
//! to the remote API; [`memory::MemoryTradeStore`] keeps trades in process
//! with the same semantics.

pub mod http;
pub mod memory;

use async_trait::async_trait;

use crate::models::trade::{Trade, TradeOrder};

pub use http::HttpTradeStore;
pub use memory::MemoryTradeStore;

/// A collection of persisted trades.
#[async_trait]
pub trait TradeStore: Send + Sync {
    /// Returns every trade, newest first.
    async fn list_trades(&self) -> crate::Result<Vec<Trade>>;

    /// Returns a single trade.
    ///
    /// # Errors
    ///
    /// [`TradebookError::NotFound`](crate::TradebookError::NotFound) for an
    /// unknown id.
    async fn get_trade(&self, id: u64) -> crate::Result<Trade>;

    /// Prices `order` and persists it under a fresh id.
    async fn create_trade(&self, order: &TradeOrder) -> crate::Result<Trade>;

    /// Re-prices an existing trade from `order`, keeping its id and
    /// creation time.
    async fn update_trade(&self, id: u64, order: &TradeOrder) -> crate::Result<Trade>;

    /// Removes a trade. Its id is never handed out again.
    async fn delete_trade(&self, id: u64) -> crate::Result<()>;
}
