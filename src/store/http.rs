//! REST trade store client.
//!
//! Talks to the journal API (`/trades/`, `/trades/{id}/`,
//! `/dashboard/stats/`). Orders are validated locally before they are sent,
//! so malformed input never reaches the network. Requests are not retried.

use std::net::IpAddr;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::TradeStore;
use crate::TradebookError;
use crate::config::ApiConfig;
use crate::fees::{FeeSchedule, compute_trade};
use crate::models::stats::StatisticsSnapshot;
use crate::models::trade::{Trade, TradeOrder};

/// Trade store backed by the journal's REST API.
pub struct HttpTradeStore {
    client: Client,
    base_url: String,
    schedule: FeeSchedule,
}

impl HttpTradeStore {
    /// Builds a client for `config.base_url` with the configured timeout.
    ///
    /// `schedule` is used to validate outgoing orders and to check incoming
    /// records for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`TradebookError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig, schedule: FeeSchedule) -> crate::Result<Self> {
        let mut builder = Client::builder().timeout(config.timeout);
        // A backend on this machine is never reached through a proxy.
        if is_loopback(&config.base_url) {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            schedule,
        })
    }

    /// Absolute URL for an API path such as `trades/7/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Fetches server-side dashboard statistics.
    pub async fn fetch_stats(&self) -> crate::Result<StatisticsSnapshot> {
        let url = self.endpoint("dashboard/stats/");
        debug!(url = %url, "GET");
        let response = self.client.get(&url).send().await?;
        decode(check(response, None).await?).await
    }

    /// Validates `order` and returns it with the normalized fields the
    /// calculator produced (trimmed, upper-case symbol).
    fn outgoing(&self, order: &TradeOrder) -> crate::Result<TradeOrder> {
        let quote = compute_trade(order, &self.schedule)?;
        Ok(TradeOrder {
            symbol: quote.symbol,
            trade_type: quote.trade_type,
            quantity: order.quantity,
            price: quote.price,
            buy_price: quote.buy_price,
        })
    }

    fn audit(&self, trade: &Trade) {
        if !trade.is_consistent_with(&self.schedule) {
            warn!(
                id = trade.id,
                symbol = %trade.symbol,
                net_amount = %trade.net_amount,
                "Trade amounts do not match the fee schedule"
            );
        }
    }
}

#[async_trait]
impl TradeStore for HttpTradeStore {
    async fn list_trades(&self) -> crate::Result<Vec<Trade>> {
        let url = self.endpoint("trades/");
        debug!(url = %url, "GET");
        let response = self.client.get(&url).send().await?;
        let trades: Vec<Trade> = decode(check(response, None).await?).await?;
        for trade in &trades {
            self.audit(trade);
        }
        Ok(trades)
    }

    async fn get_trade(&self, id: u64) -> crate::Result<Trade> {
        let url = self.endpoint(&format!("trades/{id}/"));
        debug!(url = %url, "GET");
        let response = self.client.get(&url).send().await?;
        let trade: Trade = decode(check(response, Some(id)).await?).await?;
        self.audit(&trade);
        Ok(trade)
    }

    async fn create_trade(&self, order: &TradeOrder) -> crate::Result<Trade> {
        let order = self.outgoing(order)?;

        let url = self.endpoint("trades/");
        debug!(url = %url, symbol = %order.symbol, "POST");
        let response = self.client.post(&url).json(&order).send().await?;
        let trade: Trade = decode(check(response, None).await?).await?;
        self.audit(&trade);

        info!(id = trade.id, symbol = %trade.symbol, "Created trade");
        Ok(trade)
    }

    async fn update_trade(&self, id: u64, order: &TradeOrder) -> crate::Result<Trade> {
        let order = self.outgoing(order)?;

        let url = self.endpoint(&format!("trades/{id}/"));
        debug!(url = %url, symbol = %order.symbol, "PUT");
        let response = self.client.put(&url).json(&order).send().await?;
        let trade: Trade = decode(check(response, Some(id)).await?).await?;
        self.audit(&trade);

        info!(id, symbol = %trade.symbol, "Updated trade");
        Ok(trade)
    }

    async fn delete_trade(&self, id: u64) -> crate::Result<()> {
        let url = self.endpoint(&format!("trades/{id}/"));
        debug!(url = %url, "DELETE");
        let response = self.client.delete(&url).send().await?;
        check(response, Some(id)).await?;

        info!(id, "Deleted trade");
        Ok(())
    }
}

/// Maps non-success statuses to errors. A 404 on an id-addressed request
/// becomes [`TradebookError::NotFound`].
async fn check(response: Response, id: Option<u64>) -> crate::Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if let Some(id) = id.filter(|_| status == StatusCode::NOT_FOUND) {
        return Err(TradebookError::NotFound(id));
    }
    let body = response.text().await.unwrap_or_default();
    Err(TradebookError::Api {
        status: status.as_u16(),
        body,
    })
}

fn is_loopback(base_url: &str) -> bool {
    let Some(host) = Url::parse(base_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
    else {
        return false;
    };
    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }
    host.trim_start_matches('[')
        .trim_end_matches(']')
        .parse::<IpAddr>()
        .is_ok_and(|ip| ip.is_loopback())
}

async fn decode<T: DeserializeOwned>(response: Response) -> crate::Result<T> {
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
