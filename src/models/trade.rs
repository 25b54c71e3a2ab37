//! Trade records and raw orders.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TradeType;
use crate::fees::{self, FeeSchedule};

/// A raw order as submitted by a user, before fees are derived.
///
/// `quantity` is signed so that zero and negative submissions reach
/// validation instead of failing to deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeOrder {
    pub symbol: String,
    pub trade_type: TradeType,
    pub quantity: i64,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_price: Option<Decimal>,
}

impl TradeOrder {
    /// Creates a BUY order.
    #[must_use]
    pub fn buy(symbol: &str, quantity: i64, price: Decimal) -> Self {
        Self {
            symbol: symbol.to_string(),
            trade_type: TradeType::Buy,
            quantity,
            price,
            buy_price: None,
        }
    }

    /// Creates a SELL order matched against an acquisition price.
    #[must_use]
    pub fn sell(symbol: &str, quantity: i64, price: Decimal, buy_price: Decimal) -> Self {
        Self {
            symbol: symbol.to_string(),
            trade_type: TradeType::Sell,
            quantity,
            price,
            buy_price: Some(buy_price),
        }
    }
}

/// A priced, persisted trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: u64,
    pub symbol: String,
    pub trade_type: TradeType,
    pub quantity: u64,
    pub price: Decimal,
    /// Acquisition price the SELL was matched against; `None` for BUY.
    #[serde(default)]
    pub buy_price: Option<Decimal>,
    pub gross_amount: Decimal,
    pub broker_commission: Decimal,
    pub sebon_fee: Decimal,
    pub dp_charge: Decimal,
    pub capital_gain_tax: Decimal,
    pub net_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Trade {
    /// Broker commission + SEBON fee + DP charge. Excludes capital gain tax.
    ///
    /// Saturates at [`Decimal::MAX`] for records that were not priced here.
    pub fn total_fees(&self) -> Decimal {
        self.broker_commission
            .saturating_add(self.sebon_fee)
            .saturating_add(self.dp_charge)
    }

    /// Returns the order this trade was priced from, or `None` when the
    /// stored quantity does not fit an order.
    pub fn order(&self) -> Option<TradeOrder> {
        Some(TradeOrder {
            symbol: self.symbol.clone(),
            trade_type: self.trade_type,
            quantity: i64::try_from(self.quantity).ok()?,
            price: self.price,
            buy_price: self.buy_price,
        })
    }

    /// Re-derives every money field under `schedule` and reports whether the
    /// stored values still match.
    pub fn is_consistent_with(&self, schedule: &FeeSchedule) -> bool {
        let Some(order) = self.order() else {
            return false;
        };
        match fees::compute_trade(&order, schedule) {
            Ok(quote) => {
                quote.symbol == self.symbol
                    && quote.gross_amount == self.gross_amount
                    && quote.broker_commission == self.broker_commission
                    && quote.sebon_fee == self.sebon_fee
                    && quote.dp_charge == self.dp_charge
                    && quote.capital_gain_tax == self.capital_gain_tax
                    && quote.net_amount == self.net_amount
            }
            Err(_) => false,
        }
    }
}
