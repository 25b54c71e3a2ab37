//! Trade journal data model.
//!
//! Contains the trade side enum shared by orders and stored trades, plus the
//! record types in [`trade`] and the dashboard aggregate in [`stats`].

pub mod stats;
pub mod trade;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;

/// Side of a trade (wire names: `"BUY"`, `"SELL"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeType {
    Buy,
    Sell,
}

impl TradeType {
    /// Returns the wire-format name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Buy => "BUY",
            TradeType::Sell => "SELL",
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TradeType {
    type Err = InvalidInput;

    /// Parses `BUY`/`SELL`, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(TradeType::Buy),
            "SELL" => Ok(TradeType::Sell),
            _ => Err(InvalidInput::UnknownTradeType {
                value: s.to_string(),
            }),
        }
    }
}
