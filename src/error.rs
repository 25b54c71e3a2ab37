//! Crate-level error types.
//!
//! [`TradebookError`] unifies every error source (validation, configuration,
//! HTTP, JSON) behind a single enum so callers can match on the variant they
//! care about while still using the `?` operator for easy propagation.
//!
//! [`InvalidInput`] is the only error the fee calculator raises. It is kept
//! separate so that pure code never has to mention transport failures.

use std::fmt;

use rust_decimal::Decimal;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TradebookError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum TradebookError {
    /// An order was rejected before pricing.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    /// Configuration could not be read or is malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The HTTP request itself failed (connect, timeout, body decode).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The trade store answered with a non-success status.
    #[error("trade store returned {status}: {body}")]
    Api { status: u16, body: String },

    /// No trade with this id exists in the store.
    #[error("trade {0} not found")]
    NotFound(u64),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reason a raw order was rejected by the calculator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    EmptySymbol,
    SymbolTooLong { symbol: String, max: usize },
    NonPositiveQuantity { quantity: i64 },
    NonPositivePrice { price: Decimal },
    /// A SELL needs the acquisition price to compute capital gain tax.
    MissingBuyPrice,
    NonPositiveBuyPrice { buy_price: Decimal },
    /// A BUY must not carry an acquisition price.
    UnexpectedBuyPrice { buy_price: Decimal },
    UnknownTradeType { value: String },
    /// The order's amounts exceed what the journal can record.
    AmountOutOfRange { max: Decimal },
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySymbol => write!(f, "symbol must not be empty"),
            Self::SymbolTooLong { symbol, max } => {
                write!(f, "symbol {symbol} exceeds {max} characters")
            }
            Self::NonPositiveQuantity { quantity } => {
                write!(f, "quantity must be positive, got {quantity}")
            }
            Self::NonPositivePrice { price } => {
                write!(f, "price must be positive, got {price}")
            }
            Self::MissingBuyPrice => write!(f, "buy price is required for a SELL"),
            Self::NonPositiveBuyPrice { buy_price } => {
                write!(f, "buy price must be positive, got {buy_price}")
            }
            Self::UnexpectedBuyPrice { buy_price } => {
                write!(f, "buy price {buy_price} is not allowed on a BUY")
            }
            Self::UnknownTradeType { value } => {
                write!(f, "trade type must be BUY or SELL, got {value:?}")
            }
            Self::AmountOutOfRange { max } => {
                write!(f, "order amount exceeds the maximum of {max}")
            }
        }
    }
}

impl std::error::Error for InvalidInput {}
