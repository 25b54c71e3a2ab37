//! Fee and capital gain tax calculator.
//!
//! Prices a raw [`TradeOrder`] under a [`FeeSchedule`]: gross amount, broker
//! commission, SEBON fee, flat DP charge, capital gain tax on profitable
//! SELLs, and the resulting net amount. Every money field is rounded to two
//! decimal places (half-up) on its own, and the net amount is summed from
//! the rounded components so that stored rows always add up.

pub mod config;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::InvalidInput;
use crate::models::TradeType;
use crate::models::trade::{Trade, TradeOrder};
pub use config::{FeeSchedule, NetAmountMode};

/// Maximum ticker length accepted by the journal.
pub const MAX_SYMBOL_LEN: usize = 20;

/// Largest gross amount the journal records: 12 digits, 2 decimal places.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Rounds a money value to two decimal places, midpoint away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// A priced order that has not been assigned an identity yet.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeQuote {
    pub symbol: String,
    pub trade_type: TradeType,
    pub quantity: u64,
    pub price: Decimal,
    pub buy_price: Option<Decimal>,
    pub gross_amount: Decimal,
    pub broker_commission: Decimal,
    pub sebon_fee: Decimal,
    pub dp_charge: Decimal,
    pub capital_gain_tax: Decimal,
    pub net_amount: Decimal,
}

impl TradeQuote {
    /// Broker commission + SEBON fee + DP charge.
    pub fn total_fees(&self) -> Decimal {
        self.broker_commission + self.sebon_fee + self.dp_charge
    }

    /// Attaches the store-assigned identity.
    #[must_use]
    pub fn into_trade(self, id: u64, created_at: DateTime<Utc>) -> Trade {
        Trade {
            id,
            symbol: self.symbol,
            trade_type: self.trade_type,
            quantity: self.quantity,
            price: self.price,
            buy_price: self.buy_price,
            gross_amount: self.gross_amount,
            broker_commission: self.broker_commission,
            sebon_fee: self.sebon_fee,
            dp_charge: self.dp_charge,
            capital_gain_tax: self.capital_gain_tax,
            net_amount: self.net_amount,
            created_at,
        }
    }
}

/// Validates `order` and derives its fee/tax breakdown.
///
/// # Errors
///
/// Returns [`InvalidInput`] when the symbol is empty or too long, quantity
/// or price is not positive, a SELL lacks a positive buy price, or a BUY
/// carries one, or the gross amount exceeds [`MAX_AMOUNT`] (any fee or tax
/// product that cannot be represented is reported the same way).
pub fn compute_trade(order: &TradeOrder, schedule: &FeeSchedule) -> Result<TradeQuote, InvalidInput> {
    let symbol = normalize_symbol(&order.symbol)?;

    let quantity = u64::try_from(order.quantity)
        .ok()
        .filter(|q| *q > 0)
        .ok_or(InvalidInput::NonPositiveQuantity {
            quantity: order.quantity,
        })?;

    if order.price <= Decimal::ZERO {
        return Err(InvalidInput::NonPositivePrice { price: order.price });
    }

    let buy_price = match (order.trade_type, order.buy_price) {
        (TradeType::Buy, None) => None,
        (TradeType::Buy, Some(buy_price)) => {
            return Err(InvalidInput::UnexpectedBuyPrice { buy_price });
        }
        (TradeType::Sell, None) => return Err(InvalidInput::MissingBuyPrice),
        (TradeType::Sell, Some(buy_price)) if buy_price <= Decimal::ZERO => {
            return Err(InvalidInput::NonPositiveBuyPrice { buy_price });
        }
        (TradeType::Sell, Some(buy_price)) => Some(buy_price),
    };

    let qty = Decimal::from(quantity);
    let gross_amount = qty
        .checked_mul(order.price)
        .map(round2)
        .filter(|gross| *gross <= MAX_AMOUNT)
        .ok_or(OUT_OF_RANGE)?;
    let broker_commission = round2(in_range(gross_amount.checked_mul(schedule.broker_rate))?);
    let sebon_fee = round2(in_range(gross_amount.checked_mul(schedule.sebon_rate))?);
    let dp_charge = round2(schedule.dp_charge);

    let capital_gain_tax = match buy_price {
        Some(buy_price) => {
            let profit = in_range(
                order
                    .price
                    .checked_sub(buy_price)
                    .and_then(|per_share| per_share.checked_mul(qty)),
            )?;
            if profit > Decimal::ZERO {
                round2(in_range(profit.checked_mul(schedule.cgt_rate))?)
            } else {
                Decimal::ZERO
            }
        }
        None => Decimal::ZERO,
    };

    let fees = in_range(
        broker_commission
            .checked_add(sebon_fee)
            .and_then(|sum| sum.checked_add(dp_charge)),
    )?;
    let net_amount = in_range(match (order.trade_type, schedule.net_amount_mode) {
        (TradeType::Buy, NetAmountMode::CashFlow) => gross_amount.checked_add(fees),
        _ => gross_amount
            .checked_sub(fees)
            .and_then(|net| net.checked_sub(capital_gain_tax)),
    })?;

    Ok(TradeQuote {
        symbol,
        trade_type: order.trade_type,
        quantity,
        price: order.price,
        buy_price,
        gross_amount,
        broker_commission,
        sebon_fee,
        dp_charge,
        capital_gain_tax,
        net_amount: round2(net_amount),
    })
}

const OUT_OF_RANGE: InvalidInput = InvalidInput::AmountOutOfRange { max: MAX_AMOUNT };

fn in_range(value: Option<Decimal>) -> Result<Decimal, InvalidInput> {
    value.ok_or(OUT_OF_RANGE)
}

fn normalize_symbol(raw: &str) -> Result<String, InvalidInput> {
    let symbol = raw.trim().to_ascii_uppercase();
    if symbol.is_empty() {
        return Err(InvalidInput::EmptySymbol);
    }
    if symbol.chars().count() > MAX_SYMBOL_LEN {
        return Err(InvalidInput::SymbolTooLong {
            symbol,
            max: MAX_SYMBOL_LEN,
        });
    }
    Ok(symbol)
}
