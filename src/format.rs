//! Display formatting for NPR amounts.

use std::fmt;

use rust_decimal::Decimal;

use crate::fees::round2;

/// Formats `amount` as `NPR 1,234.56`: two decimals, comma-grouped thousands.
pub fn npr(amount: Decimal) -> String {
    let rounded = round2(amount);
    let negative = rounded < Decimal::ZERO;
    let digits = format!("{:.2}", rounded.abs());
    let (whole, frac) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("NPR {sign}{grouped}.{frac}")
}

/// Whether a net result is a gain or a loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfitDirection {
    Profit,
    Loss,
}

impl ProfitDirection {
    /// Zero counts as profit.
    pub fn of(amount: Decimal) -> Self {
        if amount >= Decimal::ZERO {
            ProfitDirection::Profit
        } else {
            ProfitDirection::Loss
        }
    }
}

impl fmt::Display for ProfitDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfitDirection::Profit => f.write_str("↑ Profit"),
            ProfitDirection::Loss => f.write_str("↓ Loss"),
        }
    }
}
