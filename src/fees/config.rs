//! Fee schedule types and loading.

use std::fmt::Write;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Broker commission rate (0.36%).
const DEFAULT_BROKER_RATE: Decimal = Decimal::from_parts(36, 0, 0, false, 4);
/// SEBON regulatory fee rate (0.015%).
const DEFAULT_SEBON_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 5);
/// Flat depository participant charge per transaction, in NPR.
const DEFAULT_DP_CHARGE: Decimal = Decimal::from_parts(25, 0, 0, false, 0);
/// Capital gain tax rate on realized profit (7.5%).
const DEFAULT_CGT_RATE: Decimal = Decimal::from_parts(75, 0, 0, false, 3);

/// How the net amount of a BUY is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetAmountMode {
    /// BUY net is the cost to acquire (gross plus fees); SELL net is the
    /// proceeds (gross minus fees and tax).
    #[default]
    CashFlow,
    /// Fees and tax are deducted from gross on both sides. Matches rows
    /// recorded by the legacy journal backend.
    DeductAll,
}

impl NetAmountMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetAmountMode::CashFlow => "cash_flow",
            NetAmountMode::DeductAll => "deduct_all",
        }
    }
}

/// Rates and flat charges used to price an order.
///
/// Loaded from JSON; every field is optional and falls back to the NEPSE
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeSchedule {
    pub broker_rate: Decimal,
    pub sebon_rate: Decimal,
    pub dp_charge: Decimal,
    pub cgt_rate: Decimal,
    pub net_amount_mode: NetAmountMode,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            broker_rate: DEFAULT_BROKER_RATE,
            sebon_rate: DEFAULT_SEBON_RATE,
            dp_charge: DEFAULT_DP_CHARGE,
            cgt_rate: DEFAULT_CGT_RATE,
            net_amount_mode: NetAmountMode::default(),
        }
    }
}

impl FeeSchedule {
    /// Loads a fee schedule from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if any rate
    /// or charge is negative.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            crate::TradebookError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let schedule: Self = serde_json::from_str(&contents)?;
        schedule.validate()?;
        Ok(schedule)
    }

    /// Rejects negative rates and charges.
    ///
    /// # Errors
    ///
    /// Returns [`TradebookError::Config`](crate::TradebookError::Config)
    /// naming the first offending field.
    pub fn validate(&self) -> crate::Result<()> {
        let fields = [
            ("broker_rate", self.broker_rate),
            ("sebon_rate", self.sebon_rate),
            ("dp_charge", self.dp_charge),
            ("cgt_rate", self.cgt_rate),
        ];
        for (name, value) in fields {
            if value < Decimal::ZERO {
                return Err(crate::TradebookError::Config(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Returns a human-readable description of the schedule.
    pub fn describe(&self) -> String {
        let hundred = Decimal::ONE_HUNDRED;
        let mut out = String::from("Fee schedule:\n");
        let _ = writeln!(
            out,
            "  broker commission: {}%",
            (self.broker_rate * hundred).normalize()
        );
        let _ = writeln!(
            out,
            "  SEBON fee: {}%",
            (self.sebon_rate * hundred).normalize()
        );
        let _ = writeln!(out, "  DP charge: NPR {}", self.dp_charge.normalize());
        let _ = writeln!(
            out,
            "  capital gain tax: {}% of profit",
            (self.cgt_rate * hundred).normalize()
        );
        let _ = writeln!(out, "  net amount mode: {}", self.net_amount_mode.as_str());
        out
    }
}
