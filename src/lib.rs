//! NEPSE trade journal core.
//!
//! Prices raw orders (broker commission, SEBON fee, DP charge, capital gain
//! tax), aggregates trade histories into dashboard statistics, and talks to
//! the journal's REST trade store.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod fees;
pub mod format;
pub mod models;
pub mod portfolio;
pub mod store;

pub use error::{InvalidInput, Result, TradebookError};
