//! Fee schedule loading tests.

use std::path::PathBuf;

use rust_decimal_macros::dec;

use tradebook::TradebookError;
use tradebook::config::{AppConfig, ApiConfig, DEFAULT_API_URL};
use tradebook::fees::{FeeSchedule, NetAmountMode};

/// Helper to get the path to test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn app_config(fee_schedule_path: Option<PathBuf>) -> AppConfig {
    AppConfig {
        api: ApiConfig {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: std::time::Duration::from_secs(10),
        },
        fee_schedule_path,
    }
}

#[test]
fn test_valid_schedule_loads() {
    let schedule = FeeSchedule::load(&fixtures_dir().join("fee_schedule.json"))
        .expect("Failed to load fee schedule");

    assert_eq!(schedule.broker_rate, dec!(0.0036));
    assert_eq!(schedule.sebon_rate, dec!(0.00015));
    assert_eq!(schedule.dp_charge, dec!(25));
    assert_eq!(schedule.cgt_rate, dec!(0.075));
    assert_eq!(schedule.net_amount_mode, NetAmountMode::DeductAll);
}

#[test]
fn test_negative_rate_rejected() {
    let err = FeeSchedule::load(&fixtures_dir().join("invalid_fee_schedule.json")).unwrap_err();

    assert!(matches!(err, TradebookError::Config(_)));
    assert!(err.to_string().contains("broker_rate"));
}

#[test]
fn test_schedule_file_not_found() {
    let err = FeeSchedule::load(&fixtures_dir().join("nonexistent.json")).unwrap_err();

    assert!(matches!(err, TradebookError::Config(_)));
    assert!(err.to_string().contains("failed to read"));
}

#[test]
fn test_app_config_resolves_schedule() {
    let configured = app_config(Some(fixtures_dir().join("fee_schedule.json")));
    assert_eq!(
        configured.fee_schedule().unwrap().net_amount_mode,
        NetAmountMode::DeductAll
    );

    let defaulted = app_config(None);
    assert_eq!(defaulted.fee_schedule().unwrap(), FeeSchedule::default());
}
