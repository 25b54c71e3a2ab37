//! Application configuration loaded from environment variables.
//!
//! - `TRADEBOOK_API_URL`: base URL of the journal REST API
//!   (default `http://localhost:8000/api`)
//! - `TRADEBOOK_API_TIMEOUT_SECS`: request timeout in seconds (default 10)
//! - `TRADEBOOK_FEE_SCHEDULE`: optional path to a fee schedule JSON file
//!
//! Empty values are treated as absent.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::fees::FeeSchedule;

/// Default REST endpoint of the journal backend.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub fee_schedule_path: Option<PathBuf>,
}

/// REST API connection settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl AppConfig {
    /// Loads the configured fee schedule, or the NEPSE defaults when no file
    /// is configured.
    ///
    /// # Errors
    ///
    /// See [`FeeSchedule::load`].
    pub fn fee_schedule(&self) -> crate::Result<FeeSchedule> {
        match &self.fee_schedule_path {
            Some(path) => FeeSchedule::load(path),
            None => Ok(FeeSchedule::default()),
        }
    }
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`TradebookError::Config`](crate::TradebookError::Config) if the
/// API URL is not an http(s) URL or the timeout is not a positive integer.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let base_url =
        non_empty_var("TRADEBOOK_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

    match Url::parse(&base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => {
            return Err(crate::TradebookError::Config(format!(
                "TRADEBOOK_API_URL must use http or https, got {}",
                url.scheme()
            )));
        }
        Err(e) => {
            return Err(crate::TradebookError::Config(format!(
                "TRADEBOOK_API_URL is not a valid URL: {e}"
            )));
        }
    }

    let timeout_secs = match non_empty_var("TRADEBOOK_API_TIMEOUT_SECS") {
        Some(raw) => raw.parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
            crate::TradebookError::Config(format!(
                "TRADEBOOK_API_TIMEOUT_SECS must be a positive integer, got {raw:?}"
            ))
        })?,
        None => DEFAULT_TIMEOUT_SECS,
    };

    Ok(AppConfig {
        api: ApiConfig {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        },
        fee_schedule_path: non_empty_var("TRADEBOOK_FEE_SCHEDULE").map(PathBuf::from),
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Helper that temporarily sets env vars, runs `f`, then restores originals.
    ///
    /// Holds [`ENV_LOCK`] for the duration so tests in this module never
    /// observe each other's variables.
    fn with_env<F: FnOnce()>(vars: &[(&str, Option<&str>)], f: F) {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        let originals: Vec<(&str, Option<String>)> = vars
            .iter()
            .map(|(k, _)| (*k, std::env::var(k).ok()))
            .collect();

        for (k, v) in vars {
            // SAFETY: serialized by ENV_LOCK; no other code in this crate reads these vars.
            unsafe {
                match v {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }

        f();

        for (k, original) in originals {
            // SAFETY: restoring original values under the same lock.
            unsafe {
                match original {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn defaults_without_env_vars() {
        with_env(
            &[
                ("TRADEBOOK_API_URL", None),
                ("TRADEBOOK_API_TIMEOUT_SECS", None),
                ("TRADEBOOK_FEE_SCHEDULE", None),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.api.base_url, DEFAULT_API_URL);
                assert_eq!(config.api.timeout, Duration::from_secs(10));
                assert!(config.fee_schedule_path.is_none());
                assert_eq!(config.fee_schedule().unwrap(), FeeSchedule::default());
            },
        );
    }

    #[test]
    fn custom_values() {
        with_env(
            &[
                ("TRADEBOOK_API_URL", Some("https://journal.example.com/api")),
                ("TRADEBOOK_API_TIMEOUT_SECS", Some("30")),
                ("TRADEBOOK_FEE_SCHEDULE", Some("/etc/tradebook/fees.json")),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.api.base_url, "https://journal.example.com/api");
                assert_eq!(config.api.timeout, Duration::from_secs(30));
                assert_eq!(
                    config.fee_schedule_path,
                    Some(PathBuf::from("/etc/tradebook/fees.json"))
                );
            },
        );
    }

    #[test]
    fn rejects_non_http_url() {
        with_env(
            &[
                ("TRADEBOOK_API_URL", Some("ftp://journal.example.com")),
                ("TRADEBOOK_API_TIMEOUT_SECS", None),
            ],
            || {
                let err = fetch_config().unwrap_err();
                assert!(err.to_string().contains("must use http or https"));
            },
        );
    }

    #[test]
    fn rejects_unparseable_url() {
        with_env(
            &[
                ("TRADEBOOK_API_URL", Some("not a url")),
                ("TRADEBOOK_API_TIMEOUT_SECS", None),
            ],
            || {
                let err = fetch_config().unwrap_err();
                assert!(err.to_string().contains("not a valid URL"));
            },
        );
    }

    #[test]
    fn rejects_zero_timeout() {
        with_env(
            &[
                ("TRADEBOOK_API_URL", None),
                ("TRADEBOOK_API_TIMEOUT_SECS", Some("0")),
            ],
            || {
                let err = fetch_config().unwrap_err();
                assert!(err.to_string().contains("positive integer"));
            },
        );
    }

    #[test]
    fn empty_values_treated_as_absent() {
        with_env(
            &[
                ("TRADEBOOK_API_URL", Some("")),
                ("TRADEBOOK_API_TIMEOUT_SECS", Some("")),
                ("TRADEBOOK_FEE_SCHEDULE", Some("")),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.api.base_url, DEFAULT_API_URL);
                assert_eq!(config.api.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
                assert!(config.fee_schedule_path.is_none());
            },
        );
    }
}
