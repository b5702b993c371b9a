//! Runtime configuration loaded from the environment
//!
//! Values come from process env (after `.env` is loaded by `run()`).
//! Test mode pins "now" to a fixed instant so trend and pace results are
//! reproducible.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------
/// Environment Keys
/// ---------------------------------------------------------------------------

pub const ENV_TEST_MODE: &str = "WEIGHT_TRACKER_TEST_MODE";
pub const ENV_FIXED_NOW: &str = "WEIGHT_TRACKER_FIXED_NOW";
pub const ENV_DB_FILE: &str = "WEIGHT_TRACKER_DB_FILE";
pub const ENV_LOG: &str = "WEIGHT_TRACKER_LOG";

const DEFAULT_DB_FILE: &str = "weight-tracker.db";
const DEFAULT_LOG_LEVEL: &str = "info";

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, Serialize, Deserialize)]
pub enum ConfigError {
  #[error("Invalid value for {key}: {value}")]
  InvalidValue { key: String, value: String },
}

/// ---------------------------------------------------------------------------
/// App Configuration
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
  /// Use `fixed_now` instead of the wall clock
  pub test_mode: bool,
  pub fixed_now: DateTime<Utc>,
  /// Database file name inside the app data dir
  pub db_file: String,
  /// Default tracing filter when RUST_LOG is not set
  pub log_level: String,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      test_mode: false,
      fixed_now: default_fixed_now(),
      db_file: DEFAULT_DB_FILE.to_string(),
      log_level: DEFAULT_LOG_LEVEL.to_string(),
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    let defaults = Self::default();

    let test_mode = match std::env::var(ENV_TEST_MODE) {
      Ok(value) => parse_bool(ENV_TEST_MODE, &value)?,
      Err(_) => defaults.test_mode,
    };

    let fixed_now = match std::env::var(ENV_FIXED_NOW) {
      Ok(value) => DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ConfigError::InvalidValue {
          key: ENV_FIXED_NOW.to_string(),
          value,
        })?,
      Err(_) => defaults.fixed_now,
    };

    let db_file = std::env::var(ENV_DB_FILE)
      .ok()
      .filter(|v| !v.trim().is_empty())
      .unwrap_or(defaults.db_file);

    let log_level = std::env::var(ENV_LOG)
      .ok()
      .filter(|v| !v.trim().is_empty())
      .unwrap_or(defaults.log_level);

    Ok(Self {
      test_mode,
      fixed_now,
      db_file,
      log_level,
    })
  }
}

/// 2024-01-15 12:00 UTC
fn default_fixed_now() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0)
    .single()
    .unwrap_or_default()
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
  match value.trim().to_lowercase().as_str() {
    "1" | "true" | "yes" | "on" => Ok(true),
    "0" | "false" | "no" | "off" | "" => Ok(false),
    _ => Err(ConfigError::InvalidValue {
      key: key.to_string(),
      value: value.to_string(),
    }),
  }
}
