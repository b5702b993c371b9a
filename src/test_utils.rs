//! Test utilities and helpers for unit and database tests
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Record and profile factories
//! - A fixed reference instant

use chrono::{DateTime, Duration, TimeZone, Utc};
use sqlx::SqlitePool;

use crate::models::{Goal, NewWeightRecord, UserProfile, WeightRecord, WeightUnit};

/// ---------------------------------------------------------------------------
/// Time Fixtures
/// ---------------------------------------------------------------------------

/// 2024-01-15 12:00 UTC, same as the default test-mode instant
pub fn fixed_now() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
}

pub fn days_after(start: DateTime<Utc>, days: i64) -> DateTime<Utc> {
  start + Duration::days(days)
}

/// ---------------------------------------------------------------------------
/// Model Factories
/// ---------------------------------------------------------------------------

pub fn make_record(id: i64, date: DateTime<Utc>, weight: f64) -> WeightRecord {
  WeightRecord {
    id,
    date,
    weight,
    unit: WeightUnit::Kg,
  }
}

/// Build kilogram records from (days after `start`, weight) pairs
pub fn records_from(start: DateTime<Utc>, entries: &[(i64, f64)]) -> Vec<WeightRecord> {
  entries
    .iter()
    .enumerate()
    .map(|(i, (days, weight))| make_record(i as i64 + 1, days_after(start, *days), *weight))
    .collect()
}

pub fn make_profile(
  height_cm: f64,
  goal_weight: Option<f64>,
  goal_date: Option<DateTime<Utc>>,
) -> UserProfile {
  UserProfile {
    height: Some(height_cm),
    goal: Goal {
      date: goal_date,
      weight: goal_weight,
      unit: WeightUnit::Kg,
    },
    ..UserProfile::default()
  }
}

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) so every query sees the same in-memory database
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Seed kilogram weigh-ins from (days after `start`, weight) pairs
/// Returns the IDs in input order
pub async fn seed_test_weights(
  pool: &SqlitePool,
  start: DateTime<Utc>,
  entries: &[(i64, f64)],
) -> Vec<i64> {
  let mut ids = Vec::new();

  for (days, weight) in entries {
    let record = crate::store::add_weight(
      pool,
      &NewWeightRecord {
        date: days_after(start, *days),
        weight: *weight,
        unit: WeightUnit::Kg,
      },
    )
    .await
    .expect("Failed to seed weight record");
    ids.push(record.id);
  }

  ids
}

/// Seed a profile with a height and goal
pub async fn seed_test_profile(
  pool: &SqlitePool,
  height_cm: f64,
  goal_weight: Option<f64>,
  goal_date: Option<DateTime<Utc>>,
) -> UserProfile {
  let profile = make_profile(height_cm, goal_weight, goal_date);
  crate::store::save_profile(pool, &profile)
    .await
    .expect("Failed to seed profile");
  profile
}
