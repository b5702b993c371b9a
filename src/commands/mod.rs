pub mod analysis;
pub mod profile;

use crate::db::AppState;
use crate::models::{NewWeightRecord, WeightRecord, WeightUnit};
use crate::store;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use std::sync::Arc;
use tauri::State;

/// ---------------------------------------------------------------------------
/// Weight Record Commands
/// ---------------------------------------------------------------------------

#[tauri::command]
pub async fn get_weights(
  state: State<'_, Arc<AppState>>,
) -> Result<Vec<WeightRecord>, String> {
  store::list_weights(&state.db)
    .await
    .map_err(|e| format!("Failed to fetch weights: {}", e))
}

#[tauri::command]
pub async fn get_weight(
  state: State<'_, Arc<AppState>>,
  id: i64,
) -> Result<WeightRecord, String> {
  store::get_weight(&state.db, id)
    .await
    .map_err(|e| format!("Failed to fetch weight: {}", e))
}

/// Record a weigh-in; the date defaults to now
#[tauri::command]
pub async fn add_weight(
  state: State<'_, Arc<AppState>>,
  weight: f64,
  unit: Option<WeightUnit>,
  date: Option<DateTime<Utc>>,
) -> Result<WeightRecord, String> {
  let record = NewWeightRecord {
    date: date.unwrap_or_else(|| state.clock.now()),
    weight,
    unit: unit.unwrap_or_default(),
  };

  store::add_weight(&state.db, &record)
    .await
    .map_err(|e| format!("Failed to add weight: {}", e))
}

#[tauri::command]
pub async fn update_weight(
  state: State<'_, Arc<AppState>>,
  record: WeightRecord,
) -> Result<(), String> {
  store::update_weight(&state.db, &record)
    .await
    .map_err(|e| format!("Failed to update weight: {}", e))
}

#[tauri::command]
pub async fn delete_weight(
  state: State<'_, Arc<AppState>>,
  id: i64,
) -> Result<(), String> {
  store::delete_weight(&state.db, id)
    .await
    .map_err(|e| format!("Failed to delete weight: {}", e))
}

/// ---------------------------------------------------------------------------
/// Export
/// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ExportDocument {
  exported_at: DateTime<Utc>,
  profile: crate::models::UserProfile,
  records: Vec<WeightRecord>,
}

/// Pretty JSON of the profile and every record, for the share/export sheet
pub async fn export_json(pool: &SqlitePool, exported_at: DateTime<Utc>) -> Result<String, String> {
  let records = store::list_weights(pool)
    .await
    .map_err(|e| format!("Failed to fetch weights: {}", e))?;
  let profile = store::load_profile(pool)
    .await
    .map_err(|e| format!("Failed to load profile: {}", e))?;

  let document = ExportDocument {
    exported_at,
    profile,
    records,
  };

  serde_json::to_string_pretty(&document).map_err(|e| format!("Failed to serialize export: {}", e))
}

#[tauri::command]
pub async fn export_weights(
  state: State<'_, Arc<AppState>>,
) -> Result<String, String> {
  export_json(&state.db, state.clock.now()).await
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::{fixed_now, seed_test_profile, seed_test_weights, setup_test_db, teardown_test_db};

  #[tokio::test]
  async fn test_export_json_contains_profile_and_records() {
    let pool = setup_test_db().await;
    seed_test_weights(&pool, fixed_now(), &[(0, 81.2), (2, 80.7)]).await;
    seed_test_profile(&pool, 178.0, Some(75.0), None).await;

    let json = export_json(&pool, fixed_now()).await.expect("Should export");
    let value: serde_json::Value = serde_json::from_str(&json).expect("Should be valid JSON");

    assert_eq!(value["records"].as_array().unwrap().len(), 2);
    assert_eq!(value["records"][0]["unit"], "KG");
    assert_eq!(value["profile"]["height"], 178.0);
    assert_eq!(value["profile"]["goal"]["weight"], 75.0);
    assert_eq!(value["exported_at"], "2024-01-15T12:00:00Z");

    teardown_test_db(pool).await;
  }
}
