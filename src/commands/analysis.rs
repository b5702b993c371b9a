use crate::analysis::{WeightFlags, WeightSummary};
use crate::bmi::{get_max_weight_limits, BmiCategory};
use crate::db::AppState;
use crate::store;
use crate::time_utils::Clock;
use crate::trend::TrendPoint;
use serde::Serialize;
use sqlx::SqlitePool;
use std::sync::Arc;
use tauri::State;

/// ---------------------------------------------------------------------------
/// Loaders (shared by the commands below)
/// ---------------------------------------------------------------------------

/// Compute the summary from the current database snapshot
pub async fn load_summary(pool: &SqlitePool, clock: &Clock) -> Result<WeightSummary, String> {
  let records = store::list_weights(pool)
    .await
    .map_err(|e| format!("Failed to fetch weights: {}", e))?;
  let profile = store::load_profile(pool)
    .await
    .map_err(|e| format!("Failed to load profile: {}", e))?;

  Ok(WeightSummary::compute(&records, &profile, clock))
}

/// Summary with its flags, ready for the notification rules
#[derive(Debug, Clone, Serialize)]
pub struct FlagReport {
  pub flags: WeightFlags,
  pub prioritized: Vec<String>,
}

pub async fn load_flags(pool: &SqlitePool, clock: &Clock) -> Result<FlagReport, String> {
  let summary = load_summary(pool, clock).await?;
  let flags = WeightFlags::compute(&summary, clock);
  let prioritized = flags.to_string_list();
  Ok(FlagReport { flags, prioritized })
}

/// ---------------------------------------------------------------------------
/// Analysis Commands
/// ---------------------------------------------------------------------------

#[tauri::command]
pub async fn get_weight_summary(
  state: State<'_, Arc<AppState>>,
) -> Result<WeightSummary, String> {
  load_summary(&state.db, &state.clock).await
}

/// Trend line in the profile's display unit
#[tauri::command]
pub async fn get_trend_line(
  state: State<'_, Arc<AppState>>,
) -> Result<Vec<TrendPoint>, String> {
  let summary = load_summary(&state.db, &state.clock).await?;
  Ok(summary.trend_line)
}

/// Category table for the BMI gauge; empty without a height
#[tauri::command]
pub async fn get_bmi_limits(
  state: State<'_, Arc<AppState>>,
) -> Result<Vec<BmiCategory>, String> {
  let profile = store::load_profile(&state.db)
    .await
    .map_err(|e| format!("Failed to load profile: {}", e))?;
  Ok(get_max_weight_limits(profile.height_cm()))
}

#[tauri::command]
pub async fn get_weight_flags(
  state: State<'_, Arc<AppState>>,
) -> Result<FlagReport, String> {
  load_flags(&state.db, &state.clock).await
}
