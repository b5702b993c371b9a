//! Tauri commands for the user profile and goal

use std::sync::Arc;
use tauri::State;

use crate::db::AppState;
use crate::models::UserProfile;
use crate::store;

#[tauri::command]
pub async fn get_profile(
    state: State<'_, Arc<AppState>>,
) -> Result<UserProfile, String> {
    store::load_profile(&state.db)
        .await
        .map_err(|e| format!("Failed to load profile: {}", e))
}

/// Replace the profile; the goal is replaced along with it
#[tauri::command]
pub async fn update_profile(
    state: State<'_, Arc<AppState>>,
    profile: UserProfile,
) -> Result<(), String> {
    store::save_profile(&state.db, &profile)
        .await
        .map_err(|e| format!("Failed to save profile: {}", e))
}
