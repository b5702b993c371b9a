mod commands;
mod db;
mod logging;
mod numeric;
mod store;

pub mod analysis;
pub mod bmi;
pub mod config;
pub mod models;
pub mod pace;
pub mod progress;
pub mod time_utils;
pub mod trend;

#[cfg(test)]
mod test_utils;

use config::AppConfig;
use db::AppState;
use std::sync::Arc;
use tauri::Manager;
use time_utils::Clock;
use tracing::{error, info, warn};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  let config = match AppConfig::from_env() {
    Ok(config) => config,
    Err(e) => {
      eprintln!("Invalid configuration, using defaults: {}", e);
      AppConfig::default()
    }
  };
  logging::init_logging(&config);

  let clock = Clock::from_config(&config);
  if config.test_mode {
    warn!(now = %config.fixed_now, "Test mode: clock is fixed");
  }

  tauri::Builder::default()
    .setup(move |app| {
      let app_handle = app.handle().clone();
      tauri::async_runtime::block_on(async move {
        match db::initialize_db(&app_handle, &config.db_file).await {
          Ok(pool) => {
            let state = Arc::new(AppState { db: pool, clock });
            app_handle.manage(state);
            info!("Database ready");
          }
          Err(e) => {
            error!("Failed to initialize database: {}", e);
          }
        }
      });
      Ok(())
    })
    .invoke_handler(tauri::generate_handler![
      commands::get_weights,
      commands::get_weight,
      commands::add_weight,
      commands::update_weight,
      commands::delete_weight,
      commands::export_weights,
      // Profile commands
      commands::profile::get_profile,
      commands::profile::update_profile,
      // Analysis commands
      commands::analysis::get_weight_summary,
      commands::analysis::get_trend_line,
      commands::analysis::get_bmi_limits,
      commands::analysis::get_weight_flags,
    ])
    .run(tauri::generate_context!())
    .expect("error while running tauri application");
}
