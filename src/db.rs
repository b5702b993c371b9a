use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::fs;
use std::path::PathBuf;
use tauri::Manager;
use tracing::info;

use crate::time_utils::Clock;

pub type DbPool = SqlitePool;

/// Application state holding the database pool and the clock
pub struct AppState {
  pub db: DbPool,
  pub clock: Clock,
}

/// Get the path to the database file inside the app data dir
fn get_db_path<R: tauri::Runtime>(
  app: &tauri::AppHandle<R>,
  db_file: &str,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
  let data_dir = app
    .path()
    .app_data_dir()
    .map_err(|e| format!("Failed to get app data dir: {}", e))?;

  // Create directory if it doesn't exist
  fs::create_dir_all(&data_dir)?;

  Ok(data_dir.join(db_file))
}

/// Initialize the database connection pool and run migrations
pub async fn initialize_db<R: tauri::Runtime>(
  app: &tauri::AppHandle<R>,
  db_file: &str,
) -> Result<DbPool, Box<dyn std::error::Error>> {
  let db_path = get_db_path(app, db_file)?;
  let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

  info!(path = %db_path.display(), "Initializing database");

  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(&db_url)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  info!("Database initialized successfully");

  Ok(pool)
}
