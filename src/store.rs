//! SQLite persistence for weight records and the user profile
//!
//! Dates are stored as RFC 3339 strings in UTC so that text ordering matches
//! chronological ordering.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use crate::models::{Goal, NewWeightRecord, UserProfile, WeightRecord, WeightUnit};

// ---------------------------------------------------------------------------
/// Error Handling
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Weight record not found: {0}")]
    NotFound(i64),

    #[error("Invalid weight: {0}")]
    InvalidWeight(f64),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Corrupt stored value: {0}")]
    Corrupt(String),
}

fn validate_weight(weight: f64) -> Result<(), StoreError> {
    if weight.is_finite() && weight > 0.0 {
        Ok(())
    } else {
        Err(StoreError::InvalidWeight(weight))
    }
}

fn parse_date(value: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt(format!("date '{}': {}", value, e)))
}

fn parse_unit(value: &str) -> Result<WeightUnit, StoreError> {
    value.parse().map_err(StoreError::Corrupt)
}

fn record_from_row(row: &SqliteRow) -> Result<WeightRecord, StoreError> {
    let recorded_at: String = row.try_get("recorded_at")?;
    let unit: String = row.try_get("unit")?;

    Ok(WeightRecord {
        id: row.try_get("id")?,
        date: parse_date(&recorded_at)?,
        weight: row.try_get("weight")?,
        unit: parse_unit(&unit)?,
    })
}

// ---------------------------------------------------------------------------
// Weight Records
// ---------------------------------------------------------------------------

/// Load all records, oldest first
pub async fn list_weights(pool: &SqlitePool) -> Result<Vec<WeightRecord>, StoreError> {
    let rows = sqlx::query(
        r#"
        SELECT id, recorded_at, weight, unit
        FROM weight_records
        ORDER BY recorded_at, id
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(record_from_row).collect()
}

pub async fn get_weight(pool: &SqlitePool, id: i64) -> Result<WeightRecord, StoreError> {
    let row = sqlx::query("SELECT id, recorded_at, weight, unit FROM weight_records WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::NotFound(id))?;

    record_from_row(&row)
}

pub async fn add_weight(
    pool: &SqlitePool,
    record: &NewWeightRecord,
) -> Result<WeightRecord, StoreError> {
    validate_weight(record.weight)?;

    let result = sqlx::query(
        r#"
        INSERT INTO weight_records (recorded_at, weight, unit)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(record.date.to_rfc3339())
    .bind(record.weight)
    .bind(record.unit.as_str())
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    debug!(id, weight = record.weight, unit = %record.unit, "Weight record added");

    Ok(WeightRecord {
        id,
        date: record.date,
        weight: record.weight,
        unit: record.unit,
    })
}

/// Replace date, weight and unit of an existing record
pub async fn update_weight(pool: &SqlitePool, record: &WeightRecord) -> Result<(), StoreError> {
    validate_weight(record.weight)?;

    let result = sqlx::query(
        r#"
        UPDATE weight_records
        SET recorded_at = ?,
            weight = ?,
            unit = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        "#,
    )
    .bind(record.date.to_rfc3339())
    .bind(record.weight)
    .bind(record.unit.as_str())
    .bind(record.id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound(record.id));
    }

    debug!(id = record.id, "Weight record updated");
    Ok(())
}

pub async fn delete_weight(pool: &SqlitePool, id: i64) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM weight_records WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound(id));
    }

    info!(id, "Weight record deleted");
    Ok(())
}

// ---------------------------------------------------------------------------
// User Profile
// ---------------------------------------------------------------------------

/// Load the profile; an empty profile when nothing was saved yet
pub async fn load_profile(pool: &SqlitePool) -> Result<UserProfile, StoreError> {
    let row = sqlx::query(
        r#"
        SELECT name, age, height_cm, gender, email, goal_date, goal_weight, goal_unit
        FROM user_profile
        WHERE id = 1
        "#,
    )
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(UserProfile::default());
    };

    let goal_date: Option<String> = row.try_get("goal_date")?;
    let goal_unit: String = row.try_get("goal_unit")?;

    Ok(UserProfile {
        name: row.try_get("name")?,
        age: row.try_get("age")?,
        height: row.try_get("height_cm")?,
        gender: row.try_get("gender")?,
        email: row.try_get("email")?,
        goal: Goal {
            date: goal_date.as_deref().map(parse_date).transpose()?,
            weight: row.try_get("goal_weight")?,
            unit: parse_unit(&goal_unit)?,
        },
    })
}

/// Replace the whole profile, goal included
pub async fn save_profile(pool: &SqlitePool, profile: &UserProfile) -> Result<(), StoreError> {
    if profile.height.is_some_and(|h| !h.is_finite() || h < 0.0) {
        return Err(StoreError::InvalidProfile("height must not be negative".to_string()));
    }
    if profile.age.is_some_and(|a| a < 0) {
        return Err(StoreError::InvalidProfile("age must not be negative".to_string()));
    }
    if let Some(weight) = profile.goal.weight {
        validate_weight(weight)?;
    }

    sqlx::query(
        r#"
        INSERT INTO user_profile
            (id, name, age, height_cm, gender, email, goal_date, goal_weight, goal_unit)
        VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            age = excluded.age,
            height_cm = excluded.height_cm,
            gender = excluded.gender,
            email = excluded.email,
            goal_date = excluded.goal_date,
            goal_weight = excluded.goal_weight,
            goal_unit = excluded.goal_unit,
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(&profile.name)
    .bind(profile.age)
    .bind(profile.height)
    .bind(&profile.gender)
    .bind(&profile.email)
    .bind(profile.goal.date.map(|d| d.to_rfc3339()))
    .bind(profile.goal.weight)
    .bind(profile.goal.unit.as_str())
    .execute(pool)
    .await?;

    info!("User profile saved");
    Ok(())
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        days_after, fixed_now, make_profile, seed_test_weights, setup_test_db, teardown_test_db,
    };

    #[tokio::test]
    async fn test_add_and_list_weights_sorted() {
        let pool = setup_test_db().await;
        let t0 = fixed_now();

        // Insert out of order
        seed_test_weights(&pool, t0, &[(7, 79.0), (0, 80.0), (3, 79.6)]).await;

        let records = list_weights(&pool).await.expect("Should list weights");
        let weights: Vec<f64> = records.iter().map(|r| r.weight).collect();
        assert_eq!(weights, vec![80.0, 79.6, 79.0]);
        assert_eq!(records[0].date, t0);
        assert_eq!(records[0].unit, WeightUnit::Kg);

        teardown_test_db(pool).await;
    }

    #[tokio::test]
    async fn test_add_weight_rejects_non_positive() {
        let pool = setup_test_db().await;

        for weight in [0.0, -5.0, f64::NAN] {
            let result = add_weight(
                &pool,
                &NewWeightRecord {
                    date: fixed_now(),
                    weight,
                    unit: WeightUnit::Kg,
                },
            )
            .await;
            assert!(matches!(result, Err(StoreError::InvalidWeight(_))));
        }

        assert!(list_weights(&pool).await.unwrap().is_empty());
        teardown_test_db(pool).await;
    }

    #[tokio::test]
    async fn test_update_weight() {
        let pool = setup_test_db().await;
        let ids = seed_test_weights(&pool, fixed_now(), &[(0, 80.0)]).await;

        let mut record = get_weight(&pool, ids[0]).await.expect("Should load record");
        record.weight = 176.5;
        record.unit = WeightUnit::Lb;
        record.date = days_after(fixed_now(), 1);
        update_weight(&pool, &record).await.expect("Should update");

        let reloaded = get_weight(&pool, ids[0]).await.expect("Should reload");
        assert_eq!(reloaded, record);

        teardown_test_db(pool).await;
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_record() {
        let pool = setup_test_db().await;
        let missing = WeightRecord {
            id: 999,
            date: fixed_now(),
            weight: 70.0,
            unit: WeightUnit::Kg,
        };

        let err = update_weight(&pool, &missing).await.unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert!(matches!(delete_weight(&pool, 999).await, Err(StoreError::NotFound(999))));
        assert!(matches!(get_weight(&pool, 999).await, Err(StoreError::NotFound(999))));

        teardown_test_db(pool).await;
    }

    #[tokio::test]
    async fn test_delete_weight() {
        let pool = setup_test_db().await;
        let ids = seed_test_weights(&pool, fixed_now(), &[(0, 80.0), (1, 79.5)]).await;

        delete_weight(&pool, ids[0]).await.expect("Should delete");

        let records = list_weights(&pool).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, ids[1]);

        teardown_test_db(pool).await;
    }

    #[tokio::test]
    async fn test_empty_profile_after_migration() {
        let pool = setup_test_db().await;

        let profile = load_profile(&pool).await.expect("Should load profile");
        assert_eq!(profile, UserProfile::default());

        teardown_test_db(pool).await;
    }

    #[tokio::test]
    async fn test_save_and_load_profile() {
        let pool = setup_test_db().await;
        let mut profile = make_profile(172.0, Some(68.0), Some(days_after(fixed_now(), 60)));
        profile.name = Some("Alex".to_string());
        profile.age = Some(34);
        profile.email = Some("alex@example.com".to_string());

        save_profile(&pool, &profile).await.expect("Should save");
        assert_eq!(load_profile(&pool).await.unwrap(), profile);

        // Goal is replaced wholesale
        profile.goal = Goal {
            date: None,
            weight: Some(150.0),
            unit: WeightUnit::Lb,
        };
        save_profile(&pool, &profile).await.expect("Should save again");
        let reloaded = load_profile(&pool).await.unwrap();
        assert_eq!(reloaded.goal.date, None);
        assert_eq!(reloaded.goal.unit, WeightUnit::Lb);

        teardown_test_db(pool).await;
    }

    #[tokio::test]
    async fn test_save_profile_rejects_invalid_values() {
        let pool = setup_test_db().await;

        let negative_height = make_profile(-170.0, None, None);
        assert!(matches!(
            save_profile(&pool, &negative_height).await,
            Err(StoreError::InvalidProfile(_))
        ));

        let zero_goal = make_profile(170.0, Some(0.0), None);
        assert!(matches!(
            save_profile(&pool, &zero_goal).await,
            Err(StoreError::InvalidWeight(_))
        ));

        teardown_test_db(pool).await;
    }
}
