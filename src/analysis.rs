//! Deterministic analysis layer for weight history
//!
//! Combines the trend, pace, progress and BMI calculations into the values
//! the chart builders and the alert rules read. Everything here is computed
//! from a snapshot of records and the profile; nothing is retained between
//! calls.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::bmi::{compute_bmi, get_bmi_category, get_max_weight_limits, BmiCategory, BmiClass};
use crate::models::{UserProfile, WeightRecord, WeightUnit};
use crate::pace::PaceEstimate;
use crate::progress::{display_progress, weight_progression};
use crate::time_utils::{day_difference, Clock};
use crate::trend::{get_trend_data, latest_record, trend_weight_pace, TrendPace, TrendPoint};

/// Days without a weigh-in before the log counts as stale
pub const STALE_LOG_DAYS: f64 = 7.0;

/// ---------------------------------------------------------------------------
/// Weight Summary
/// ---------------------------------------------------------------------------

/// Everything derived from the weight history, in the user's display unit
#[derive(Debug, Clone, Serialize)]
pub struct WeightSummary {
  pub unit: WeightUnit,
  pub entry_count: usize,

  /// Earliest recorded weight (start of the journey)
  pub first_weight: Option<f64>,
  pub first_date: Option<DateTime<Utc>>,
  pub latest_weight: Option<f64>,
  pub latest_date: Option<DateTime<Utc>>,

  /// Latest entry was logged today
  pub logged_today: bool,

  pub goal_weight: Option<f64>,
  pub goal_date: Option<DateTime<Utc>>,

  /// Regression-based rate of change
  pub trend: TrendPace,

  /// Two-point projection for the line chart (empty when degenerate)
  pub trend_line: Vec<TrendPoint>,

  /// Pace needed from today to reach the goal by its date
  pub required_pace: Option<PaceEstimate>,

  /// Pace actually achieved between the first and latest entry
  pub elapsed_pace: Option<PaceEstimate>,

  /// Percent towards goal; NaN (serialized as null) when undefined
  pub progression_pct: f64,

  /// Progress clamped for the doughnut chart
  pub display_progress_pct: f64,

  pub bmi: Option<f64>,
  pub bmi_category: Option<BmiCategory>,

  /// Category table with per-height weight limits (kg)
  pub bmi_limits: Vec<BmiCategory>,
}

impl WeightSummary {
  pub fn compute(records: &[WeightRecord], profile: &UserProfile, clock: &Clock) -> Self {
    let unit = profile.display_unit();
    let now = clock.now();

    let records: Vec<WeightRecord> = records.iter().map(|r| r.converted_to(unit)).collect();

    let first = records.iter().min_by_key(|r| r.date);
    let latest = latest_record(&records);

    let goal_weight = if profile.goal.is_set() {
      profile.goal.weight_in(unit)
    } else {
      None
    };
    let goal_date = if profile.goal.is_open_ended() {
      None
    } else {
      profile.goal.date
    };

    let trend = trend_weight_pace(&records);
    let trend_line = get_trend_data(&records);

    let required_pace = match (latest, goal_weight, goal_date) {
      (Some(latest), Some(goal), Some(deadline)) => {
        Some(PaceEstimate::between(latest.weight, goal, Some(now), Some(deadline)))
      }
      _ => None,
    };

    let elapsed_pace = match (first, latest) {
      (Some(first), Some(latest)) if records.len() >= 2 => Some(PaceEstimate::between(
        first.weight,
        latest.weight,
        Some(first.date),
        Some(latest.date),
      )),
      _ => None,
    };

    let progression_pct = match (first, latest, goal_weight) {
      (Some(first), Some(latest), Some(goal)) => {
        weight_progression(first.weight, latest.weight, goal)
      }
      _ => f64::NAN,
    };

    // BMI is always computed in kilograms
    let latest_kg = latest.map(|r| unit.convert(r.weight, WeightUnit::Kg));
    let height = profile.height_cm();
    let bmi = match (latest_kg, height) {
      (Some(weight), Some(height)) => compute_bmi(weight, height),
      _ => None,
    };
    let bmi_category = bmi.map(|value| get_bmi_category(Some(value)));

    Self {
      unit,
      entry_count: records.len(),
      first_weight: first.map(|r| r.weight),
      first_date: first.map(|r| r.date),
      latest_weight: latest.map(|r| r.weight),
      latest_date: latest.map(|r| r.date),
      logged_today: latest.is_some_and(|r| clock.is_same_day(&[r.date])),
      goal_weight,
      goal_date,
      trend,
      trend_line,
      required_pace,
      elapsed_pace,
      progression_pct,
      display_progress_pct: display_progress(progression_pct),
      bmi,
      bmi_category,
      bmi_limits: get_max_weight_limits(height),
    }
  }

  /// Progress is meaningful only with a goal and a starting weight
  pub fn has_progress(&self) -> bool {
    !self.progression_pct.is_nan()
  }
}

/// ---------------------------------------------------------------------------
/// Weight Flags (Boolean Alerts)
/// ---------------------------------------------------------------------------

/// Flags read by the notification rules
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct WeightFlags {
  /// Progress reached 100% or more
  pub goal_reached: bool,

  /// Trend moves towards the goal slower than the required weekly pace
  pub behind_pace: bool,

  /// Current weight is further from the goal than the first entry
  pub moving_away: bool,

  /// No weigh-in for 7 days
  pub stale_log: bool,

  /// BMI outside the Normal band
  pub bmi_out_of_normal: bool,

  /// Goal deadline passed without reaching it
  pub goal_date_passed: bool,
}

impl WeightFlags {
  pub fn compute(summary: &WeightSummary, clock: &Clock) -> Self {
    let now = clock.now();
    let mut flags = WeightFlags::default();

    if summary.has_progress() {
      flags.goal_reached = summary.progression_pct >= 100.0;
      flags.moving_away = summary.progression_pct < 0.0;
    }

    // Required pace is positive when weight must drop; compare the trend in
    // the same direction
    if let Some(required) = summary.required_pace {
      if !flags.goal_reached && required.per_week != 0.0 {
        let direction = required.per_week.signum();
        let achieved = -summary.trend.weight_per_week * direction;
        flags.behind_pace = achieved < required.per_week.abs();
      }
    }

    if let Some(latest) = summary.latest_date {
      flags.stale_log = day_difference(Some(latest), Some(now)) >= STALE_LOG_DAYS;
    }

    if let Some(category) = &summary.bmi_category {
      flags.bmi_out_of_normal = category.class != BmiClass::Normal;
    }

    if let Some(deadline) = summary.goal_date {
      flags.goal_date_passed = deadline < now && summary.has_progress() && !flags.goal_reached;
    }

    flags
  }

  /// Convert flags to a prioritized list with (flag_name, priority, description)
  /// Priority: 1 = highest, 5 = lowest
  pub fn to_prioritized_list(&self) -> Vec<(String, u8, String)> {
    let mut flags = Vec::new();

    if self.moving_away {
      flags.push((
        "moving_away".to_string(),
        1,
        "Weight is moving away from the goal".to_string(),
      ));
    }
    if self.goal_date_passed {
      flags.push((
        "goal_date_passed".to_string(),
        2,
        "Goal date passed before reaching the goal".to_string(),
      ));
    }
    if self.behind_pace {
      flags.push((
        "behind_pace".to_string(),
        2,
        "Current trend is slower than the pace needed for the goal date".to_string(),
      ));
    }
    if self.bmi_out_of_normal {
      flags.push((
        "bmi_out_of_normal".to_string(),
        3,
        "BMI is outside the normal range".to_string(),
      ));
    }
    if self.stale_log {
      flags.push((
        "stale_log".to_string(),
        4,
        "No weight logged in the last 7 days".to_string(),
      ));
    }
    if self.goal_reached {
      flags.push((
        "goal_reached".to_string(),
        5,
        "Goal weight reached".to_string(),
      ));
    }

    flags.sort_by_key(|(_, priority, _)| *priority);
    flags
  }

  pub fn to_string_list(&self) -> Vec<String> {
    self.to_prioritized_list()
      .into_iter()
      .map(|(name, _, desc)| format!("{}: {}", name, desc))
      .collect()
  }
}
