//! Pace of weight change between two dates
//!
//! Positive pace means weight has to come down (current above goal).
//! Intervals shorter than one period report the flat delta instead of a rate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::numeric::{round2, safe_divide};
use crate::time_utils::{month_difference, week_difference};

/// Weekly and monthly pace for the same interval
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PaceEstimate {
  pub per_week: f64,
  pub per_month: f64,
}

impl PaceEstimate {
  pub fn between(
    current_weight: f64,
    goal_weight: f64,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
  ) -> Self {
    Self {
      per_week: week_weight_loss_pace(current_weight, goal_weight, start, end),
      per_month: month_weight_loss_pace(current_weight, goal_weight, start, end),
    }
  }
}

fn pace_over(delta: f64, periods: f64) -> f64 {
  if periods < 1.0 {
    round2(delta)
  } else {
    round2(safe_divide(delta, periods))
  }
}

pub fn week_weight_loss_pace(
  current_weight: f64,
  goal_weight: f64,
  start: Option<DateTime<Utc>>,
  end: Option<DateTime<Utc>>,
) -> f64 {
  pace_over(current_weight - goal_weight, week_difference(start, end))
}

pub fn month_weight_loss_pace(
  current_weight: f64,
  goal_weight: f64,
  start: Option<DateTime<Utc>>,
  end: Option<DateTime<Utc>>,
) -> f64 {
  pace_over(current_weight - goal_weight, month_difference(start, end))
}
