//! Goal completion percentage

use crate::numeric::{is_falsy, round2};

/// Percent of the way from `first_weight` to `goal_weight`.
///
/// NaN when any input is 0/NaN or when the goal equals the starting weight;
/// callers treat NaN as "no goal context yet". Values above 100 (overshot)
/// and below 0 (moved away) are returned as-is.
pub fn weight_progression(first_weight: f64, last_weight: f64, goal_weight: f64) -> f64 {
  if is_falsy(first_weight) || is_falsy(last_weight) || is_falsy(goal_weight) {
    return f64::NAN;
  }
  if goal_weight == first_weight {
    return f64::NAN;
  }

  round2((last_weight - first_weight) / (goal_weight - first_weight) * 100.0)
}

/// Progress clamped to 0..=100 for the doughnut chart; NaN shows as 0
pub fn display_progress(progression: f64) -> f64 {
  if progression.is_nan() {
    0.0
  } else {
    progression.clamp(0.0, 100.0)
  }
}
