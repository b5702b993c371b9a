//! Weight trend estimation
//!
//! Fits an ordinary least-squares line to recent weigh-ins and projects it
//! forward for charting. The window policy:
//!
//! 1. Keep records within 14 days of the most recent record.
//! 2. If that leaves fewer than 2 records but the full history has more than
//!    2, use the two most recent records instead.
//! 3. A regression that cannot be solved (no points, or all points on the same
//!    instant) yields slope 0 and intercept 0.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::WeightRecord;
use crate::numeric::is_falsy;
use crate::time_utils::{timestamp_ms, MS_PER_MONTH, MS_PER_WEEK};

pub const TREND_WINDOW_DAYS: i64 = 14;
pub const MIN_REGRESSION_POINTS: usize = 2;
/// How far the chart trend line is projected
pub const PROJECTION_MONTHS: u32 = 24;

/// ---------------------------------------------------------------------------
/// Types
/// ---------------------------------------------------------------------------

/// Chart point: x is the instant, y the weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
  pub x: DateTime<Utc>,
  pub y: f64,
}

/// Line over (timestamp in ms, weight)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LinearFit {
  /// Weight change per millisecond
  pub slope: f64,
  /// Weight at the Unix epoch
  pub intercept: f64,
}

/// Observed rate of change; negative means losing weight
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrendPace {
  pub weight_per_week: f64,
  pub weight_per_month: f64,
}

/// ---------------------------------------------------------------------------
/// Regression
/// ---------------------------------------------------------------------------

impl LinearFit {
  /// Least-squares fit.
  ///
  /// x values are shifted by the first point before summing so that
  /// identical timestamps give an exactly zero denominator. Slope and
  /// intercept are reported in unshifted coordinates.
  pub fn fit(points: &[(f64, f64)]) -> Self {
    let Some(&(origin, _)) = points.first() else {
      return Self::default();
    };

    let n = points.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;

    for &(x, y) in points {
      let dx = x - origin;
      sum_x += dx;
      sum_y += y;
      sum_xy += dx * y;
      sum_x2 += dx * dx;
    }

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 || !denominator.is_finite() {
      return Self::default();
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n - slope * origin;

    if !slope.is_finite() || !intercept.is_finite() {
      return Self::default();
    }

    Self { slope, intercept }
  }

  pub fn predict(&self, x: f64) -> f64 {
    self.slope * x + self.intercept
  }

  pub fn predict_at(&self, date: DateTime<Utc>) -> f64 {
    self.predict(timestamp_ms(date))
  }
}

/// Most recent record by date
pub fn latest_record(records: &[WeightRecord]) -> Option<&WeightRecord> {
  records.iter().max_by_key(|r| r.date)
}

/// Records used for the regression, sorted ascending by date
pub fn regression_window(records: &[WeightRecord], reference: DateTime<Utc>) -> Vec<&WeightRecord> {
  let window_start = reference - Duration::days(TREND_WINDOW_DAYS);

  let mut window: Vec<&WeightRecord> = records
    .iter()
    .filter(|r| r.date >= window_start && r.date <= reference)
    .collect();

  if window.len() < MIN_REGRESSION_POINTS && records.len() > MIN_REGRESSION_POINTS {
    debug!(
      windowed = window.len(),
      history = records.len(),
      "Sparse trend window, using the latest two records"
    );
    let mut sorted: Vec<&WeightRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.date);
    window = sorted.split_off(sorted.len() - MIN_REGRESSION_POINTS);
  }

  window.sort_by_key(|r| r.date);
  window
}

/// Fit over the window anchored at the most recent record
pub fn trend_fit(records: &[WeightRecord]) -> LinearFit {
  let Some(last) = latest_record(records) else {
    return LinearFit::default();
  };

  let points: Vec<(f64, f64)> = regression_window(records, last.date)
    .into_iter()
    .map(|r| (timestamp_ms(r.date), r.weight))
    .collect();

  LinearFit::fit(&points)
}

/// ---------------------------------------------------------------------------
/// Outputs
/// ---------------------------------------------------------------------------

pub fn trend_weight_pace(records: &[WeightRecord]) -> TrendPace {
  let fit = trend_fit(records);
  TrendPace {
    weight_per_week: fit.slope * MS_PER_WEEK,
    weight_per_month: fit.slope * MS_PER_MONTH,
  }
}

/// Two-point trend line from the latest record to two years later.
///
/// Empty when there are no records or when the projected weight is 0 or NaN.
pub fn get_trend_data(records: &[WeightRecord]) -> Vec<TrendPoint> {
  let Some(last) = latest_record(records) else {
    return Vec::new();
  };

  let Some(end) = last.date.checked_add_months(Months::new(PROJECTION_MONTHS)) else {
    return Vec::new();
  };

  let projected = trend_fit(records).predict_at(end);
  if is_falsy(projected) {
    debug!("Degenerate trend projection, no trend line");
    return Vec::new();
  }

  vec![
    TrendPoint {
      x: last.date,
      y: last.weight,
    },
    TrendPoint { x: end, y: projected },
  ]
}
