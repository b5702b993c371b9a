//! Date arithmetic and the injectable clock
//!
//! Differences are computed on millisecond timestamps with fixed divisors.
//! A month is the 30.44-day average, not a calendar month.

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::config::AppConfig;

pub const MS_PER_DAY: f64 = 86_400_000.0;
pub const MS_PER_WEEK: f64 = 7.0 * MS_PER_DAY;
pub const MS_PER_MONTH: f64 = 30.44 * MS_PER_DAY;

/// ---------------------------------------------------------------------------
/// Clock
/// ---------------------------------------------------------------------------

/// Source of "now" for every computation that needs today's date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
  #[default]
  System,
  Fixed(DateTime<Utc>),
}

impl Clock {
  pub fn from_config(config: &AppConfig) -> Self {
    if config.test_mode {
      Clock::Fixed(config.fixed_now)
    } else {
      Clock::System
    }
  }

  pub fn now(&self) -> DateTime<Utc> {
    match self {
      Clock::System => Utc::now(),
      Clock::Fixed(instant) => *instant,
    }
  }

  /// True if every date falls on the same local calendar day as `now()`
  pub fn is_same_day(&self, dates: &[DateTime<Utc>]) -> bool {
    self.is_same_day_in(&Local, dates)
  }

  /// Same-day check on the wall clock of `tz`
  pub fn is_same_day_in<Tz: TimeZone>(&self, tz: &Tz, dates: &[DateTime<Utc>]) -> bool {
    let today = self.now().with_timezone(tz).date_naive();
    dates.iter().all(|d| d.with_timezone(tz).date_naive() == today)
  }
}

/// ---------------------------------------------------------------------------
/// Differences
/// ---------------------------------------------------------------------------

pub fn timestamp_ms(date: DateTime<Utc>) -> f64 {
  date.timestamp_millis() as f64
}

fn difference(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>, divisor: f64) -> f64 {
  match (start, end) {
    (Some(start), Some(end)) => (timestamp_ms(end) - timestamp_ms(start)) / divisor,
    _ => 0.0,
  }
}

/// Days from `start` to `end`; 0 if either is missing
pub fn day_difference(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> f64 {
  difference(start, end, MS_PER_DAY)
}

pub fn week_difference(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> f64 {
  difference(start, end, MS_PER_WEEK)
}

pub fn month_difference(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> f64 {
  difference(start, end, MS_PER_MONTH)
}
