use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::weight::WeightUnit;

/// Target weight, optionally with a deadline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Goal {
  pub date: Option<DateTime<Utc>>,
  pub weight: Option<f64>,
  #[serde(default)]
  pub unit: WeightUnit,
}

impl Goal {
  /// A goal without a weight is unset
  pub fn is_set(&self) -> bool {
    self.weight.is_some_and(|w| w > 0.0)
  }

  /// No deadline: pace-to-goal is not computed
  pub fn is_open_ended(&self) -> bool {
    self.date.is_none()
  }

  pub fn weight_in(&self, unit: WeightUnit) -> Option<f64> {
    self.weight
      .filter(|w| *w > 0.0)
      .map(|w| self.unit.convert(w, unit))
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
  pub name: Option<String>,
  pub age: Option<i64>,
  /// Height in centimetres
  pub height: Option<f64>,
  pub gender: Option<String>,
  pub email: Option<String>,
  #[serde(default)]
  pub goal: Goal,
}

impl UserProfile {
  /// Height usable for BMI, None when missing or not positive
  pub fn height_cm(&self) -> Option<f64> {
    self.height.filter(|h| *h > 0.0)
  }

  /// Unit used to present weights to this user
  pub fn display_unit(&self) -> WeightUnit {
    self.goal.unit
  }
}
