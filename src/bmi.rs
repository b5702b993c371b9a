//! BMI computation and category thresholds
//!
//! Categories are closed intervals `min <= bmi <= max`. Membership is checked
//! from the highest band down, so a value on a shared boundary (18.5, 25, 30...)
//! belongs to the higher band.

use serde::{Deserialize, Serialize};

use crate::numeric::{is_falsy, round1};

/// ---------------------------------------------------------------------------
/// Categories
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiClass {
  SevereThinning,
  ModerateThinning,
  MildThinning,
  Normal,
  Overweight,
  ObesityI,
  ObesityII,
  ObesityIII,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiCategory {
  pub class: BmiClass,
  pub label: &'static str,
  pub min: f64,
  /// None for the open-ended top band
  pub max: Option<f64>,
  pub color: &'static str,
  pub severity_emoji: &'static str,
  /// Heaviest weight (kg) still inside this band for the user's height
  pub max_weight_for_height: Option<f64>,
}

impl BmiCategory {
  pub fn contains(&self, bmi: f64) -> bool {
    bmi >= self.min && self.max.is_none_or(|max| bmi <= max)
  }
}

const fn category(
  class: BmiClass,
  label: &'static str,
  min: f64,
  max: Option<f64>,
  color: &'static str,
  severity_emoji: &'static str,
) -> BmiCategory {
  BmiCategory {
    class,
    label,
    min,
    max,
    color,
    severity_emoji,
    max_weight_for_height: None,
  }
}

/// Ascending by BMI. The first entry doubles as the fallback category.
const CATEGORY_TABLE: [BmiCategory; 8] = [
  category(BmiClass::SevereThinning, "Severe Thinning", 0.0, Some(16.0), "#7b1fa2", "🔴"),
  category(BmiClass::ModerateThinning, "Moderate Thinning", 16.0, Some(17.0), "#3949ab", "🟠"),
  category(BmiClass::MildThinning, "Mild Thinning", 17.0, Some(18.5), "#1e88e5", "🟡"),
  category(BmiClass::Normal, "Normal", 18.5, Some(25.0), "#43a047", "🟢"),
  category(BmiClass::Overweight, "Overweight", 25.0, Some(30.0), "#fdd835", "🟡"),
  category(BmiClass::ObesityI, "Obesity I", 30.0, Some(35.0), "#fb8c00", "🟠"),
  category(BmiClass::ObesityII, "Obesity II", 35.0, Some(40.0), "#e53935", "🔴"),
  category(BmiClass::ObesityIII, "Obesity III", 40.0, None, "#b71c1c", "⛔"),
];

/// ---------------------------------------------------------------------------
/// Computation
/// ---------------------------------------------------------------------------

/// BMI rounded to one decimal; None when weight or height is missing or not positive
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
  if weight_kg.is_nan() || weight_kg <= 0.0 || height_cm.is_nan() || height_cm <= 0.0 {
    return None;
  }
  let height_m = height_cm / 100.0;
  Some(round1(weight_kg / (height_m * height_m)))
}

/// Category for a BMI value, falling back to the first category when the
/// value is missing, 0, NaN or outside every band
pub fn get_bmi_category(bmi: Option<f64>) -> BmiCategory {
  let fallback = || CATEGORY_TABLE[0].clone();

  match bmi {
    Some(value) if !is_falsy(value) => CATEGORY_TABLE
      .iter()
      .rev()
      .find(|c| c.contains(value))
      .cloned()
      .unwrap_or_else(fallback),
    _ => fallback(),
  }
}

/// Fresh category table with `max_weight_for_height` filled for this height.
///
/// Empty when the height is missing or not positive.
pub fn get_max_weight_limits(height_cm: Option<f64>) -> Vec<BmiCategory> {
  let Some(height_cm) = height_cm.filter(|h| *h > 0.0) else {
    return Vec::new();
  };
  let height_m = height_cm / 100.0;
  let height_sq = height_m * height_m;

  CATEGORY_TABLE
    .iter()
    .map(|c| BmiCategory {
      max_weight_for_height: c.max.map(|max| max * height_sq),
      ..c.clone()
    })
    .collect()
}
