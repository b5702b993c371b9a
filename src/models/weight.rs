use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const KG_PER_LB: f64 = 0.453_592_37;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeightUnit {
  #[default]
  #[serde(rename = "KG")]
  Kg,
  #[serde(rename = "LB")]
  Lb,
}

impl WeightUnit {
  pub fn as_str(&self) -> &'static str {
    match self {
      WeightUnit::Kg => "KG",
      WeightUnit::Lb => "LB",
    }
  }

  /// Convert a weight expressed in `self` into `target`
  pub fn convert(&self, weight: f64, target: WeightUnit) -> f64 {
    match (self, target) {
      (WeightUnit::Kg, WeightUnit::Lb) => weight / KG_PER_LB,
      (WeightUnit::Lb, WeightUnit::Kg) => weight * KG_PER_LB,
      _ => weight,
    }
  }
}

impl std::fmt::Display for WeightUnit {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl std::str::FromStr for WeightUnit {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_uppercase().as_str() {
      "KG" => Ok(Self::Kg),
      "LB" | "LBS" => Ok(Self::Lb),
      _ => Err(format!("Unknown weight unit: {}", s)),
    }
  }
}

/// A single weigh-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightRecord {
  pub id: i64,
  pub date: DateTime<Utc>,
  pub weight: f64,
  pub unit: WeightUnit,
}

impl WeightRecord {
  pub fn weight_in(&self, unit: WeightUnit) -> f64 {
    self.unit.convert(self.weight, unit)
  }

  /// Copy of this record expressed in another unit
  pub fn converted_to(&self, unit: WeightUnit) -> Self {
    Self {
      weight: self.weight_in(unit),
      unit,
      ..self.clone()
    }
  }
}

/// For inserting new records (without id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWeightRecord {
  pub date: DateTime<Utc>,
  pub weight: f64,
  #[serde(default)]
  pub unit: WeightUnit,
}
