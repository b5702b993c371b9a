//! Small numeric helpers shared by the analysis modules
//!
//! The analysis layer absorbs degenerate numbers instead of surfacing them:
//! a zero or NaN input is treated as "missing" and produces a sentinel.

/// True for values that carry no usable magnitude (0 or NaN)
pub fn is_falsy(value: f64) -> bool {
  value == 0.0 || value.is_nan()
}

/// Round to the given number of decimals; halves go towards +∞, so
/// `-0.125` becomes `-0.12`
pub fn round_to(value: f64, decimals: i32) -> f64 {
  let factor = 10f64.powi(decimals);
  (value * factor + 0.5).floor() / factor
}

pub fn round1(value: f64) -> f64 {
  round_to(value, 1)
}

pub fn round2(value: f64) -> f64 {
  round_to(value, 2)
}

/// Division that returns 0 when the divisor is 0 or NaN
pub fn safe_divide(numerator: f64, divisor: f64) -> f64 {
  if is_falsy(divisor) {
    0.0
  } else {
    numerator / divisor
  }
}
