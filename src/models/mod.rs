pub mod profile;
pub mod weight;

pub use profile::{Goal, UserProfile};
pub use weight::{NewWeightRecord, WeightRecord, WeightUnit};
