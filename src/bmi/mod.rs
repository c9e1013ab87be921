//! BMI classification and recommendation
//!
//! Pure, synchronous lookups: a reading (or the `Unknown` sentinel) maps to
//! a category, a display tier, a guidance triple and an exercise plan.

pub mod types;
pub mod bands;
pub mod exercise;

pub use types::{BmiAssessment, BmiCategory, BmiValue, BodyMetrics, ColorTier, Recommendation};
pub use bands::{assess, classify, compute_bmi, recommend, Band, BANDS};
pub use exercise::{exercise_plan, Difficulty, Exercise, ExercisePlan};
