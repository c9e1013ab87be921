//! User health profiles
//!
//! The profile record mirrors what the hosted profile store keeps. The BMI
//! classifier only reads `weight`, `height` and `bmi` from it.

pub mod types;
pub mod store;

pub use types::{ActivityLevel, Disease, Gender, UserProfile};
pub use store::{JsonProfileStore, MemoryProfileStore, ProfileStore};
