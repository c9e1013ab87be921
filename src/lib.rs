//! HealthBuddy v0.5.0 - BMI guidance and supplement screening
//!
//! A small, synchronous health toolkit for the terminal.
//!
//! # Architecture
//!
//! - **bmi**: BMI computation, band classification, recommendations and
//!   exercise plans, all driven by one threshold table
//! - **profile**: the user health profile record and its stores
//! - **supplements**: recognition screening and suitability verdicts
//! - **history**: searchable log of past analyses

pub mod errors;

// Re-export commonly used types
pub use errors::{HealthError, Result};

// Core lookups
pub mod bmi;
pub use bmi::{assess, classify, compute_bmi, recommend, BmiCategory, BmiValue};

// Collaborator contracts
pub mod profile;
pub mod supplements;
pub mod history;

// Interface layer
pub mod cli;
pub mod display;
