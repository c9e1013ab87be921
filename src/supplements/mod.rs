//! Supplement recognition results, safety screening and suitability verdicts
//!
//! Image recognition and the reasoning model live behind external
//! endpoints; this module only shapes what goes to them and reads what
//! comes back.

pub mod catalog;
pub mod screening;
pub mod verdict;

pub use catalog::{NutrientMap, Supplement};
pub use screening::{
    recognition_result, screen, RecognitionResult, SafetyLevel, SupplementAssessment,
};
pub use verdict::{
    extract_json_object, parse_verdict, parse_verdict_or_fallback, Suitability,
    SuitabilityRequest, SuitabilityVerdict,
};
