//! Rule-based safety screening of a recognized supplement against a profile

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::profile::Disease;
use super::catalog::{NutrientMap, Supplement};

/// Ingredients to flag for each condition
pub const RISK_TABLE: &[(Disease, &[Supplement])] = &[
    (Disease::Diabetes, &[Supplement::VitaminB3, Supplement::RedGinseng]),
    (Disease::Hypertension, &[Supplement::Omega3, Supplement::RedGinseng]),
    (Disease::HeartDisease, &[Supplement::CoenzymeQ10, Supplement::Omega3]),
    (Disease::KidneyDisease, &[Supplement::Magnesium, Supplement::Potassium]),
    (Disease::LiverDisease, &[Supplement::VitaminA1, Supplement::VitaminA2]),
    (Disease::Gout, &[Supplement::Calcium, Supplement::Magnesium]),
];

pub const GENERIC_CAUTION: &str =
    "No known risky ingredient, but take care given your existing conditions.";

/// Overall screening outcome, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyLevel {
    Safe,
    Caution,
    Danger,
}

impl fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SafetyLevel::Safe => "safe",
            SafetyLevel::Caution => "caution",
            SafetyLevel::Danger => "danger",
        };
        f.write_str(label)
    }
}

/// Screening result for one supplement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplementAssessment {
    pub name: Supplement,
    pub overall_safety: SafetyLevel,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub nutrients: NutrientMap,
}

/// Reshaped recognition response: product, contents, and per-supplement screening
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionResult {
    pub supplement_name: Supplement,
    #[serde(default)]
    pub total_nutrients: NutrientMap,
    #[serde(default)]
    pub supplements: Vec<SupplementAssessment>,
}

impl RecognitionResult {
    /// Most severe safety level across the screened supplements
    pub fn worst_safety(&self) -> Option<SafetyLevel> {
        self.supplements.iter().map(|s| s.overall_safety).max()
    }
}

/// Supplements flagged for a condition
pub fn risky_for(disease: Disease) -> &'static [Supplement] {
    RISK_TABLE
        .iter()
        .find(|(d, _)| *d == disease)
        .map(|(_, risky)| *risky)
        .unwrap_or(&[])
}

/// Screen `supplement` against the user's recorded conditions
///
/// Any condition listing the supplement makes it `Danger` with one reason
/// per condition. Otherwise any real condition yields `Caution`, and a
/// profile with no conditions yields `Safe`.
pub fn screen(supplement: Supplement, diseases: &[Disease]) -> SupplementAssessment {
    let conditions: Vec<Disease> = diseases
        .iter()
        .copied()
        .filter(Disease::is_condition)
        .collect();

    let reasons: Vec<String> = conditions
        .iter()
        .filter(|d| risky_for(**d).contains(&supplement))
        .map(|d| format!("{} may be dangerous for people with {}.", supplement, d))
        .collect();

    let (overall_safety, reasons) = if !reasons.is_empty() {
        (SafetyLevel::Danger, reasons)
    } else if !conditions.is_empty() {
        (SafetyLevel::Caution, vec![GENERIC_CAUTION.to_string()])
    } else {
        (SafetyLevel::Safe, Vec::new())
    };

    SupplementAssessment {
        name: supplement,
        overall_safety,
        reasons,
        nutrients: supplement.nutrients(),
    }
}

/// Build the full recognition record for a recognized supplement
pub fn recognition_result(supplement: Supplement, diseases: &[Disease]) -> RecognitionResult {
    let assessment = screen(supplement, diseases);
    RecognitionResult {
        supplement_name: supplement,
        total_nutrients: assessment.nutrients.clone(),
        supplements: vec![assessment],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_conditions_is_safe() {
        let result = screen(Supplement::VitaminC, &[]);
        assert_eq!(result.overall_safety, SafetyLevel::Safe);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn test_none_marker_is_ignored() {
        let result = screen(Supplement::VitaminC, &[Disease::None]);
        assert_eq!(result.overall_safety, SafetyLevel::Safe);
    }

    #[test]
    fn test_risky_ingredient_is_danger() {
        let result = screen(
            Supplement::RedGinseng,
            &[Disease::Diabetes, Disease::Hypertension, Disease::Arthritis],
        );
        assert_eq!(result.overall_safety, SafetyLevel::Danger);
        assert_eq!(result.reasons.len(), 2);
        assert!(result.reasons[0].contains("diabetes"));
        assert!(result.reasons[1].contains("hypertension"));
    }

    #[test]
    fn test_unrelated_condition_is_caution() {
        let result = screen(Supplement::VitaminC, &[Disease::Arthritis]);
        assert_eq!(result.overall_safety, SafetyLevel::Caution);
        assert_eq!(result.reasons, vec![GENERIC_CAUTION.to_string()]);
    }

    #[test]
    fn test_risk_table_lookup() {
        assert!(risky_for(Disease::Gout).contains(&Supplement::Magnesium));
        assert!(risky_for(Disease::Osteoporosis).is_empty());
    }

    #[test]
    fn test_recognition_result_shape() {
        let result = recognition_result(Supplement::Omega3, &[Disease::HeartDisease]);
        assert_eq!(result.worst_safety(), Some(SafetyLevel::Danger));

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["supplementName"], "오메가3");
        assert_eq!(json["totalNutrients"]["EPA"], "300mg");
        assert_eq!(json["supplements"][0]["overallSafety"], "danger");
    }

    #[test]
    fn test_recognition_result_from_endpoint_json() {
        let json = r#"{
            "supplementName": "비타민C",
            "totalNutrients": {"비타민C": "1000mg"},
            "supplements": [{"name": "비타민C", "overallSafety": "safe", "reasons": []}]
        }"#;
        let result: RecognitionResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.supplement_name, Supplement::VitaminC);
        assert_eq!(result.worst_safety(), Some(SafetyLevel::Safe));
    }
}
