//! BMI classifier integration tests
//!
//! Exercises the public API the way the profile and CLI layers use it.

use healthbuddy::bmi::exercise::plan_for;
use healthbuddy::bmi::{exercise_plan, BodyMetrics, ColorTier, BANDS};
use healthbuddy::profile::UserProfile;
use healthbuddy::{assess, classify, compute_bmi, recommend, BmiCategory, BmiValue};
use quickcheck_macros::quickcheck;

#[test]
fn test_reference_scenario() {
    let bmi = BodyMetrics::new(70.0, 175.0).bmi();
    assert_eq!(bmi, BmiValue::Known(22.9));
    assert_eq!(classify(bmi), BmiCategory::Normal);
}

#[test]
fn test_readings_just_below_a_boundary_stay_below() {
    let cases = [
        (73.8, BmiValue::Known(18.4), BmiCategory::Underweight),
        (91.8, BmiValue::Known(22.9), BmiCategory::Normal),
        (99.8, BmiValue::Known(24.9), BmiCategory::PreOverweight),
        (119.8, BmiValue::Known(29.9), BmiCategory::Obese1),
    ];

    for (weight, bmi, category) in cases {
        let computed = BodyMetrics::new(weight, 200.0).bmi();
        assert_eq!(computed, bmi, "weight {}", weight);
        assert_eq!(classify(computed), category, "weight {}", weight);
    }
}

#[test]
fn test_boundary_table() {
    let cases = [
        (18.5, BmiCategory::Normal, ColorTier::Healthy),
        (23.0, BmiCategory::PreOverweight, ColorTier::Caution),
        (25.0, BmiCategory::Obese1, ColorTier::AtRisk),
        (30.0, BmiCategory::Obese2, ColorTier::HighRisk),
    ];

    for (bmi, category, tier) in cases {
        let assessment = assess(bmi);
        assert_eq!(assessment.category, category, "bmi {}", bmi);
        assert_eq!(assessment.color_tier, tier, "bmi {}", bmi);
    }
}

#[test]
fn test_unknown_guidance() {
    let assessment = assess(compute_bmi(None, Some(170.0)));
    assert_eq!(assessment.category, BmiCategory::Unknown);
    assert_eq!(assessment.color_tier, ColorTier::Unknown);
    assert!(assessment.recommendation.diet.contains("height and weight"));
    assert!(assessment.recommendation.warning.contains("profile"));
}

#[test]
fn test_recommend_and_plan_follow_classify() {
    for tenths in 0..=500 {
        let bmi = tenths as f64 / 10.0;
        let band = BANDS
            .iter()
            .find(|b| b.category == classify(bmi))
            .expect("known readings always have a band");
        assert_eq!(recommend(bmi), band.recommendation, "bmi {}", bmi);
        assert_eq!(exercise_plan(bmi), plan_for(band.category), "bmi {}", bmi);
    }
}

#[test]
fn test_stored_profile_bmi_string() {
    let profile: UserProfile =
        serde_json::from_str(r#"{"uid": "u", "weight": 95, "height": 178, "bmi": "30.0"}"#).unwrap();
    assert_eq!(profile.assessment().category, BmiCategory::Obese2);

    let legacy: UserProfile =
        serde_json::from_str(r#"{"uid": "u", "bmi": "알수 없음"}"#).unwrap();
    assert_eq!(legacy.assessment().category, BmiCategory::Unknown);
}

#[test]
fn test_assessment_json_shape() {
    let json = serde_json::to_value(assess(24.2)).unwrap();
    assert_eq!(json["bmi"], 24.2);
    assert_eq!(json["category"], "Pre-overweight");
    assert_eq!(json["colorTier"], "Caution");
    assert!(json["recommendation"]["exercise"].is_string());
}

#[quickcheck]
fn prop_pure_and_repeatable(bmi: f64) -> bool {
    let first = serde_json::to_string(&assess(bmi)).unwrap();
    let second = serde_json::to_string(&assess(bmi)).unwrap();
    first == second && classify(bmi) == classify(bmi)
}

#[quickcheck]
fn prop_non_positive_measurements_are_unknown(weight: f64, height: f64) -> bool {
    if weight > 0.0 && height > 0.0 && weight.is_finite() && height.is_finite() {
        return true;
    }
    compute_bmi(Some(weight), Some(height)) == BmiValue::Unknown
}
