//! Supplement analysis flow: profile -> screening -> verdict -> history
//!
//! Runs the whole path against temp-dir stores, no network involved.

use chrono::Utc;
use healthbuddy::history::{History, HistoryEntry, HistoryFilter};
use healthbuddy::profile::{Disease, JsonProfileStore, ProfileStore, UserProfile};
use healthbuddy::supplements::{
    parse_verdict_or_fallback, recognition_result, SafetyLevel, Suitability, SuitabilityRequest,
    Supplement,
};
use tempfile::TempDir;

fn stored_profile(dir: &TempDir) -> JsonProfileStore {
    let mut store = JsonProfileStore::new(dir.path().join("profiles")).unwrap();
    let mut profile = UserProfile::new("patient-7");
    profile.set_measurements(Some(88.0), Some(170.0));
    profile.diseases = vec![Disease::Hypertension, Disease::Arthritis];
    store.save(&profile).unwrap();
    store
}

#[test]
fn test_full_analysis_flow() {
    let dir = TempDir::new().unwrap();
    let store = stored_profile(&dir);
    let profile = store.load("patient-7").unwrap();

    let recognition = recognition_result(Supplement::RedGinseng, &profile.diseases);
    assert_eq!(recognition.worst_safety(), Some(SafetyLevel::Danger));
    assert_eq!(recognition.supplements[0].reasons.len(), 1);

    let request = SuitabilityRequest::new(&profile, recognition.clone());
    assert_eq!(request.user_info.diseases.len(), 2);

    let reply = "```json\n{\"shouldTake\": false, \"confidence\": 0.87, \"reasoning\": \"Ginseng can raise blood pressure.\", \"precautions\": [\"Monitor blood pressure\"], \"alternatives\": [\"Magnesium\"]}\n```";
    let verdict = parse_verdict_or_fallback(reply);
    assert_eq!(verdict.suitability(), Suitability::NotRecommended);
    assert_eq!(verdict.confidence_percent(), 87);

    let history_path = dir.path().join("history.json");
    let mut history = History::load(&history_path).unwrap();
    history.record(HistoryEntry::new(
        &recognition,
        Some("ginseng.jpg".to_string()),
        Some(verdict.clone()),
    ));
    history.save(&history_path).unwrap();

    let reloaded = History::load(&history_path).unwrap();
    let filter = HistoryFilter {
        search: Some("ginseng".to_string()),
        date: Some(Utc::now().date_naive()),
    };
    let found: Vec<_> = reloaded.filter(&filter).collect();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].suitability.as_ref(), Some(&verdict));
    assert_eq!(found[0].image_name.as_deref(), Some("ginseng.jpg"));
    assert_eq!(found[0].worst_safety(), Some(SafetyLevel::Danger));
    assert_eq!(found[0].supplements, recognition.supplements);
}

#[test]
fn test_profile_without_conditions_is_safe() {
    let profile = UserProfile::new("healthy");
    let recognition = recognition_result(Supplement::Omega3, &profile.diseases);
    assert_eq!(recognition.worst_safety(), Some(SafetyLevel::Safe));
    assert_eq!(recognition.total_nutrients.get("DHA").map(String::as_str), Some("200mg"));
}

#[test]
fn test_unreadable_reply_falls_back() {
    let verdict = parse_verdict_or_fallback("Sorry, I can't help with that.");
    assert_eq!(verdict.suitability(), Suitability::Undetermined);
    assert_eq!(verdict.confidence_percent(), 50);
    assert!(!verdict.precautions.is_empty());
}
