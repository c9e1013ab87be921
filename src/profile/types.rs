//! Health profile record as kept by the profile store

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::bmi::{assess, compute_bmi, BmiAssessment, BmiValue, BodyMetrics};
use crate::errors::HealthError;

/// Pre-existing condition recorded on a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Disease {
    Diabetes,
    Hypertension,
    HeartDisease,
    Arthritis,
    KidneyDisease,
    Gout,
    Osteoporosis,
    LiverDisease,
    Other,
    /// Explicit "no conditions" choice
    None,
}

impl Disease {
    pub const ALL: [Disease; 10] = [
        Disease::Diabetes,
        Disease::Hypertension,
        Disease::HeartDisease,
        Disease::Arthritis,
        Disease::KidneyDisease,
        Disease::Gout,
        Disease::Osteoporosis,
        Disease::LiverDisease,
        Disease::Other,
        Disease::None,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Disease::Diabetes => "diabetes",
            Disease::Hypertension => "hypertension",
            Disease::HeartDisease => "heart disease",
            Disease::Arthritis => "arthritis",
            Disease::KidneyDisease => "kidney disease",
            Disease::Gout => "gout",
            Disease::Osteoporosis => "osteoporosis",
            Disease::LiverDisease => "liver disease",
            Disease::Other => "other",
            Disease::None => "none",
        }
    }

    /// Label used by stored profile records
    pub fn label_ko(&self) -> &'static str {
        match self {
            Disease::Diabetes => "당뇨병",
            Disease::Hypertension => "고혈압",
            Disease::HeartDisease => "심장병",
            Disease::Arthritis => "관절염",
            Disease::KidneyDisease => "신장질환",
            Disease::Gout => "통풍",
            Disease::Osteoporosis => "골다공증",
            Disease::LiverDisease => "간질환",
            Disease::Other => "기타",
            Disease::None => "없음",
        }
    }

    /// True for an actual condition (not the "none" marker)
    pub fn is_condition(&self) -> bool {
        !matches!(self, Disease::None)
    }
}

impl FromStr for Disease {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        // Older records carry the misspelled osteoporosis label
        if needle == "골다골증" {
            return Ok(Disease::Osteoporosis);
        }

        let normalized = needle.to_lowercase().replace(['_', '-'], " ");
        Disease::ALL
            .into_iter()
            .find(|d| d.label_ko() == needle || d.name() == normalized)
            .ok_or_else(|| HealthError::Generic(format!("Unknown disease: {}", s)))
    }
}

impl TryFrom<String> for Disease {
    type Error = HealthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Disease> for String {
    fn from(disease: Disease) -> Self {
        disease.label_ko().to_string()
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unspecified => "unspecified",
        };
        f.write_str(label)
    }
}

/// Self-reported activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    #[serde(alias = "낮음")]
    Low,
    #[serde(alias = "보통")]
    Moderate,
    #[serde(alias = "높음")]
    High,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl FromStr for Gender {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "남성" => Ok(Gender::Male),
            "female" | "f" | "여성" => Ok(Gender::Female),
            "" | "unspecified" => Ok(Gender::Unspecified),
            _ => Err(HealthError::Generic(format!("Unknown gender: {}", s))),
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "낮음" => Ok(ActivityLevel::Low),
            "moderate" | "보통" => Ok(ActivityLevel::Moderate),
            "high" | "높음" => Ok(ActivityLevel::High),
            "" | "unspecified" => Ok(ActivityLevel::Unspecified),
            _ => Err(HealthError::Generic(format!("Unknown activity level: {}", s))),
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActivityLevel::Low => "low",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::High => "high",
            ActivityLevel::Unspecified => "unspecified",
        };
        f.write_str(label)
    }
}

/// A user's health profile
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,

    #[serde(default, deserialize_with = "lenient_number")]
    pub age: Option<f64>,

    #[serde(default)]
    pub gender: Gender,

    /// Kilograms
    #[serde(default, deserialize_with = "lenient_number")]
    pub weight: Option<f64>,

    /// Centimeters
    #[serde(default, deserialize_with = "lenient_number")]
    pub height: Option<f64>,

    #[serde(default)]
    pub bmi: BmiValue,

    #[serde(default)]
    pub diseases: Vec<Disease>,

    #[serde(default)]
    pub activity_level: ActivityLevel,
}

impl UserProfile {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            ..Default::default()
        }
    }

    pub fn body_metrics(&self) -> BodyMetrics {
        BodyMetrics {
            weight: self.weight,
            height: self.height,
        }
    }

    /// Update measurements and recompute the stored BMI
    pub fn set_measurements(&mut self, weight: Option<f64>, height: Option<f64>) {
        self.weight = weight;
        self.height = height;
        self.refresh_bmi();
    }

    /// Recompute `bmi` from weight and height
    pub fn refresh_bmi(&mut self) -> BmiValue {
        self.bmi = compute_bmi(self.weight, self.height);
        self.bmi
    }

    /// Classification of the stored BMI
    pub fn assessment(&self) -> BmiAssessment {
        assess(self.bmi)
    }

    /// Recorded conditions, excluding the "none" marker
    pub fn conditions(&self) -> impl Iterator<Item = Disease> + '_ {
        self.diseases.iter().copied().filter(Disease::is_condition)
    }
}

/// Accept a number, a numeric string, an empty string or null
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) if n.is_finite() => Some(n),
        Some(Raw::Text(s)) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmi::BmiCategory;

    #[test]
    fn test_disease_parsing() {
        assert_eq!("고혈압".parse::<Disease>().unwrap(), Disease::Hypertension);
        assert_eq!("heart_disease".parse::<Disease>().unwrap(), Disease::HeartDisease);
        assert_eq!("Kidney Disease".parse::<Disease>().unwrap(), Disease::KidneyDisease);
        assert_eq!("골다골증".parse::<Disease>().unwrap(), Disease::Osteoporosis);
        assert!("scurvy".parse::<Disease>().is_err());
    }

    #[test]
    fn test_profile_from_stored_record() {
        let json = r#"{
            "uid": "abc",
            "age": "34",
            "gender": "female",
            "weight": "70",
            "height": 175,
            "bmi": "22.9",
            "diseases": ["당뇨병", "없음"],
            "activityLevel": "보통"
        }"#;

        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.age, Some(34.0));
        assert_eq!(profile.gender, Gender::Female);
        assert_eq!(profile.weight, Some(70.0));
        assert_eq!(profile.bmi, BmiValue::Known(22.9));
        assert_eq!(profile.activity_level, ActivityLevel::Moderate);
        assert_eq!(profile.conditions().collect::<Vec<_>>(), vec![Disease::Diabetes]);
    }

    #[test]
    fn test_profile_sparse_record() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"uid": "x", "gender": "", "weight": ""}"#).unwrap();
        assert_eq!(profile.gender, Gender::Unspecified);
        assert_eq!(profile.weight, None);
        assert_eq!(profile.bmi, BmiValue::Unknown);
        assert_eq!(profile.assessment().category, BmiCategory::Unknown);
    }

    #[test]
    fn test_set_measurements_refreshes_bmi() {
        let mut profile = UserProfile::new("u1");
        profile.set_measurements(Some(70.0), Some(175.0));
        assert_eq!(profile.bmi, BmiValue::Known(22.9));
        assert_eq!(profile.assessment().category, BmiCategory::Normal);

        profile.set_measurements(Some(70.0), None);
        assert_eq!(profile.bmi, BmiValue::Unknown);
    }

    #[test]
    fn test_gender_and_activity_parsing() {
        assert_eq!("Female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("높음".parse::<ActivityLevel>().unwrap(), ActivityLevel::High);
        assert!("sometimes".parse::<ActivityLevel>().is_err());
    }

    #[test]
    fn test_diseases_serialize_as_stored_labels() {
        let mut profile = UserProfile::new("u1");
        profile.diseases = vec![Disease::Gout];
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("\"통풍\""));
        assert!(json.contains("\"activityLevel\":\"unspecified\""));
    }
}
