//! Core BMI value types

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Body measurements as entered by the user
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BodyMetrics {
    /// Weight in kilograms
    pub weight: Option<f64>,

    /// Height in centimeters
    pub height: Option<f64>,
}

impl BodyMetrics {
    pub fn new(weight: f64, height: f64) -> Self {
        Self {
            weight: Some(weight),
            height: Some(height),
        }
    }

    /// BMI derived from these measurements
    pub fn bmi(&self) -> BmiValue {
        super::compute_bmi(self.weight, self.height)
    }
}

/// A body-mass-index reading, or the sentinel used when none can be computed
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BmiValue {
    Known(f64),
    #[default]
    Unknown,
}

impl BmiValue {
    /// Wrap a raw number. Negative and non-finite values are `Unknown`.
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() && value >= 0.0 {
            BmiValue::Known(value)
        } else {
            BmiValue::Unknown
        }
    }

    /// Numeric coercion of stored text; anything unparsable is `Unknown`.
    pub fn from_text(text: &str) -> Self {
        match text.trim().parse::<f64>() {
            Ok(value) => Self::from_f64(value),
            Err(_) => BmiValue::Unknown,
        }
    }

    /// The numeric value, if it can be classified
    pub fn value(&self) -> Option<f64> {
        match *self {
            BmiValue::Known(v) if v.is_finite() && v >= 0.0 => Some(v),
            _ => None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.value().is_some()
    }
}

impl From<f64> for BmiValue {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<Option<f64>> for BmiValue {
    fn from(value: Option<f64>) -> Self {
        value.map(Self::from_f64).unwrap_or(BmiValue::Unknown)
    }
}

impl From<&str> for BmiValue {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl FromStr for BmiValue {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_text(s))
    }
}

impl fmt::Display for BmiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(v) => write!(f, "{:.1}", v),
            None => write!(f, "N/A"),
        }
    }
}

impl Serialize for BmiValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value() {
            Some(v) => serializer.serialize_f64(v),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for BmiValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Stored records carry the BMI as a number, a formatted string, or a sentinel string
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Number(n)) => BmiValue::from_f64(n),
            Some(Raw::Text(s)) => BmiValue::from_text(&s),
            None => BmiValue::Unknown,
        })
    }
}

/// BMI band a reading falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BmiCategory {
    Unknown,
    Underweight,
    Normal,
    #[serde(rename = "Pre-overweight")]
    PreOverweight,
    #[serde(rename = "Obese-1")]
    Obese1,
    #[serde(rename = "Obese-2")]
    Obese2,
}

impl BmiCategory {
    /// All categories, sentinel first, then bands in ascending order
    pub const ALL: [BmiCategory; 6] = [
        BmiCategory::Unknown,
        BmiCategory::Underweight,
        BmiCategory::Normal,
        BmiCategory::PreOverweight,
        BmiCategory::Obese1,
        BmiCategory::Obese2,
    ];

    /// Canonical display label
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Unknown => "Unknown",
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::PreOverweight => "Pre-overweight",
            BmiCategory::Obese1 => "Obese-1",
            BmiCategory::Obese2 => "Obese-2",
        }
    }

    pub fn tier(&self) -> ColorTier {
        match self {
            BmiCategory::Unknown => ColorTier::Unknown,
            BmiCategory::Underweight => ColorTier::Low,
            BmiCategory::Normal => ColorTier::Healthy,
            BmiCategory::PreOverweight => ColorTier::Caution,
            BmiCategory::Obese1 => ColorTier::AtRisk,
            BmiCategory::Obese2 => ColorTier::HighRisk,
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display tier attached to each category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorTier {
    Unknown,
    Low,
    Healthy,
    Caution,
    #[serde(rename = "At-risk")]
    AtRisk,
    #[serde(rename = "High-risk")]
    HighRisk,
}

impl ColorTier {
    pub fn label(&self) -> &'static str {
        match self {
            ColorTier::Unknown => "Unknown",
            ColorTier::Low => "Low",
            ColorTier::Healthy => "Healthy",
            ColorTier::Caution => "Caution",
            ColorTier::AtRisk => "At-risk",
            ColorTier::HighRisk => "High-risk",
        }
    }

    /// Terminal color used when rendering this tier
    pub fn color(&self) -> colored::Color {
        match self {
            ColorTier::Unknown => colored::Color::White,
            ColorTier::Low => colored::Color::Blue,
            ColorTier::Healthy => colored::Color::Green,
            ColorTier::Caution => colored::Color::Yellow,
            ColorTier::AtRisk => colored::Color::Magenta,
            ColorTier::HighRisk => colored::Color::Red,
        }
    }
}

impl fmt::Display for ColorTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Exercise, diet and risk guidance for one band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub exercise: &'static str,
    pub diet: &'static str,
    pub warning: &'static str,
}

/// Everything derived from a single BMI reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiAssessment {
    pub bmi: BmiValue,
    pub category: BmiCategory,
    pub color_tier: ColorTier,
    pub recommendation: Recommendation,
}
