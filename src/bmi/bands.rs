//! BMI band table and the operations that read it
//!
//! One ordered table drives both classification and recommendation:
//!
//! ```text
//! band(b) = first row r in BANDS with b < r.upper_exclusive
//! ```
//!
//! Rows are ascending and the last bound is +∞, so every finite
//! non-negative reading lands in exactly one row.

use super::types::{BmiAssessment, BmiCategory, BmiValue, Recommendation};

/// One row of the band table
#[derive(Debug, Clone, Copy)]
pub struct Band {
    /// Readings strictly below this bound (and not below a previous one) fall here
    pub upper_exclusive: f64,
    pub category: BmiCategory,
    pub recommendation: Recommendation,
}

/// Band table, ascending by upper bound
pub const BANDS: [Band; 5] = [
    Band {
        upper_exclusive: 18.5,
        category: BmiCategory::Underweight,
        recommendation: Recommendation {
            exercise: "Strength-focused training (weight training, squats, push-ups)",
            diet: "High-protein diet with plenty of carbohydrates",
            warning: "Risk of undernutrition and low muscle mass",
        },
    },
    Band {
        upper_exclusive: 23.0,
        category: BmiCategory::Normal,
        recommendation: Recommendation {
            exercise: "Cardio and strength training (jogging, planks, yoga)",
            diet: "Balanced diet (carbohydrate:protein:fat = 5:3:2)",
            warning: "Healthy range, keep it up",
        },
    },
    Band {
        upper_exclusive: 25.0,
        category: BmiCategory::PreOverweight,
        recommendation: Recommendation {
            exercise: "Mostly cardio plus strength training aimed at weight loss",
            diet: "Low sugar and low fat, fewer late-night snacks, plenty of water",
            warning: "Body fat may be increasing",
        },
    },
    Band {
        upper_exclusive: 30.0,
        category: BmiCategory::Obese1,
        recommendation: Recommendation {
            exercise: "High-intensity exercise and full-body strength training",
            diet: "Low-carbohydrate, high-protein meals with fewer processed foods",
            warning: "Higher risk of lifestyle diseases (diabetes, hypertension)",
        },
    },
    Band {
        upper_exclusive: f64::INFINITY,
        category: BmiCategory::Obese2,
        recommendation: Recommendation {
            exercise: "Consult a professional before starting; build up gradually from walking",
            diet: "Professional nutrition counselling recommended; strict management needed",
            warning: "Increased likelihood of chronic disease; medical management needed",
        },
    },
];

/// Guidance returned when no BMI is available
pub const MISSING_MEASUREMENTS: Recommendation = Recommendation {
    exercise: "Enter your height and weight to calculate your BMI.",
    diet: "Enter your height and weight to calculate your BMI.",
    warning: "No BMI on record, so no tailored recommendation is possible. Please complete your profile.",
};

/// Round to one fractional digit on the exact binary value, exact ties up
///
/// A quotient stored just below a `.x5` tie (73.8 / 2.0² = 18.4499...)
/// rounds down. Computed on the mantissa:
///
/// ```text
/// v = m · 2^-k   →   tenths = ⌊(20m + 2^k) / 2^(k+1)⌋ = ⌊10v + ½⌋
/// ```
fn round_one_decimal(value: f64) -> f64 {
    if !value.is_finite() || value < 0.0 {
        return value;
    }

    let bits = value.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased - 1075)
    };

    // Integral already
    if exponent >= 0 {
        return value;
    }

    let shift = exponent.unsigned_abs();
    // v < 2^-5, so 10v + ½ < 1
    if shift >= 58 {
        return 0.0;
    }

    let tenths = (20 * mantissa + (1u64 << shift)) >> (shift + 1);
    tenths as f64 / 10.0
}

/// Compute BMI from weight (kg) and height (cm)
///
/// Returns `Unknown` when either measurement is missing, non-positive or
/// not finite.
pub fn compute_bmi(weight: Option<f64>, height: Option<f64>) -> BmiValue {
    match (weight, height) {
        (Some(w), Some(h)) if w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0 => {
            let meters = h / 100.0;
            BmiValue::from_f64(round_one_decimal(w / (meters * meters)))
        }
        _ => BmiValue::Unknown,
    }
}

/// Row of the band table a reading falls into, `None` for the sentinel
pub fn band_for(bmi: impl Into<BmiValue>) -> Option<&'static Band> {
    let value = bmi.into().value()?;
    BANDS.iter().find(|band| value < band.upper_exclusive)
}

/// Category for a BMI reading
pub fn classify(bmi: impl Into<BmiValue>) -> BmiCategory {
    band_for(bmi)
        .map(|band| band.category)
        .unwrap_or(BmiCategory::Unknown)
}

/// Exercise, diet and warning guidance for a BMI reading
pub fn recommend(bmi: impl Into<BmiValue>) -> Recommendation {
    band_for(bmi)
        .map(|band| band.recommendation)
        .unwrap_or(MISSING_MEASUREMENTS)
}

/// Category, tier and recommendation in one lookup
pub fn assess(bmi: impl Into<BmiValue>) -> BmiAssessment {
    let bmi = bmi.into();
    let (category, recommendation) = match band_for(bmi) {
        Some(band) => (band.category, band.recommendation),
        None => (BmiCategory::Unknown, MISSING_MEASUREMENTS),
    };

    BmiAssessment {
        bmi,
        category,
        color_tier: category.tier(),
        recommendation,
    }
}

/// Recommendation attached to a category in the band table
pub fn recommendation_for(category: BmiCategory) -> Recommendation {
    BANDS
        .iter()
        .find(|band| band.category == category)
        .map(|band| band.recommendation)
        .unwrap_or(MISSING_MEASUREMENTS)
}
