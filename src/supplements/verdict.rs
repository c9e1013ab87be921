//! Suitability verdicts returned by the reasoning endpoint
//!
//! The endpoint answers in free text that should contain one JSON object.
//! Extraction prefers a fenced ```json block and otherwise takes the first
//! balanced `{...}` using bracket matching:
//!
//! ```text
//! depth ← 0, start ← None
//! for each char c outside string literals:
//!   '{' → if depth = 0 { start ← i }; depth += 1
//!   '}' → depth -= 1; if depth = 0 { return text[start..=i] }
//! ```

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{HealthError, Result};
use crate::profile::{Disease, Gender, UserProfile};
use super::screening::RecognitionResult;

/// Confidence reported when no usable verdict was produced
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Structured answer to "should this user take this supplement?"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuitabilityVerdict {
    /// `None` when the model could not decide
    #[serde(default)]
    pub should_take: Option<bool>,

    #[serde(default = "default_confidence", deserialize_with = "clamped_confidence")]
    pub confidence: f64,

    #[serde(default)]
    pub reasoning: String,

    #[serde(default)]
    pub precautions: Vec<String>,

    #[serde(default)]
    pub alternatives: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage_recommendation: Option<String>,
}

/// Three-way reading of `should_take`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suitability {
    Recommended,
    NotRecommended,
    Undetermined,
}

impl Suitability {
    pub fn label(&self) -> &'static str {
        match self {
            Suitability::Recommended => "Recommended",
            Suitability::NotRecommended => "Not recommended",
            Suitability::Undetermined => "Undetermined",
        }
    }
}

impl SuitabilityVerdict {
    /// Verdict used whenever the reply cannot be read
    pub fn fallback() -> Self {
        Self {
            should_take: None,
            confidence: FALLBACK_CONFIDENCE,
            reasoning: "Analysis failed. Please consult a medical professional.".to_string(),
            precautions: vec!["Consult a medical professional before taking it".to_string()],
            alternatives: Vec::new(),
            dosage_recommendation: Some("Decide after consulting a professional".to_string()),
        }
    }

    pub fn suitability(&self) -> Suitability {
        match self.should_take {
            Some(true) => Suitability::Recommended,
            Some(false) => Suitability::NotRecommended,
            None => Suitability::Undetermined,
        }
    }

    /// Confidence as a whole percentage
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

fn default_confidence() -> f64 {
    FALLBACK_CONFIDENCE
}

fn clamped_confidence<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(match raw {
        Some(c) if c.is_finite() => c.clamp(0.0, 1.0),
        _ => FALLBACK_CONFIDENCE,
    })
}

/// Byte range of the first balanced top-level object in `text`
fn find_balanced_object(text: &str) -> Option<(usize, usize)> {
    let mut depth: usize = 0;
    let mut start: Option<usize> = None;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in text.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        if ch == '\\' && in_string {
            escape_next = true;
            continue;
        }

        if ch == '"' {
            // Quotes only matter once an object has started
            if start.is_some() {
                in_string = !in_string;
            }
            continue;
        }

        if in_string {
            continue;
        }

        match ch {
            '{' => {
                if depth == 0 {
                    start = Some(i);
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return start.map(|s| (s, i));
                }
            }
            _ => {}
        }
    }

    None
}

/// Pull the JSON object out of a free-text reply
pub fn extract_json_object(reply: &str) -> Option<&str> {
    const FENCE: &str = "```json";

    let body = match reply.find(FENCE) {
        Some(open) => {
            let rest = &reply[open + FENCE.len()..];
            match rest.find("```") {
                Some(close) => &rest[..close],
                None => rest,
            }
        }
        None => reply,
    };

    find_balanced_object(body).map(|(start, end)| &body[start..=end])
}

/// Parse a verdict from a reply
pub fn parse_verdict(reply: &str) -> Result<SuitabilityVerdict> {
    let json = extract_json_object(reply).ok_or_else(|| {
        HealthError::VerdictParseError("No JSON object found in reply".to_string())
    })?;

    serde_json::from_str(json)
        .map_err(|e| HealthError::VerdictParseError(format!("Invalid verdict JSON: {}", e)))
}

/// Parse a verdict, substituting the "consult a professional" fallback on failure
pub fn parse_verdict_or_fallback(reply: &str) -> SuitabilityVerdict {
    parse_verdict(reply).unwrap_or_else(|_| SuitabilityVerdict::fallback())
}

/// User attributes shared with the reasoning endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub uid: String,
    pub age: Option<f64>,
    pub gender: Gender,
    pub diseases: Vec<Disease>,
}

/// Request body for a suitability analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuitabilityRequest {
    pub user_info: UserInfo,
    pub recognition: RecognitionResult,
}

impl SuitabilityRequest {
    pub fn new(profile: &UserProfile, recognition: RecognitionResult) -> Self {
        Self {
            user_info: UserInfo {
                uid: profile.uid.clone(),
                age: profile.age,
                gender: profile.gender,
                diseases: profile.conditions().collect(),
            },
            recognition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::supplements::{recognition_result, Supplement};

    #[test]
    fn test_parse_plain_object() {
        let reply = r#"{"shouldTake": true, "confidence": 0.82, "reasoning": "Fine", "precautions": [], "alternatives": []}"#;
        let verdict = parse_verdict(reply).unwrap();
        assert_eq!(verdict.suitability(), Suitability::Recommended);
        assert_eq!(verdict.confidence_percent(), 82);
    }

    #[test]
    fn test_parse_fenced_block_with_chatter() {
        let reply = "Here is my assessment {not json}\n```json\n{\"shouldTake\": false, \"confidence\": 0.9, \"reasoning\": \"Interacts with {medication}\", \"precautions\": [\"Ask your doctor\"]}\n```\nThanks!";
        let verdict = parse_verdict(reply).unwrap();
        assert_eq!(verdict.suitability(), Suitability::NotRecommended);
        assert_eq!(verdict.reasoning, "Interacts with {medication}");
        assert_eq!(verdict.precautions, vec!["Ask your doctor".to_string()]);
        assert!(verdict.alternatives.is_empty());
    }

    #[test]
    fn test_braces_inside_strings_are_ignored() {
        let reply = r#"Answer: {"shouldTake": null, "reasoning": "use \"}\" carefully", "confidence": 0.4} trailing }"#;
        let json = extract_json_object(reply).unwrap();
        assert!(json.ends_with("0.4}"));
        let verdict = parse_verdict(reply).unwrap();
        assert_eq!(verdict.suitability(), Suitability::Undetermined);
    }

    #[test]
    fn test_confidence_is_clamped() {
        let verdict = parse_verdict(r#"{"shouldTake": true, "confidence": 7}"#).unwrap();
        assert_eq!(verdict.confidence, 1.0);

        let verdict = parse_verdict(r#"{"shouldTake": true}"#).unwrap();
        assert_eq!(verdict.confidence, FALLBACK_CONFIDENCE);
    }

    #[test]
    fn test_no_object_is_an_error() {
        assert!(matches!(
            parse_verdict("I cannot answer that."),
            Err(HealthError::VerdictParseError(_))
        ));
    }

    #[test]
    fn test_fallback_on_garbage() {
        let verdict = parse_verdict_or_fallback("{ shouldTake: maybe }");
        assert_eq!(verdict, SuitabilityVerdict::fallback());
        assert_eq!(verdict.confidence_percent(), 50);
        assert_eq!(verdict.suitability(), Suitability::Undetermined);
    }

    #[test]
    fn test_request_excludes_none_marker() {
        let mut profile = UserProfile::new("u1");
        profile.diseases = vec![Disease::None, Disease::Gout];
        let recognition = recognition_result(Supplement::Calcium, &profile.diseases);

        let request = SuitabilityRequest::new(&profile, recognition);
        assert_eq!(request.user_info.diseases, vec![Disease::Gout]);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["userInfo"]["uid"], "u1");
        assert_eq!(json["recognition"]["supplements"][0]["overallSafety"], "danger");
    }
}
