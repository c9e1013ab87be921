//! Error types for HealthBuddy
//!
//! Missing or invalid body measurements are never errors (they classify as
//! `Unknown`); these variants cover the stores, configuration and verdict
//! parsing around the classifier.

use thiserror::Error;

/// Main error type for HealthBuddy
#[derive(Error, Debug)]
pub enum HealthError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Profile lookup errors
    #[error("Profile not found for user {uid}")]
    ProfileNotFound { uid: String },

    /// Profile store errors
    #[error("Profile store error: {0}")]
    ProfileStoreError(String),

    /// History log errors
    #[error("History error: {0}")]
    HistoryError(String),

    /// Unrecognized supplement label
    #[error("Unknown supplement: {0}")]
    UnknownSupplement(String),

    /// Suitability verdict could not be read from a reply
    #[error("Verdict parse error: {0}")]
    VerdictParseError(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic errors with context
    #[error("HealthBuddy error: {0}")]
    Generic(String),
}

/// Result type alias for HealthBuddy operations
pub type Result<T> = std::result::Result<T, HealthError>;

/// Convert anyhow errors to HealthError
impl From<anyhow::Error> for HealthError {
    fn from(err: anyhow::Error) -> Self {
        HealthError::Generic(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HealthError::ProfileNotFound {
            uid: "user-42".to_string(),
        };
        assert!(err.to_string().contains("user-42"));
    }

    #[test]
    fn test_unknown_supplement_error() {
        let err = HealthError::UnknownSupplement("Unobtainium".to_string());
        assert!(err.to_string().contains("Unobtainium"));
    }

    #[test]
    fn test_from_anyhow() {
        let err: HealthError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, HealthError::Generic(ref m) if m == "boom"));
    }
}
