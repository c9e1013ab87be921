//! Configuration management for HealthBuddy
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.healthbuddy/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::errors::{HealthError, Result};

/// Complete configuration for HealthBuddy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
}

/// Terminal output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub default_verbosity: String,
    pub color_output: bool,
}

/// File system paths configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub profile_dir: String,
    pub history_file: String,
}

/// Profile selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// User id used when `--user` is not given
    pub default_uid: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_verbosity: "normal".to_string(),
            color_output: true,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            profile_dir: "~/.healthbuddy/profiles".to_string(),
            history_file: "~/.healthbuddy/history.json".to_string(),
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            default_uid: "local".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| HealthError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| HealthError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Standard config location, if a home directory exists
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".healthbuddy").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        match self.display.default_verbosity.as_str() {
            "quiet" | "normal" | "verbose" | "very_verbose" => {}
            _ => return Err(HealthError::ConfigError(
                format!("Invalid verbosity level: {}", self.display.default_verbosity)
            )),
        }

        if self.paths.profile_dir.trim().is_empty() {
            return Err(HealthError::ConfigError(
                "profile_dir must not be empty".to_string()
            ));
        }

        if self.paths.history_file.trim().is_empty() {
            return Err(HealthError::ConfigError(
                "history_file must not be empty".to_string()
            ));
        }

        let uid = &self.profile.default_uid;
        if uid.is_empty() || !uid.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(HealthError::ConfigError(
                format!("Invalid default_uid: {:?}", uid)
            ));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| HealthError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| HealthError::ConfigError(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| HealthError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Directory holding profile documents
    pub fn profile_dir(&self) -> PathBuf {
        Self::expand_path(&self.paths.profile_dir)
    }

    /// History log file
    pub fn history_file(&self) -> PathBuf {
        Self::expand_path(&self.paths.history_file)
    }
}
