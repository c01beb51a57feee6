//! Engine configuration.
//!
//! Every field has a default, so an empty document is a valid configuration.
//!
//! ```yaml
//! languages:
//!   unsegmented: ["yue"]
//!   replace_builtin: false
//! scoring:
//!   bands:
//!     excellent: 0.8
//!     good: 0.6
//!     fair: 0.4
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::language::LanguageProfile;
use crate::matcher::TermMatcher;
use crate::types::ScoreBand;

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Language classification
    #[serde(default)]
    pub languages: LanguageConfig,

    /// Score presentation
    #[serde(default)]
    pub scoring: ScoringConfig,
}

impl EngineConfig {
    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file. `.json` is JSON, anything else YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        if path.extension().map(|e| e == "json").unwrap_or(false) {
            Self::from_json(&contents)
        } else {
            Self::from_yaml(&contents)
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.scoring.bands.validate()
    }

    /// Build the language profile described by this configuration.
    pub fn language_profile(&self) -> LanguageProfile {
        let base = if self.languages.replace_builtin {
            LanguageProfile::empty()
        } else {
            LanguageProfile::new()
        };
        base.with_unsegmented(&self.languages.unsegmented)
    }

    /// Build a matcher using this configuration's language profile.
    pub fn matcher(&self) -> TermMatcher {
        TermMatcher::with_profile(self.language_profile())
    }
}

/// Language classification settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LanguageConfig {
    /// Extra language codes whose scripts do not delimit words
    #[serde(default)]
    pub unsegmented: Vec<String>,

    /// Use only `unsegmented`, dropping the built-in set
    #[serde(default)]
    pub replace_builtin: bool,
}

/// Score presentation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScoringConfig {
    #[serde(default)]
    pub bands: BandThresholds,
}

/// Lower bounds of each score band. Scores below `fair` are poor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BandThresholds {
    #[serde(default = "default_excellent")]
    pub excellent: f64,

    #[serde(default = "default_good")]
    pub good: f64,

    #[serde(default = "default_fair")]
    pub fair: f64,
}

fn default_excellent() -> f64 {
    0.8
}

fn default_good() -> f64 {
    0.6
}

fn default_fair() -> f64 {
    0.4
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            excellent: 0.8,
            good: 0.6,
            fair: 0.4,
        }
    }
}

impl BandThresholds {
    /// Band a score.
    pub fn band(&self, score: f64) -> ScoreBand {
        if score >= self.excellent {
            ScoreBand::Excellent
        } else if score >= self.good {
            ScoreBand::Good
        } else if score >= self.fair {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }

    /// Thresholds must lie in `[0, 1]` and be non-increasing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("excellent", self.excellent),
            ("good", self.good),
            ("fair", self.fair),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ValidationError(format!(
                    "scoring.bands.{} must be between 0 and 1, got {}",
                    name, value
                )));
            }
        }

        if self.excellent < self.good || self.good < self.fair {
            return Err(ConfigError::ValidationError(
                "scoring.bands must satisfy excellent >= good >= fair".to_string(),
            ));
        }

        Ok(())
    }
}
