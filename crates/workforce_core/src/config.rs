//! Run configuration.
//!
//! # Responsibility
//! - Select or declare the ruleset for one analysis.
//! - Carry the curated keyword lists used by the anomaly sweeps.
//!
//! # Invariants
//! - Every field has a default, so an empty JSON object is a valid config.
//! - Configuration errors surface before any resolution starts.

use crate::anomaly::title_fit::TitleFitConfig;
use crate::anomaly::university::UniversityRules;
use crate::rules::ruleset::{Ruleset, RulesetConfig, RulesetError, RULESET_NETWORK};
use crate::service::timeline_service::TimelineOptions;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    Ruleset(RulesetError),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
            Self::Ruleset(err) => write!(f, "invalid ruleset: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Ruleset(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<RulesetError> for ConfigError {
    fn from(value: RulesetError) -> Self {
        Self::Ruleset(value)
    }
}

/// Built-in ruleset name or an inline declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RulesetChoice {
    Builtin(String),
    Custom(RulesetConfig),
}

impl Default for RulesetChoice {
    fn default() -> Self {
        Self::Builtin(RULESET_NETWORK.to_string())
    }
}

/// Configuration of one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub ruleset: RulesetChoice,
    pub last_job_cutoff: Option<i32>,
    pub university: UniversityRules,
    pub title_fit: TitleFitConfig,
}

impl AnalysisConfig {
    /// Parses and validates a config from JSON text.
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    pub fn load_json(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Validates cross-field constraints, including the ruleset itself.
    pub fn validate(&self) -> ConfigResult<()> {
        self.build_ruleset()?;
        if let Some(cutoff) = self.last_job_cutoff {
            if !(1000..=9999).contains(&cutoff) {
                return Err(ConfigError::Invalid(format!(
                    "last_job_cutoff must be a 4-digit year, got {cutoff}"
                )));
            }
        }
        if self.title_fit.top_terms == 0 {
            return Err(ConfigError::Invalid(
                "title_fit.top_terms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the configured ruleset.
    pub fn build_ruleset(&self) -> ConfigResult<Ruleset> {
        let ruleset = match &self.ruleset {
            RulesetChoice::Builtin(name) => Ruleset::builtin(name)?,
            RulesetChoice::Custom(config) => Ruleset::from_config(config.clone())?,
        };
        Ok(ruleset)
    }

    pub fn timeline_options(&self) -> TimelineOptions {
        TimelineOptions {
            last_job_cutoff: self.last_job_cutoff,
        }
    }
}
