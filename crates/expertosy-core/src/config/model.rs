//! Configuration data structures

use super::logging_config::LoggingConfig;
use crate::error::{ExpertosyError, ExpertosyResult};
use crate::questionnaire::ParserKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Default recommendation backend
pub const DEFAULT_API_URL: &str = "https://api.expertosy.com";

/// Directory under the home directory holding config and history
pub const APP_DIR_NAME: &str = ".expertosy";

/// Root of the per-user data directory (`~/.expertosy`)
pub fn app_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_default().join(APP_DIR_NAME)
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub questionnaire: QuestionnaireConfig,
    pub history: HistoryConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Default location of the configuration file
    pub fn default_path() -> PathBuf {
        app_dir().join("config.toml")
    }

    /// Merge with another configuration; `other` wins
    pub fn merge(&mut self, other: Config) {
        self.api = other.api;
        self.questionnaire = other.questionnaire;
        self.history.merge(other.history);
        self.logging.merge(other.logging);
    }

    /// Validate the configuration
    pub fn validate(&self) -> ExpertosyResult<()> {
        self.api.validate()?;

        if self.history.max_records == 0 {
            return Err(ExpertosyError::config(
                "history.max_records must be greater than 0",
            ));
        }

        if !self.logging.has_known_level() {
            return Err(ExpertosyError::config_with_context(
                format!("Unknown log level '{}'", self.logging.level),
                "Expected one of: trace, debug, info, warn, error",
            ));
        }

        Ok(())
    }
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL the operation paths are appended to
    pub base_url: String,
    /// Whole-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Base URL without a trailing slash
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    fn validate(&self) -> ExpertosyResult<()> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            ExpertosyError::config_with_context(
                format!("Invalid api.base_url '{}': {}", self.base_url, e),
                "The backend URL must be absolute, e.g. https://api.expertosy.com",
            )
        })?;

        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(ExpertosyError::config(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }

        if self.request_timeout_secs == 0 || self.connect_timeout_secs == 0 {
            return Err(ExpertosyError::config("API timeouts must be greater than 0"));
        }

        Ok(())
    }
}

/// Where preference questions come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionSource {
    /// Ask the backend for a questionnaire and parse it
    #[default]
    Backend,
    /// Ask one importance question per factor
    Factors,
}

impl FromStr for QuestionSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "backend" | "questionnaire" => Ok(QuestionSource::Backend),
            "factors" => Ok(QuestionSource::Factors),
            other => Err(format!("Unknown question source '{}'", other)),
        }
    }
}

impl fmt::Display for QuestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionSource::Backend => write!(f, "backend"),
            QuestionSource::Factors => write!(f, "factors"),
        }
    }
}

/// Questionnaire settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionnaireConfig {
    pub source: QuestionSource,
    pub parser: ParserKind,
}

/// Recommendation history settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Record finished recommendations
    pub enabled: bool,
    /// Storage directory; `~/.expertosy/history` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    /// Oldest records beyond this count are pruned
    pub max_records: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: None,
            max_records: 50,
        }
    }
}

impl HistoryConfig {
    pub fn merge(&mut self, other: HistoryConfig) {
        self.enabled = other.enabled;
        if other.directory.is_some() {
            self.directory = other.directory;
        }
        self.max_records = other.max_records;
    }

    /// Effective storage directory
    pub fn resolved_directory(&self) -> PathBuf {
        self.directory
            .clone()
            .unwrap_or_else(|| app_dir().join("history"))
    }
}
