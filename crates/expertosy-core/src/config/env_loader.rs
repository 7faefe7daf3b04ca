//! Environment variable and command line overrides

use super::logging_config::LogFormat;
use super::model::{Config, QuestionSource};
use crate::error::{ExpertosyError, ExpertosyResult};
use crate::questionnaire::ParserKind;
use std::env;
use std::path::PathBuf;

pub const ENV_API_URL: &str = "EXPERTOSY_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "EXPERTOSY_TIMEOUT_SECS";
pub const ENV_QUESTION_SOURCE: &str = "EXPERTOSY_QUESTION_SOURCE";
pub const ENV_HISTORY_DIR: &str = "EXPERTOSY_HISTORY_DIR";
pub const ENV_LOG_LEVEL: &str = "EXPERTOSY_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "EXPERTOSY_LOG_FORMAT";

/// Individually set values layered on top of a configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub question_source: Option<QuestionSource>,
    pub parser: Option<ParserKind>,
    pub history_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Write every set value into `config`
    pub fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.api_url {
            config.api.base_url = url.clone();
        }
        if let Some(timeout) = self.timeout_secs {
            config.api.request_timeout_secs = timeout;
        }
        if let Some(source) = self.question_source {
            config.questionnaire.source = source;
        }
        if let Some(parser) = self.parser {
            config.questionnaire.parser = parser;
        }
        if let Some(dir) = &self.history_dir {
            config.history.directory = Some(dir.clone());
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
    }
}

/// Read overrides from `EXPERTOSY_*` environment variables
pub fn load_from_env() -> ExpertosyResult<ConfigOverrides> {
    overrides_from(|key| env::var(key).ok())
}

/// Build overrides from a variable lookup; empty values count as unset
pub fn overrides_from<F>(lookup: F) -> ExpertosyResult<ConfigOverrides>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    let mut overrides = ConfigOverrides {
        api_url: get(ENV_API_URL),
        history_dir: get(ENV_HISTORY_DIR).map(PathBuf::from),
        log_level: get(ENV_LOG_LEVEL),
        ..Default::default()
    };

    if let Some(timeout) = get(ENV_TIMEOUT_SECS) {
        overrides.timeout_secs = Some(timeout.trim().parse().map_err(|_| {
            ExpertosyError::config_with_context(
                format!("Invalid {} value", ENV_TIMEOUT_SECS),
                format!("Parsing timeout value '{}'", timeout),
            )
        })?);
    }

    if let Some(source) = get(ENV_QUESTION_SOURCE) {
        overrides.question_source = Some(source.parse().map_err(|e: String| {
            ExpertosyError::config_with_context(e, format!("Reading {}", ENV_QUESTION_SOURCE))
        })?);
    }

    if let Some(format) = get(ENV_LOG_FORMAT) {
        overrides.log_format = Some(format.parse().map_err(|e: String| {
            ExpertosyError::config_with_context(e, format!("Reading {}", ENV_LOG_FORMAT))
        })?);
    }

    Ok(overrides)
}
