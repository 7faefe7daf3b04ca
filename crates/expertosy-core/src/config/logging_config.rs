//! Logging configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Levels accepted by `LoggingConfig::level`
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("Unknown log format '{}'", other)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Compact => write!(f, "compact"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (pretty, compact, json)
    pub format: LogFormat,
    /// Write logs to this file instead of stderr
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
            log_file: None,
        }
    }
}

impl LoggingConfig {
    /// Merge with another logging config
    pub fn merge(&mut self, other: LoggingConfig) {
        if !other.level.is_empty() {
            self.level = other.level;
        }

        self.format = other.format;

        if other.log_file.is_some() {
            self.log_file = other.log_file;
        }
    }

    /// Whether `level` is one of the known levels
    pub fn has_known_level(&self) -> bool {
        LOG_LEVELS.contains(&self.level.to_lowercase().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_logging_config_merge() {
        let mut config1 = LoggingConfig::default();
        let config2 = LoggingConfig {
            level: "debug".to_string(),
            format: LogFormat::Json,
            log_file: Some(PathBuf::from("/tmp/expertosy.log")),
        };

        config1.merge(config2);
        assert_eq!(config1.level, "debug");
        assert_eq!(config1.format, LogFormat::Json);
        assert_eq!(config1.log_file, Some(PathBuf::from("/tmp/expertosy.log")));
    }

    #[test]
    fn test_logging_config_merge_empty_level() {
        let mut config1 = LoggingConfig::default();
        config1.merge(LoggingConfig {
            level: "".to_string(),
            format: LogFormat::Compact,
            log_file: None,
        });

        assert_eq!(config1.level, "warn");
        assert_eq!(config1.format, LogFormat::Compact);
    }

    #[test]
    fn test_known_levels() {
        let mut config = LoggingConfig::default();
        assert!(config.has_known_level());
        config.level = "INFO".into();
        assert!(config.has_known_level());
        config.level = "loud".into();
        assert!(!config.has_known_level());
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
