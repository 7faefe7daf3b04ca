//! File-based configuration loading and saving

use super::model::Config;
use crate::error::{ExpertosyError, ExpertosyResult};
use std::fs;
use std::path::Path;

/// Serialization format picked from a file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Toml,
    Yaml,
}

impl FileFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => FileFormat::Toml,
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            _ => FileFormat::Json,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            FileFormat::Json => "JSON",
            FileFormat::Toml => "TOML",
            FileFormat::Yaml => "YAML",
        }
    }
}

/// Load configuration from a file
///
/// Supports JSON, TOML, and YAML formats based on file extension.
/// Returns default config if file doesn't exist.
pub fn load_from_file(path: &Path) -> ExpertosyResult<Config> {
    if !path.exists() {
        tracing::debug!("Config file {} not found, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        ExpertosyError::config_with_context(
            format!("Failed to read config file: {}", e),
            format!("Reading configuration from '{}'", path.display()),
        )
    })?;

    let format = FileFormat::from_path(path);
    let parsed: Result<Config, String> = match format {
        FileFormat::Toml => toml::from_str(&content).map_err(|e| e.to_string()),
        FileFormat::Yaml => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
        FileFormat::Json => serde_json::from_str(&content).map_err(|e| e.to_string()),
    };

    parsed.map_err(|e| {
        ExpertosyError::config_with_context(
            format!("Failed to parse {} config: {}", format.name(), e),
            format!(
                "Deserializing {} configuration from '{}'",
                format.name(),
                path.display()
            ),
        )
    })
}

/// Write configuration to a file in the format implied by its extension,
/// creating parent directories as needed
pub fn save_to_file(config: &Config, path: &Path) -> ExpertosyResult<()> {
    let format = FileFormat::from_path(path);
    let content = match format {
        FileFormat::Toml => toml::to_string_pretty(config).map_err(|e| e.to_string()),
        FileFormat::Yaml => serde_yaml::to_string(config).map_err(|e| e.to_string()),
        FileFormat::Json => serde_json::to_string_pretty(config).map_err(|e| e.to_string()),
    }
    .map_err(|e| {
        ExpertosyError::config(format!("Failed to serialize {} config: {}", format.name(), e))
    })?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| ExpertosyError::io_with_path(e.to_string(), parent.display().to_string()))?;
    }
    fs::write(path, content)
        .map_err(|e| ExpertosyError::io_with_path(e.to_string(), path.display().to_string()))?;

    tracing::debug!("Saved configuration to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LogFormat, QuestionSource};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let config_json = r#"{
            "api": { "base_url": "http://localhost:5000", "request_timeout_secs": 5 },
            "questionnaire": { "source": "factors" },
            "logging": { "level": "debug", "format": "json" }
        }"#;
        fs::write(&config_path, config_json).unwrap();

        let config = load_from_file(&config_path).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.api.request_timeout_secs, 5);
        assert_eq!(config.api.connect_timeout_secs, 10);
        assert_eq!(config.questionnaire.source, QuestionSource::Factors);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_load_from_toml_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_toml = r#"
[api]
base_url = "https://staging.expertosy.com"

[questionnaire]
parser = "json"

[history]
enabled = false
max_records = 5
"#;
        fs::write(&config_path, config_toml).unwrap();

        let config = load_from_file(&config_path).unwrap();
        assert_eq!(config.api.base_url, "https://staging.expertosy.com");
        assert_eq!(
            config.questionnaire.parser,
            crate::questionnaire::ParserKind::Json
        );
        assert!(!config.history.enabled);
        assert_eq!(config.history.max_records, 5);
    }

    #[test]
    fn test_load_from_yaml_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        let yaml_content = r#"
api:
  request_timeout_secs: 60
history:
  directory: /var/lib/expertosy
"#;
        fs::write(&config_path, yaml_content).unwrap();

        let config = load_from_file(&config_path).unwrap();
        assert_eq!(config.api.request_timeout_secs, 60);
        assert_eq!(
            config.history.directory.as_deref(),
            Some(Path::new("/var/lib/expertosy"))
        );
    }

    #[test]
    fn test_load_from_nonexistent_file() {
        let config = load_from_file(Path::new("/nonexistent/config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("invalid.json");
        fs::write(&config_path, "{ invalid json }").unwrap();

        let result = load_from_file(&config_path);
        assert!(matches!(result, Err(ExpertosyError::Config { .. })));
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.api.base_url = "http://127.0.0.1:8080".into();
        save_to_file(&config, &config_path).unwrap();

        assert_eq!(load_from_file(&config_path).unwrap(), config);
    }
}
