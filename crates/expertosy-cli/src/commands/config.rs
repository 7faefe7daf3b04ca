//! Configuration management commands

use crate::args::ConfigAction;
use crate::console::{CliConsole, display_path};
use colored::*;
use expertosy_core::config::{Config, ConfigOverrides, load_config, load_from_file, save_to_file};
use expertosy_core::error::{ExpertosyError, ExpertosyResult};
use std::path::Path;

/// Execute config command
pub async fn execute(
    action: ConfigAction,
    config_file: Option<&Path>,
    overrides: ConfigOverrides,
) -> ExpertosyResult<()> {
    let path = config_file
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::default_path);

    match action {
        ConfigAction::Show => show(&path, overrides),
        ConfigAction::Validate => validate(&path),
        ConfigAction::Init { force } => init(&path, force),
    }
}

/// Show the effective configuration
fn show(path: &Path, overrides: ConfigOverrides) -> ExpertosyResult<()> {
    let console = CliConsole::new(true);

    console.print_header("Configuration");

    if path.exists() {
        console.success(&format!("Loaded configuration from: {}", display_path(path)));
    } else {
        console.warn(&format!(
            "Configuration file not found: {}",
            display_path(path)
        ));
        console.info("Using default configuration");
    }
    if !overrides.is_empty() {
        console.info("Command line overrides applied");
    }

    let config = load_config(Some(path), overrides)?;
    print_config(&console, &config);
    Ok(())
}

/// Validate a configuration file
fn validate(path: &Path) -> ExpertosyResult<()> {
    let console = CliConsole::new(true);

    console.print_header("Configuration Validation");

    if !path.exists() {
        return Err(ExpertosyError::config(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    console.info(&format!("Validating configuration file: {}", display_path(path)));

    let config = match load_from_file(path) {
        Ok(config) => {
            console.success("Configuration file loaded successfully");
            config
        }
        Err(e) => {
            console.error(&format!("Failed to load configuration: {e}"));
            return Err(e);
        }
    };

    match config.validate() {
        Ok(()) => {
            console.success("Configuration is valid");
            console.print_separator();
            console.info(&format!("Backend: {}", config.api.base_url));
            console.info(&format!("Question source: {}", config.questionnaire.source));
            console.info(&format!(
                "History: {}",
                if config.history.enabled {
                    "enabled"
                } else {
                    "disabled"
                }
            ));
            Ok(())
        }
        Err(e) => {
            console.error(&format!("Configuration validation failed: {e}"));
            Err(e)
        }
    }
}

/// Write a configuration file with default values
fn init(path: &Path, force: bool) -> ExpertosyResult<()> {
    let console = CliConsole::new(true);

    console.print_header("Configuration Initialization");

    if path.exists() && !force {
        console.error(&format!(
            "Configuration file already exists: {}",
            display_path(path)
        ));
        console.info("Use --force to overwrite");
        return Err(ExpertosyError::config("Configuration file already exists"));
    }

    save_to_file(&Config::default(), path)?;

    console.success(&format!("Created configuration file: {}", display_path(path)));
    console.info("Edit the file to point at a different backend or change history settings");
    Ok(())
}

fn print_config(console: &CliConsole, config: &Config) {
    console.info(&format!("Backend: {}", config.api.base_url.green()));
    console.info(&format!(
        "Timeouts: {}s request, {}s connect",
        config.api.request_timeout_secs, config.api.connect_timeout_secs
    ));

    console.print_separator();
    console.print_header("Questionnaire");
    console.info(&format!(
        "Question source: {}",
        config.questionnaire.source.to_string().cyan()
    ));
    console.info(&format!(
        "Parser: {}",
        config.questionnaire.parser.to_string().cyan()
    ));

    console.print_separator();
    console.print_header("History");
    console.info(&format!(
        "Enabled: {}",
        if config.history.enabled {
            "✓ Yes".green()
        } else {
            "✗ No".red()
        }
    ));
    console.info(&format!(
        "Directory: {}",
        display_path(&config.history.resolved_directory())
    ));
    console.info(&format!("Max records: {}", config.history.max_records));

    console.print_separator();
    console.print_header("Logging");
    console.info(&format!("Level: {}", config.logging.level.yellow()));
    console.info(&format!("Format: {}", config.logging.format));
    if let Some(file) = &config.logging.log_file {
        console.info(&format!("Log file: {}", display_path(file)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_then_validate() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        execute(ConfigAction::Init { force: false }, Some(path.as_path()), ConfigOverrides::default())
            .await
            .unwrap();
        assert!(path.exists());

        execute(ConfigAction::Validate, Some(path.as_path()), ConfigOverrides::default())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[api]\nbase_url = \"http://localhost:5000\"\n").unwrap();

        let result = execute(
            ConfigAction::Init { force: false },
            Some(path.as_path()),
            ConfigOverrides::default(),
        )
        .await;
        assert!(matches!(result, Err(ExpertosyError::Config { .. })));

        execute(ConfigAction::Init { force: true }, Some(path.as_path()), ConfigOverrides::default())
            .await
            .unwrap();
        assert_eq!(load_from_file(&path).unwrap(), Config::default());
    }

    #[tokio::test]
    async fn test_validate_reports_bad_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[history]\nmax_records = 0\n").unwrap();

        let result = execute(ConfigAction::Validate, Some(path.as_path()), ConfigOverrides::default()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_validate_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.toml");

        let result = execute(ConfigAction::Validate, Some(path.as_path()), ConfigOverrides::default()).await;
        assert!(matches!(result, Err(ExpertosyError::Config { .. })));
    }
}
