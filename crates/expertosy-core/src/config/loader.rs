//! Configuration loader
//!
//! Sources are applied in the order they were added, later sources
//! overriding earlier ones:
//! - Default configuration
//! - Configuration files (JSON, TOML, YAML)
//! - Environment variables
//! - Command line overrides
//!
//! The merged result is validated before it is returned.

use super::env_loader::{self, ConfigOverrides};
use super::file_loader;
use super::model::Config;
use crate::error::ExpertosyResult;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Source of configuration data
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Built-in defaults
    Default,
    /// Configuration from a file
    File(PathBuf),
    /// `EXPERTOSY_*` environment variables
    Environment,
    /// Values given on the command line
    Overrides(ConfigOverrides),
}

/// Configuration loader with support for multiple sources
#[derive(Debug, Default)]
pub struct ConfigLoader {
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a configuration source
    pub fn add_source(mut self, source: ConfigSource) -> Self {
        self.sources.push(source);
        self
    }

    pub fn with_defaults(self) -> Self {
        self.add_source(ConfigSource::Default)
    }

    pub fn with_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_source(ConfigSource::File(path.as_ref().to_path_buf()))
    }

    pub fn with_env(self) -> Self {
        self.add_source(ConfigSource::Environment)
    }

    pub fn with_overrides(self, overrides: ConfigOverrides) -> Self {
        self.add_source(ConfigSource::Overrides(overrides))
    }

    /// Load configuration from all sources
    pub fn load(self) -> ExpertosyResult<Config> {
        let mut config = Config::default();

        for source in &self.sources {
            apply_source(source, &mut config)?;
        }

        config.validate()?;
        debug!(
            base_url = %config.api.base_url,
            source = %config.questionnaire.source,
            parser = %config.questionnaire.parser,
            "Configuration loaded"
        );
        Ok(config)
    }
}

fn apply_source(source: &ConfigSource, config: &mut Config) -> ExpertosyResult<()> {
    match source {
        ConfigSource::Default => {
            debug!("Loading default config");
            *config = Config::default();
        }
        ConfigSource::File(path) => {
            debug!("Loading config from file: {}", path.display());
            config.merge(file_loader::load_from_file(path)?);
        }
        ConfigSource::Environment => {
            debug!("Loading config from environment");
            env_loader::load_from_env()?.apply(config);
        }
        ConfigSource::Overrides(overrides) => {
            debug!("Applying command line overrides");
            overrides.apply(config);
        }
    }
    Ok(())
}

/// Load configuration the way the CLI does: defaults, then the config file
/// (explicit or `~/.expertosy/config.toml`), then environment, then flags
pub fn load_config(
    config_file: Option<&Path>,
    overrides: ConfigOverrides,
) -> ExpertosyResult<Config> {
    let path = config_file
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::default_path);

    ConfigLoader::new()
        .with_defaults()
        .with_file(path)
        .with_env()
        .with_overrides(overrides)
        .load()
}
