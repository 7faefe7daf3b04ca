//! Configuration management

pub mod env_loader;
pub mod file_loader;
pub mod loader;
pub mod logging_config;
pub mod model;

pub use env_loader::{ConfigOverrides, load_from_env};
pub use file_loader::{load_from_file, save_to_file};
pub use loader::{ConfigLoader, ConfigSource, load_config};
pub use logging_config::{LOG_LEVELS, LogFormat, LoggingConfig};
pub use model::{
    ApiConfig, Config, DEFAULT_API_URL, HistoryConfig, QuestionSource, QuestionnaireConfig,
    app_dir,
};
