//! Tracing subscriber setup

use expertosy_core::config::{LogFormat, LoggingConfig};
use expertosy_core::error::{ExpertosyError, ExpertosyResult};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Filter directive for `config`; `RUST_LOG` wins when set
pub fn filter_for(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install the global subscriber. Call once, before any command runs.
pub fn init(config: &LoggingConfig) -> ExpertosyResult<()> {
    let writer = match &config.log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ExpertosyError::io_with_path(
                        format!("Failed to create log directory: {}", e),
                        parent.display().to_string(),
                    )
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    ExpertosyError::io_with_path(
                        format!("Failed to open log file: {}", e),
                        path.display().to_string(),
                    )
                })?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter_for(config))
        .with_writer(writer)
        .with_ansi(config.log_file.is_none());

    let installed = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
    Ok(())
}
