//! CLI command implementations

pub mod config;
pub mod history;
pub mod parse;
pub mod search;

use expertosy_core::error::ExpertosyError;

/// Map a failed terminal prompt into the CLI error type
pub(crate) fn prompt_error(error: dialoguer::Error) -> ExpertosyError {
    ExpertosyError::io(format!("selection error: {}", error))
}
