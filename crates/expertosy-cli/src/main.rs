//! Expertosy CLI application
//!
//! Guided product recommendations from the terminal.
//!
//! # Installation
//!
//! ```bash
//! cargo install --path crates/expertosy-cli
//! ```
//!
//! # Commands
//!
//! - `expertosy [QUERY]` runs the interactive wizard: preference questions,
//!   then ranking questions, then the ranked products.
//! - `expertosy parse FILE` parses questionnaire text without a backend.
//! - `expertosy history ...` and `expertosy config ...` manage local state.
//!
//! See `expertosy --help` for full list.

// Allow common clippy lints that are stylistic preferences
#![allow(clippy::collapsible_if)]
#![allow(clippy::field_reassign_with_default)]

mod args;
mod commands;
mod console;
mod logging;
mod router;
mod signal_handler;

use args::Cli;
use clap::Parser;
use expertosy_core::error::UserFriendlyError;
use std::process::ExitCode;


#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match router::route(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            let friendly = UserFriendlyError::from(&e);
            console::CliConsole::new(false).error(&friendly.format_display());
            ExitCode::FAILURE
        }
    }
}
