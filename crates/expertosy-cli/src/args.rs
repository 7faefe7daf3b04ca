//! CLI argument definitions using clap
//!
//! - expertosy                  # Ask for a product, then run the wizard
//! - expertosy "gaming laptop"  # Run the wizard for a product
//! - expertosy parse FILE       # Parse questionnaire text offline
//! - expertosy history/config   # Utility commands

use clap::{Parser, Subcommand};
use expertosy_core::config::{ConfigOverrides, QuestionSource};
use expertosy_core::questionnaire::ParserKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "expertosy")]
#[command(about = "Expertosy - guided product recommendations from the terminal")]
#[command(
    long_about = r#"Expertosy - guided product recommendations from the terminal

USAGE:
  expertosy                          # Ask what you are looking for
  expertosy "gaming laptop"          # Start a search right away
  expertosy parse answer.txt         # Parse questionnaire text offline

UTILITY COMMANDS:
  expertosy history list             # Past recommendations
  expertosy config init              # Create config file
  expertosy config show              # Show current config

For detailed help: expertosy --help"#
)]
#[command(version)]
pub struct Cli {
    /// What you are looking for (omit for an interactive prompt)
    pub query: Option<String>,

    /// Path to configuration file (default: ~/.expertosy/config.toml)
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,

    /// Recommendation service URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Where preference questions come from
    #[arg(long, global = true, value_parser = parse_question_source)]
    pub question_source: Option<QuestionSource>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Configuration values set on the command line
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_url: self.api_url.clone(),
            question_source: self.question_source,
            log_level: self.verbose.then(|| "debug".to_string()),
            ..Default::default()
        }
    }
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Find a product through a guided questionnaire
    Search {
        /// What you are looking for
        query: Option<String>,
    },

    /// Parse questionnaire text and print the questions
    Parse {
        /// File with questionnaire text, or '-' for stdin
        file: String,

        /// Only accept questions with exactly four options
        #[arg(long)]
        strict: bool,

        /// Parser to use (heuristic, json)
        #[arg(long, value_parser = parse_parser_kind)]
        parser: Option<ParserKind>,

        /// Print the questions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Past recommendations
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Clone)]
pub enum HistoryAction {
    /// List past recommendations, newest first
    List {
        /// Maximum number of records to show
        #[arg(long, short, default_value = "20")]
        limit: usize,

        /// Only records whose query contains this text
        #[arg(long)]
        contains: Option<String>,

        /// Print the records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one recommendation
    Show {
        /// Record ID or a unique prefix of it
        id: String,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete one recommendation
    Delete {
        /// Record ID or a unique prefix of it
        id: String,
    },
    /// Delete every recommendation
    Clear {
        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Validate configuration file
    Validate,
    /// Create a configuration file with default values
    Init {
        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },
}

fn parse_question_source(value: &str) -> Result<QuestionSource, String> {
    value.parse()
}

fn parse_parser_kind(value: &str) -> Result<ParserKind, String> {
    value.parse()
}
