//! Command routing logic for CLI

use crate::args::{Cli, Commands};
use crate::{commands, logging};
use expertosy_core::config::{Config, load_config};
use expertosy_core::error::ExpertosyResult;
use tracing::debug;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> ExpertosyResult<()> {
    let overrides = cli.overrides();

    // Config commands must work even when the file does not load
    if let Some(Commands::Config { action }) = &cli.command {
        return commands::config::execute(action.clone(), cli.config_file.as_deref(), overrides)
            .await;
    }

    let config = load_config(cli.config_file.as_deref(), overrides)?;
    logging::init(&config.logging)?;
    debug!(api = %config.api.base_url, source = %config.questionnaire.source, "Configuration loaded");

    match cli.command {
        Some(Commands::Search { query }) => commands::search::execute(&config, query.or(cli.query)).await,
        Some(Commands::Parse {
            file,
            strict,
            parser,
            json,
        }) => {
            let parser = parser.unwrap_or(config.questionnaire.parser);
            commands::parse::execute(&file, strict, parser, json).await
        }
        Some(Commands::History { action }) => commands::history::execute(action, &config.history).await,
        Some(Commands::Config { .. }) => Ok(()),
        None => route_main(&config, cli.query).await,
    }
}

/// Default route: an interactive search
async fn route_main(config: &Config, query: Option<String>) -> ExpertosyResult<()> {
    commands::search::execute(config, query).await
}
