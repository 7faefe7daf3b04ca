//! Recommendation history commands
//!
//! Commands for listing, showing, and deleting past recommendations.

use super::prompt_error;
use crate::args::HistoryAction;
use crate::console::{display_path, truncate};
use chrono::{DateTime, Utc};
use colored::Colorize;
use dialoguer::{Confirm, theme::ColorfulTheme};
use expertosy_core::FlowOutcome;
use expertosy_core::config::HistoryConfig;
use expertosy_core::error::{ExpertosyError, ExpertosyResult};
use expertosy_history::{HistoryError, HistoryFilter, HistoryRecord, HistoryStore, LocalHistoryStore};

/// Execute history command
pub async fn execute(action: HistoryAction, config: &HistoryConfig) -> ExpertosyResult<()> {
    let store = open_store(config);
    match action {
        HistoryAction::List {
            limit,
            contains,
            json,
        } => list_records(&store, limit, contains, json).await,
        HistoryAction::Show { id, json } => show_record(&store, &id, json).await,
        HistoryAction::Delete { id } => delete_record(&store, &id).await,
        HistoryAction::Clear { yes } => clear_records(&store, yes).await,
    }
}

/// History store at the configured location
pub fn open_store(config: &HistoryConfig) -> LocalHistoryStore {
    LocalHistoryStore::with_path(config.resolved_directory()).with_max_records(config.max_records)
}

/// History record for a finished flow
pub fn record_from_outcome(outcome: &FlowOutcome) -> HistoryRecord {
    HistoryRecord::new(outcome.query.clone())
        .with_preferences(outcome.preferences.clone())
        .with_ranking_answers(outcome.ranking_answers.clone())
        .with_ranked_products(outcome.ranked_products.clone())
}

fn history_error(error: HistoryError) -> ExpertosyError {
    match error {
        HistoryError::NotFound(_) | HistoryError::InvalidId(_) => {
            ExpertosyError::invalid_input_field(error.to_string(), "id")
        }
        HistoryError::Io(e) => ExpertosyError::io(format!("History storage failed: {}", e)),
        other => ExpertosyError::other(other.to_string()),
    }
}

async fn list_records(
    store: &LocalHistoryStore,
    limit: usize,
    contains: Option<String>,
    json: bool,
) -> ExpertosyResult<()> {
    let mut filter = HistoryFilter::new().with_limit(limit);
    if let Some(text) = &contains {
        filter = filter.with_query(text.clone());
    }
    let records = store.list(&filter).await.map_err(history_error)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("{}", "No recommendations found.".yellow());
        if contains.is_some() {
            println!(
                "{}",
                "Tip: Remove --contains to see all recommendations.".dimmed()
            );
        }
        return Ok(());
    }

    println!("\n{}", "Recommendation history".bold().underline());
    println!(
        "{}",
        format!(
            "Showing {} record(s) from {}",
            records.len(),
            display_path(store.base_path())
        )
        .dimmed()
    );
    println!();

    let now = Utc::now();
    for record in &records {
        println!(
            "  {} {}",
            record.short_id().bright_cyan(),
            truncate(&record.query, 50).bright_white()
        );
        let top = record
            .top_product()
            .map(|p| truncate(p, 60))
            .unwrap_or_else(|| "no ranking".to_string());
        println!(
            "    {} {} {}",
            top.dimmed(),
            "|".dimmed(),
            format_relative_time(record.created_at, now).dimmed()
        );
    }

    println!();
    println!(
        "{}",
        "Use 'expertosy history show <id>' to see a recommendation.".dimmed()
    );
    Ok(())
}

async fn show_record(store: &LocalHistoryStore, id: &str, json: bool) -> ExpertosyResult<()> {
    let record = store.load(id).await.map_err(history_error)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    print_record(&record);
    Ok(())
}

fn print_record(record: &HistoryRecord) {
    println!("\n{}", record.query.bold().underline());
    println!(
        "{}",
        format!(
            "{} | {}",
            record.id,
            record.created_at.format("%Y-%m-%d %H:%M UTC")
        )
        .dimmed()
    );

    print_answers("Preferences", &record.preferences);
    print_answers("Ranking answers", &record.ranking_answers);

    println!("\n{}", "Ranking".bold());
    if record.ranked_products.is_empty() {
        println!("  {}", "none".dimmed());
    }
    for line in &record.ranked_products {
        println!("  {}", line);
    }
    println!();
}

fn print_answers(title: &str, answers: &std::collections::HashMap<String, String>) {
    if answers.is_empty() {
        return;
    }
    println!("\n{}", title.bold());

    let mut prompts: Vec<&String> = answers.keys().collect();
    prompts.sort();
    for prompt in prompts {
        println!("  {} {}", prompt.dimmed(), answers[prompt].green());
    }
}

async fn delete_record(store: &LocalHistoryStore, id: &str) -> ExpertosyResult<()> {
    let record = store.load(id).await.map_err(history_error)?;
    store.delete(&record.id).await.map_err(history_error)?;
    println!(
        "{}",
        format!("Deleted recommendation {} ({}).", record.short_id(), record.query).green()
    );
    Ok(())
}

async fn clear_records(store: &LocalHistoryStore, yes: bool) -> ExpertosyResult<()> {
    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Delete every saved recommendation?")
            .default(false)
            .interact()
            .map_err(prompt_error)?;
        if !confirmed {
            println!("{}", "Nothing deleted.".dimmed());
            return Ok(());
        }
    }

    let removed = store.clear().await.map_err(history_error)?;
    println!("{}", format!("Deleted {} recommendation(s).", removed).green());
    Ok(())
}

fn format_relative_time(time: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(time);

    if duration.num_seconds() < 60 {
        "just now".to_string()
    } else if duration.num_minutes() < 60 {
        let mins = duration.num_minutes();
        format!("{} min{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if duration.num_hours() < 24 {
        let hours = duration.num_hours();
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if duration.num_days() < 7 {
        let days = duration.num_days();
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else {
        time.format("%Y-%m-%d").to_string()
    }
}
