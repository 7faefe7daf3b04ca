//! Interactive recommendation search
//!
//! Drives a [`RecommendationFlow`] from the terminal: one select menu per
//! question, a spinner while the backend works, and a recovery menu whenever
//! a step fails.

mod menu;

use super::history::{open_store, record_from_outcome};
use super::prompt_error;
use crate::console::CliConsole;
use crate::signal_handler::SignalHandler;
use colored::*;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use expertosy_core::config::{Config, HistoryConfig};
use expertosy_core::error::{ExpertosyError, ExpertosyResult, UserFriendlyError};
use expertosy_core::{FlowOutcome, FlowPhase, FlowStage, LivenessGuard, RecommendationFlow, WizardState};
use expertosy_history::HistoryStore;
use menu::{FailureChoice, QuestionChoice, QuestionMenu, failure_choice, failure_items};
use tracing::{debug, warn};

/// How one search ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchEnd {
    Finished,
    StartOver,
    Quit,
}

/// A flow call made behind the spinner
enum FlowStep {
    Start(String),
    Submit,
    Retry,
}

/// Run interactive searches until the user quits
pub async fn execute(config: &Config, query: Option<String>) -> ExpertosyResult<()> {
    if !console::Term::stdout().is_term() {
        return Err(ExpertosyError::invalid_input(
            "The interactive search needs a terminal; use 'expertosy parse' to parse questionnaire text offline",
        ));
    }

    let guard = LivenessGuard::new();
    let mut signals = SignalHandler::new(guard.clone());
    signals.start()?;

    let mut session = SearchSession {
        console: CliConsole::new(true),
        signals,
        flow: RecommendationFlow::from_config(config)?.with_guard(guard),
        last_error: None,
    };

    let mut next_query = query.filter(|q| !q.trim().is_empty());
    loop {
        let query = match next_query.take() {
            Some(query) => query,
            None => prompt_query()?,
        };

        match session.run(&query).await {
            Ok(SearchEnd::Finished) => {
                if let Some(outcome) = session.flow.outcome() {
                    print_ranking(&session.console, outcome);
                    save_history(&session.console, &config.history, outcome).await;
                }
                if !confirm("Search for something else?")? {
                    break;
                }
                session.flow.restart();
            }
            Ok(SearchEnd::StartOver) => session.flow.restart(),
            Ok(SearchEnd::Quit) => break,
            Err(ExpertosyError::Cancelled) => {
                session.console.warn("Search cancelled");
                break;
            }
            Err(e) => return Err(e),
        }
    }

    session.signals.stop();
    Ok(())
}

struct SearchSession {
    console: CliConsole,
    signals: SignalHandler,
    flow: RecommendationFlow,
    /// Failure of the most recent flow call
    last_error: Option<ExpertosyError>,
}

impl SearchSession {
    async fn run(&mut self, query: &str) -> ExpertosyResult<SearchEnd> {
        self.perform(FlowStep::Start(query.to_string())).await?;

        loop {
            let state = match self.flow.phase() {
                FlowPhase::Idle => None,
                FlowPhase::Finished(_) => return Ok(SearchEnd::Finished),
                FlowPhase::Preferences(wizard) | FlowPhase::Ranking(wizard) => {
                    Some(wizard.state().clone())
                }
            };
            let Some(state) = state else {
                return Ok(self.abandon());
            };

            match state {
                WizardState::AwaitingAnswer(_) => match self.ask()? {
                    QuestionChoice::Answer(index) => self.wizard()?.select_index(index)?,
                    QuestionChoice::Previous => self.wizard()?.previous()?,
                    QuestionChoice::StartOver => return Ok(SearchEnd::StartOver),
                    QuestionChoice::Quit => return Ok(SearchEnd::Quit),
                },
                WizardState::Submitting => {
                    self.perform(FlowStep::Submit).await?;
                    let stuck = self
                        .flow
                        .wizard()
                        .is_some_and(|w| *w.state() == WizardState::Submitting);
                    if stuck && self.last_error.is_some() {
                        return Ok(self.abandon());
                    }
                }
                WizardState::Failed { reason, .. } => {
                    let error = self
                        .last_error
                        .take()
                        .unwrap_or_else(|| ExpertosyError::other(reason));
                    match self.recover(&error)? {
                        FailureChoice::TryAgain => self.perform(FlowStep::Retry).await?,
                        FailureChoice::StartOver => return Ok(SearchEnd::StartOver),
                        FailureChoice::Quit => return Ok(SearchEnd::Quit),
                    }
                }
                WizardState::Loading | WizardState::Done => return Ok(self.abandon()),
            }
        }
    }

    /// Call the flow with the spinner up and Ctrl+C routed to the guard.
    ///
    /// Failures are kept in `last_error` for the recovery screen; only
    /// cancellation is returned.
    async fn perform(&mut self, step: FlowStep) -> ExpertosyResult<()> {
        let message = match (&step, self.flow.stage()) {
            (FlowStep::Start(query), _) => format!("Working out what matters for {}...", query),
            (FlowStep::Submit, Some(FlowStage::Ranking)) => "Ranking your options...".to_string(),
            (FlowStep::Submit, _) => "Finding matching products...".to_string(),
            (FlowStep::Retry, _) => "Trying again...".to_string(),
        };

        self.console.start_progress(&message);
        self.signals.set_busy(true);
        let result = match step {
            FlowStep::Start(query) => self.flow.start(&query).await,
            FlowStep::Submit => self.flow.submit().await,
            FlowStep::Retry => self.flow.retry().await,
        };
        self.signals.set_busy(false);
        self.console.finish_progress();

        match result {
            Ok(()) => {
                self.last_error = None;
                Ok(())
            }
            Err(ExpertosyError::Cancelled) => Err(ExpertosyError::Cancelled),
            Err(e) => {
                debug!(error = %e, phase = %self.flow.phase(), "Flow step failed");
                self.last_error = Some(e);
                Ok(())
            }
        }
    }

    fn wizard(&mut self) -> ExpertosyResult<&mut expertosy_core::Wizard> {
        let phase = self.flow.phase().to_string();
        self.flow
            .wizard_mut()
            .ok_or_else(|| ExpertosyError::invalid_transition("answer question", phase))
    }

    /// Show the current question and read a choice
    fn ask(&self) -> ExpertosyResult<QuestionChoice> {
        let wizard = self.flow.wizard().ok_or_else(|| {
            ExpertosyError::invalid_transition("ask question", self.flow.phase().to_string())
        })?;
        let question = wizard.current_question().ok_or_else(|| {
            ExpertosyError::invalid_transition("ask question", wizard.state().to_string())
        })?;

        println!();
        if let Some(progress) = wizard.progress() {
            let stage = match self.flow.stage() {
                Some(FlowStage::Ranking) => "Narrowing down",
                _ => "Your preferences",
            };
            println!("{} {}", stage.magenta().bold(), progress.to_string().dimmed());
        }
        if let Some(category) = &question.category {
            println!("{}", format!("[{}]", category).cyan());
        }
        if let Some(help) = &question.help_text {
            println!("{}", help.dimmed().italic());
        }

        let menu = QuestionMenu::new(question, wizard.recorded_answer(), wizard.current_index() > 0);
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(question.prompt.clone())
            .items(menu.items())
            .default(menu.default_index())
            .interact_opt()
            .map_err(prompt_error)?;

        Ok(selection.map_or(QuestionChoice::Quit, |index| menu.choice(index)))
    }

    /// Show a failure and ask how to continue
    fn recover(&self, error: &ExpertosyError) -> ExpertosyResult<FailureChoice> {
        let friendly = self.show_error(error);
        let default = if friendly.is_recoverable { 0 } else { 1 };

        println!();
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("What would you like to do?")
            .items(&failure_items())
            .default(default)
            .interact_opt()
            .map_err(prompt_error)?;

        Ok(selection.map_or(FailureChoice::Quit, failure_choice))
    }

    fn show_error(&self, error: &ExpertosyError) -> UserFriendlyError {
        let friendly = UserFriendlyError::from(error);
        println!();
        self.console.error(&friendly.format_display());
        friendly
    }

    /// Report a failure the flow could not record and give up on the search
    fn abandon(&mut self) -> SearchEnd {
        if let Some(error) = self.last_error.take() {
            self.show_error(&error);
        }
        SearchEnd::StartOver
    }
}

fn prompt_query() -> ExpertosyResult<String> {
    println!();
    Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("What are you looking for?")
        .validate_with(|input: &String| -> Result<(), &'static str> {
            if input.trim().is_empty() {
                Err("Please enter what you are looking for")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(prompt_error)
}

fn confirm(prompt: &str) -> ExpertosyResult<bool> {
    println!();
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(prompt_error)
}

fn print_ranking(console: &CliConsole, outcome: &FlowOutcome) {
    console.print_header(&format!("Top picks for {}", outcome.query));

    let products = outcome.ranked();
    for (i, product) in products.iter().enumerate() {
        let rank = product.rank.unwrap_or(i as u32 + 1);
        let name = if i == 0 {
            product.name.bold().to_string()
        } else {
            product.name.clone()
        };
        let price = product
            .price
            .as_deref()
            .map(|p| format!("  {}", p.green()))
            .unwrap_or_default();
        println!("  {} {}{}", format!("{}.", rank).cyan().bold(), name, price);
    }
    println!();
}

async fn save_history(console: &CliConsole, config: &HistoryConfig, outcome: &FlowOutcome) {
    if !config.enabled {
        return;
    }

    let store = open_store(config);
    let record = record_from_outcome(outcome);
    match store.append(&record).await {
        Ok(()) => console.info(&format!("Saved to history as {}", record.short_id())),
        Err(e) => {
            warn!(error = %e, "Failed to save recommendation history");
            console.warn(&format!("Could not save this recommendation to history: {}", e));
        }
    }
}
