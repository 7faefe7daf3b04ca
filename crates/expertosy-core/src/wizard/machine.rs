//! One-question-at-a-time wizard
//!
//! The [`Wizard`] owns a [`WizardSession`] and moves it through
//! [`WizardState`]. Every transition either succeeds completely or returns an
//! error and leaves the wizard exactly as it was.

use super::state::{Progress, WizardPhase, WizardSession, WizardState};
use crate::error::{ExpertosyError, ExpertosyResult};
use crate::questionnaire::Question;
use std::collections::HashMap;
use tracing::debug;

/// Drives a questionnaire from loading to submission
#[derive(Debug, Clone)]
pub struct Wizard {
    session: WizardSession,
    state: WizardState,
}

impl Wizard {
    /// Create a wizard for `query`, waiting for its questions
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            session: WizardSession::new(query),
            state: WizardState::Loading,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn session(&self) -> &WizardSession {
        &self.session
    }

    pub fn query(&self) -> &str {
        &self.session.query
    }

    pub fn questions(&self) -> &[Question] {
        &self.session.questions
    }

    /// Recorded answers, keyed by question prompt
    pub fn answers(&self) -> &HashMap<String, String> {
        &self.session.answers
    }

    pub fn current_index(&self) -> usize {
        self.session.current_index
    }

    /// The question being shown, if the wizard is awaiting an answer
    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            WizardState::AwaitingAnswer(i) => self.session.questions.get(i),
            _ => None,
        }
    }

    /// The answer already recorded for the question being shown
    pub fn recorded_answer(&self) -> Option<&str> {
        let question = self.current_question()?;
        self.session.answers.get(&question.prompt).map(String::as_str)
    }

    /// Progress through the questionnaire while a question is shown
    pub fn progress(&self) -> Option<Progress> {
        match self.state {
            WizardState::AwaitingAnswer(i) => Progress::new(i, self.session.questions.len()),
            _ => None,
        }
    }

    /// Hand the parsed questions to the wizard.
    ///
    /// An empty list fails the wizard with a parse failure.
    pub fn load(&mut self, questions: Vec<Question>) -> ExpertosyResult<()> {
        if self.state != WizardState::Loading {
            return Err(self.reject("load questions"));
        }

        if questions.is_empty() {
            let error = ExpertosyError::parse_failure("No questions could be extracted");
            self.transition(
                "load",
                WizardState::Failed {
                    reason: error.to_string(),
                    during: WizardPhase::Loading,
                },
            );
            return Err(error);
        }

        debug!(count = questions.len(), "Loaded questions");
        self.session.questions = questions;
        self.session.answers.clear();
        self.session.current_index = 0;
        self.transition("load", WizardState::AwaitingAnswer(0));
        Ok(())
    }

    /// Record a failure of the current network call
    pub fn fail(&mut self, reason: impl Into<String>) -> ExpertosyResult<()> {
        let during = match self.state {
            WizardState::Loading => WizardPhase::Loading,
            WizardState::Submitting => WizardPhase::Submitting,
            _ => return Err(self.reject("fail")),
        };
        self.transition(
            "fail",
            WizardState::Failed {
                reason: reason.into(),
                during,
            },
        );
        Ok(())
    }

    /// Answer the current question with the option whose text is `option_text`.
    ///
    /// This is the only place answers are written.
    pub fn select(&mut self, option_text: &str) -> ExpertosyResult<()> {
        let WizardState::AwaitingAnswer(index) = self.state else {
            return Err(self.reject("select an option"));
        };
        let total = self.session.questions.len();
        let question = &self.session.questions[index];

        let Some(option) = question.find_option(option_text) else {
            return Err(ExpertosyError::invalid_input_field(
                format!("'{}' is not an option of \"{}\"", option_text, question.prompt),
                "option",
            ));
        };

        let prompt = question.prompt.clone();
        let text = option.text.clone();
        self.session.answers.insert(prompt, text);

        let next = if index + 1 < total {
            self.session.current_index = index + 1;
            WizardState::AwaitingAnswer(index + 1)
        } else {
            WizardState::Submitting
        };
        self.transition("select", next);
        Ok(())
    }

    /// Answer the current question with the option at `option_index`
    pub fn select_index(&mut self, option_index: usize) -> ExpertosyResult<()> {
        let text = match self.current_question() {
            Some(question) => match question.options.get(option_index) {
                Some(option) => option.text.clone(),
                None => {
                    return Err(ExpertosyError::invalid_input_field(
                        format!(
                            "Option {} is out of range (1-{})",
                            option_index + 1,
                            question.options.len()
                        ),
                        "option",
                    ));
                }
            },
            None => return Err(self.reject("select an option")),
        };
        self.select(&text)
    }

    /// Move on using the answer already recorded for the current question
    pub fn advance_with_recorded(&mut self) -> ExpertosyResult<()> {
        if !self.state.is_awaiting_answer() {
            return Err(self.reject("advance"));
        }
        let Some(answer) = self.recorded_answer().map(str::to_string) else {
            return Err(ExpertosyError::invalid_input(
                "Select an option before moving to the next question",
            ));
        };
        self.select(&answer)
    }

    /// Go back one question, keeping every recorded answer
    pub fn previous(&mut self) -> ExpertosyResult<()> {
        match self.state {
            WizardState::AwaitingAnswer(index) if index > 0 => {
                self.session.current_index = index - 1;
                self.transition("previous", WizardState::AwaitingAnswer(index - 1));
                Ok(())
            }
            _ => Err(self.reject("go back")),
        }
    }

    /// Mark the submission as successful
    pub fn complete(&mut self) -> ExpertosyResult<()> {
        if self.state != WizardState::Submitting {
            return Err(self.reject("complete"));
        }
        self.transition("complete", WizardState::Done);
        Ok(())
    }

    /// Leave `Failed` and resume the phase that failed
    pub fn retry(&mut self) -> ExpertosyResult<WizardPhase> {
        let WizardState::Failed { during, .. } = self.state else {
            return Err(self.reject("retry"));
        };
        let next = match during {
            WizardPhase::Loading => WizardState::Loading,
            WizardPhase::Submitting => WizardState::Submitting,
        };
        self.transition("retry", next);
        Ok(during)
    }

    fn transition(&mut self, action: &str, next: WizardState) {
        debug!(
            query = %self.session.query,
            action,
            from = %self.state,
            to = %next,
            "Wizard transition"
        );
        self.state = next;
    }

    fn reject(&self, action: &str) -> ExpertosyError {
        debug!(action, state = %self.state, "Rejected wizard transition");
        ExpertosyError::invalid_transition(action, self.state.to_string())
    }
}
