//! Wizard states, session data and progress
//!
//! This module provides the plain data types the wizard machine operates on.

use crate::questionnaire::Question;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Phase a wizard was in when it failed; decides where retry resumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardPhase {
    /// Fetching and parsing the questionnaire
    Loading,
    /// Sending the collected answers to the backend
    Submitting,
}

impl fmt::Display for WizardPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardPhase::Loading => write!(f, "loading"),
            WizardPhase::Submitting => write!(f, "submitting"),
        }
    }
}

/// Where a wizard stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardState {
    /// Waiting for questions
    Loading,
    /// Showing the question at this index
    AwaitingAnswer(usize),
    /// Every question answered; the answers are being submitted
    Submitting,
    /// Submission succeeded
    Done,
    /// Loading or submission failed; recoverable by retry or restart
    Failed { reason: String, during: WizardPhase },
}

impl WizardState {
    /// Whether the wizard is presenting a question
    pub fn is_awaiting_answer(&self) -> bool {
        matches!(self, WizardState::AwaitingAnswer(_))
    }

    /// Whether the wizard has stopped, successfully or not
    pub fn is_terminal(&self) -> bool {
        matches!(self, WizardState::Done | WizardState::Failed { .. })
    }
}

impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardState::Loading => write!(f, "loading"),
            WizardState::AwaitingAnswer(i) => write!(f, "awaiting answer to question {}", i + 1),
            WizardState::Submitting => write!(f, "submitting"),
            WizardState::Done => write!(f, "done"),
            WizardState::Failed { during, .. } => write!(f, "failed while {}", during),
        }
    }
}

/// Data collected by one pass through a questionnaire
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardSession {
    /// The user's original search text
    pub query: String,
    /// Questions in presentation order; fixed once loaded
    pub questions: Vec<Question>,
    /// Question prompt -> selected option text
    pub answers: HashMap<String, String>,
    /// Cursor into `questions`
    pub current_index: usize,
}

impl WizardSession {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Prompts of all loaded questions, in order
    pub fn prompts(&self) -> Vec<String> {
        self.questions.iter().map(|q| q.prompt.clone()).collect()
    }
}

/// Position indicator for the question being shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// 1-based question number
    pub position: usize,
    pub total: usize,
    /// round(position / total * 100)
    pub percent: u8,
}

impl Progress {
    /// Progress for the question at `index` of `total`; `None` if out of range
    pub fn new(index: usize, total: usize) -> Option<Self> {
        if index >= total {
            return None;
        }
        let position = index + 1;
        let percent = (position as f64 / total as f64 * 100.0).round() as u8;
        Some(Self {
            position,
            total,
            percent,
        })
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Question {} of {} · {}% Complete",
            self.position, self.total, self.percent
        )
    }
}
