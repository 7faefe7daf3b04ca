//! Select-menu entries for the wizard screens

use expertosy_core::questionnaire::{Question, option_label};

pub const PREVIOUS_ITEM: &str = "← Previous question";
pub const START_OVER_ITEM: &str = "↺ Start over";
pub const QUIT_ITEM: &str = "✗ Quit";
pub const TRY_AGAIN_ITEM: &str = "↻ Try again";

/// What the user picked on a question screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionChoice {
    Answer(usize),
    Previous,
    StartOver,
    Quit,
}

/// What the user picked after a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureChoice {
    TryAgain,
    StartOver,
    Quit,
}

/// Entries of one question screen: lettered options, then navigation
#[derive(Debug, Clone)]
pub struct QuestionMenu {
    items: Vec<String>,
    option_count: usize,
    can_go_back: bool,
    default: usize,
}

impl QuestionMenu {
    pub fn new(question: &Question, recorded: Option<&str>, can_go_back: bool) -> Self {
        let mut items: Vec<String> = question
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| match &option.description {
                Some(description) => {
                    format!("{}. {} - {}", option_label(i), option.text, description)
                }
                None => format!("{}. {}", option_label(i), option.text),
            })
            .collect();
        let option_count = items.len();

        if can_go_back {
            items.push(PREVIOUS_ITEM.to_string());
        }
        items.push(START_OVER_ITEM.to_string());
        items.push(QUIT_ITEM.to_string());

        let default = recorded
            .and_then(|answer| question.option_index(answer))
            .unwrap_or(0);

        Self {
            items,
            option_count,
            can_go_back,
            default,
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Index preselected when the screen opens
    pub fn default_index(&self) -> usize {
        self.default
    }

    /// Map a selected entry back to its meaning
    pub fn choice(&self, index: usize) -> QuestionChoice {
        if index < self.option_count {
            return QuestionChoice::Answer(index);
        }
        let nav = index - self.option_count;
        match (self.can_go_back, nav) {
            (true, 0) => QuestionChoice::Previous,
            (true, 1) | (false, 0) => QuestionChoice::StartOver,
            _ => QuestionChoice::Quit,
        }
    }
}

/// Entries of the failure screen
pub fn failure_items() -> [&'static str; 3] {
    [TRY_AGAIN_ITEM, START_OVER_ITEM, QUIT_ITEM]
}

pub fn failure_choice(index: usize) -> FailureChoice {
    match index {
        0 => FailureChoice::TryAgain,
        1 => FailureChoice::StartOver,
        _ => FailureChoice::Quit,
    }
}
