//! Questionnaire text parsers
//!
//! The backend answers questionnaire requests with free text written by a
//! language model. [`HeuristicParser`] scrapes questions out of that text;
//! [`JsonQuestionnaireParser`] reads a structured JSON contract instead. Both
//! sit behind [`QuestionnaireParser`] so the wizard never knows which one
//! produced its questions.
//!
//! # Example
//!
//! ```
//! use expertosy_core::questionnaire::{HeuristicParser, ParseMode, QuestionnaireParser};
//!
//! let text = "1. What matters most?\nA) Price\nB) Speed\nC) Battery\nD) Weight";
//! let questions = HeuristicParser::new().parse(text, ParseMode::Strict).unwrap();
//! assert_eq!(questions.len(), 1);
//! assert_eq!(questions[0].prompt, "What matters most?");
//! ```

mod enrich;
mod heuristic;
mod json;
mod patterns;

#[cfg(test)]
mod tests;

pub use enrich::{categorize, help_text_for};
pub use heuristic::HeuristicParser;
pub use json::JsonQuestionnaireParser;

use super::model::Question;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// How many options a section needs before it becomes a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Two or more options (preference questionnaires)
    Loose,
    /// Exactly four options (ranking comparisons)
    Strict,
}

impl ParseMode {
    /// Whether a section with `option_count` options is accepted
    pub fn accepts(&self, option_count: usize) -> bool {
        match self {
            ParseMode::Loose => option_count >= 2,
            ParseMode::Strict => option_count == 4,
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseMode::Loose => write!(f, "loose"),
            ParseMode::Strict => write!(f, "strict"),
        }
    }
}

/// Why a whole questionnaire could not be parsed
///
/// Individual sections that fail are skipped silently; these errors are only
/// raised when nothing usable is left.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("No questionnaire text provided")]
    EmptyInput,

    #[error("No valid questions found in {sections} section(s) ({mode} mode)")]
    NoQuestions { sections: usize, mode: ParseMode },

    #[error("Malformed questionnaire: {0}")]
    Malformed(String),
}

/// Turns backend questionnaire text into questions
pub trait QuestionnaireParser: Send + Sync {
    /// Parse `text`, keeping only sections that satisfy `mode`.
    ///
    /// Returns `Err` when the input is empty or no section survives; never
    /// returns an empty `Ok`.
    fn parse(&self, text: &str, mode: ParseMode) -> Result<Vec<Question>, ParseError>;

    /// Short name used in logs and configuration
    fn name(&self) -> &'static str;
}

/// Parser implementations selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParserKind {
    /// Regex heuristics over markdown-ish text
    #[default]
    Heuristic,
    /// Structured JSON questionnaire
    Json,
}

impl ParserKind {
    /// Instantiate the parser
    pub fn build(&self) -> Arc<dyn QuestionnaireParser> {
        match self {
            ParserKind::Heuristic => Arc::new(HeuristicParser::new()),
            ParserKind::Json => Arc::new(JsonQuestionnaireParser::new()),
        }
    }
}

impl std::str::FromStr for ParserKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "heuristic" | "text" => Ok(ParserKind::Heuristic),
            "json" => Ok(ParserKind::Json),
            other => Err(format!("Unknown parser '{}'", other)),
        }
    }
}

impl fmt::Display for ParserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserKind::Heuristic => write!(f, "heuristic"),
            ParserKind::Json => write!(f, "json"),
        }
    }
}

/// Fill in the keyword-derived category and help text
pub(crate) fn enrich(mut question: Question) -> Question {
    if question.category.is_none() {
        question.category = Some(categorize(&question.prompt).to_string());
    }
    if question.help_text.is_none() {
        question.help_text = help_text_for(&question.prompt).map(str::to_string);
    }
    question
}
