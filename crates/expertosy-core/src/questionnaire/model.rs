//! Question and option records produced by the parsers

use serde::{Deserialize, Serialize};

/// One answer a user can pick for a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    /// Label shown to the user, and the value recorded as the answer
    pub text: String,

    /// Clarifying text split off the label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl QuestionOption {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A single question of a questionnaire
///
/// Only materialized with a non-empty prompt and at least two distinct,
/// non-empty options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question being asked
    pub prompt: String,

    /// Ordered, deduplicated answers
    pub options: Vec<QuestionOption>,

    /// Coarse topic label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Clarifying text shown on request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

impl Question {
    pub fn new(prompt: impl Into<String>, options: Vec<QuestionOption>) -> Self {
        Self {
            prompt: prompt.into(),
            options,
            category: None,
            help_text: None,
        }
    }

    /// Find an option by its exact text
    pub fn find_option(&self, text: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.text == text)
    }

    /// Position of an option by its exact text
    pub fn option_index(&self, text: &str) -> Option<usize> {
        self.options.iter().position(|o| o.text == text)
    }

    /// Display letters for the options: A, B, C, ...
    pub fn option_labels(&self) -> impl Iterator<Item = char> + '_ {
        self.options
            .iter()
            .enumerate()
            .map(|(i, _)| option_label(i))
    }

    /// Check the materialization invariant: non-empty prompt, >= 2 distinct
    /// non-empty options. Options sharing a text differ by their description.
    pub fn is_well_formed(&self) -> bool {
        if self.prompt.trim().is_empty() || self.options.len() < 2 {
            return false;
        }
        if self.options.iter().any(|o| o.text.trim().is_empty()) {
            return false;
        }
        let mut seen = std::collections::HashSet::new();
        self.options
            .iter()
            .all(|o| {
                seen.insert((
                    o.text.to_lowercase(),
                    o.description.as_deref().map(str::to_lowercase),
                ))
            })
    }
}

/// Letter for the option at `index` (0 -> 'A')
pub fn option_label(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        Question::new(
            "What matters most?",
            vec![
                QuestionOption::new("Price"),
                QuestionOption::new("Speed").with_description("how fast it feels"),
            ],
        )
    }

    #[test]
    fn test_option_labels() {
        let labels: Vec<char> = sample().option_labels().collect();
        assert_eq!(labels, vec!['A', 'B']);
    }

    #[test]
    fn test_find_option() {
        let q = sample();
        assert_eq!(
            q.find_option("Speed").and_then(|o| o.description.as_deref()),
            Some("how fast it feels")
        );
        assert!(q.find_option("speed").is_none());
        assert_eq!(q.option_index("Price"), Some(0));
    }

    #[test]
    fn test_well_formed() {
        assert!(sample().is_well_formed());

        let single = Question::new("Why?", vec![QuestionOption::new("Because")]);
        assert!(!single.is_well_formed());

        let duplicate = Question::new(
            "Why?",
            vec![QuestionOption::new("Same"), QuestionOption::new("same")],
        );
        assert!(!duplicate.is_well_formed());

        let described = Question::new(
            "Which budget?",
            vec![
                QuestionOption::new("Price").with_description("under $500"),
                QuestionOption::new("Price").with_description("over $1000"),
            ],
        );
        assert!(described.is_well_formed());

        let blank_prompt = Question::new(" ", sample().options);
        assert!(!blank_prompt.is_well_formed());
    }

    #[test]
    fn test_serde_skips_empty_optionals() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("category").is_none());
        assert_eq!(json["options"][0], serde_json::json!({ "text": "Price" }));
    }
}
