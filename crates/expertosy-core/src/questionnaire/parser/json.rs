//! Structured JSON questionnaire parser
//!
//! Accepts either a bare array of questions or an object with a `questions`
//! array. Options may be plain strings or `{ "text", "description" }`
//! objects. A surrounding markdown code fence is tolerated.

use super::patterns::{clean_prompt, normalize, strip_emphasis};
use super::{ParseError, ParseMode, QuestionnaireParser, enrich};
use crate::questionnaire::model::{Question, QuestionOption};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{debug, trace};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Document {
    List(Vec<RawQuestion>),
    Wrapped { questions: Vec<RawQuestion> },
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(alias = "question")]
    prompt: String,
    #[serde(default)]
    options: Vec<RawOption>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default, alias = "helpText")]
    help_text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawOption {
    Text(String),
    Detailed {
        text: String,
        #[serde(default)]
        description: Option<String>,
    },
}

impl RawOption {
    fn into_option(self) -> QuestionOption {
        match self {
            RawOption::Text(text) => QuestionOption::new(strip_emphasis(&text)),
            RawOption::Detailed { text, description } => QuestionOption {
                text: strip_emphasis(&text),
                description: description
                    .map(|d| strip_emphasis(&d))
                    .filter(|d| !d.is_empty()),
            },
        }
    }
}

/// Parser for backends that emit questionnaires as JSON
#[derive(Debug, Clone, Default)]
pub struct JsonQuestionnaireParser;

impl JsonQuestionnaireParser {
    pub fn new() -> Self {
        Self
    }

    fn convert(raw: RawQuestion, mode: ParseMode) -> Option<Question> {
        let prompt = clean_prompt(&raw.prompt);
        if prompt.is_empty() {
            return None;
        }

        let mut seen = HashSet::new();
        let options: Vec<QuestionOption> = raw
            .options
            .into_iter()
            .map(RawOption::into_option)
            .filter(|o| !o.text.is_empty() && !o.text.contains('?'))
            .filter(|o| seen.insert(normalize(&o.text)))
            .collect();

        if !mode.accepts(options.len()) {
            return None;
        }

        Some(enrich(Question {
            prompt,
            options,
            category: raw.category.filter(|c| !c.trim().is_empty()),
            help_text: raw.help_text.filter(|h| !h.trim().is_empty()),
        }))
    }
}

/// Strip a ```json ... ``` fence if the whole payload is wrapped in one
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

impl QuestionnaireParser for JsonQuestionnaireParser {
    fn parse(&self, text: &str, mode: ParseMode) -> Result<Vec<Question>, ParseError> {
        let body = strip_code_fence(text);
        if body.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let document: Document =
            serde_json::from_str(body).map_err(|e| ParseError::Malformed(e.to_string()))?;
        let raw_questions = match document {
            Document::List(list) => list,
            Document::Wrapped { questions } => questions,
        };

        let total = raw_questions.len();
        let questions: Vec<Question> = raw_questions
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| {
                let converted = Self::convert(raw, mode);
                if converted.is_none() {
                    trace!(index, "Skipped JSON question");
                }
                converted
            })
            .collect();

        if questions.is_empty() {
            return Err(ParseError::NoQuestions {
                sections: total,
                mode,
            });
        }

        debug!(questions = questions.len(), total, "Parsed JSON questionnaire");
        Ok(questions)
    }

    fn name(&self) -> &'static str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array_of_questions() {
        let text = r#"[
            {"prompt": "Budget?", "options": ["Low", "Mid", {"text": "High", "description": "no limit"}]}
        ]"#;
        let questions = JsonQuestionnaireParser::new()
            .parse(text, ParseMode::Loose)
            .unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].options.len(), 3);
        assert_eq!(questions[0].options[2].description.as_deref(), Some("no limit"));
        assert_eq!(questions[0].category.as_deref(), Some("Budget"));
    }

    #[test]
    fn test_parse_wrapped_fenced_document() {
        let text = "```json\n{\"questions\": [{\"question\": \"Size?\", \"options\": [\"S\", \"M\", \"L\", \"XL\"]}]}\n```";
        let questions = JsonQuestionnaireParser::new()
            .parse(text, ParseMode::Strict)
            .unwrap();
        assert_eq!(questions[0].prompt, "Size?");
    }

    #[test]
    fn test_strict_mode_rejects_wrong_counts() {
        let text = r#"[{"prompt": "Size?", "options": ["S", "M", "L"]}]"#;
        let err = JsonQuestionnaireParser::new()
            .parse(text, ParseMode::Strict)
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::NoQuestions {
                sections: 1,
                mode: ParseMode::Strict
            }
        );
    }

    #[test]
    fn test_duplicate_options_collapse() {
        let text = r#"[{"prompt": "Color?", "options": ["Red", "red", "Blue"]}]"#;
        let questions = JsonQuestionnaireParser::new()
            .parse(text, ParseMode::Loose)
            .unwrap();
        assert_eq!(questions[0].options.len(), 2);
    }

    #[test]
    fn test_question_options_and_emphasis_are_cleaned() {
        let text = r#"[{"prompt": "**Which size?**", "options": ["**Small**", "Large", "Why not both?", {"text": "Medium", "description": "*fits most*"}]}]"#;
        let questions = JsonQuestionnaireParser::new()
            .parse(text, ParseMode::Loose)
            .unwrap();
        let q = &questions[0];
        assert_eq!(q.prompt, "Which size?");
        let texts: Vec<&str> = q.options.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(texts, vec!["Small", "Large", "Medium"]);
        assert_eq!(q.options[2].description.as_deref(), Some("fits most"));
    }

    #[test]
    fn test_malformed_json() {
        let err = JsonQuestionnaireParser::new()
            .parse("{not json", ParseMode::Loose)
            .unwrap_err();
        assert!(matches!(err, ParseError::Malformed(_)));
    }
}
