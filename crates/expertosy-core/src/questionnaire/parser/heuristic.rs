//! Heuristic scraper for markdown-flavoured questionnaire text

use super::patterns::{
    clean_prompt, is_boilerplate, match_option, normalize, split_label, split_sections,
    strip_emphasis,
};
use super::{ParseError, ParseMode, QuestionnaireParser, enrich};
use crate::questionnaire::model::{Question, QuestionOption};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Why a section did not become a question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    Boilerplate,
    NoPrompt,
    OptionCount(usize),
}

/// Option found in a section, still carrying its label letter
struct LabelledOption {
    letter: char,
    option: QuestionOption,
}

/// Regex/heuristic questionnaire parser
///
/// Sections are parsed independently: a section that cannot be read is
/// skipped and never affects the questions accepted from other sections.
#[derive(Debug, Clone, Default)]
pub struct HeuristicParser;

impl HeuristicParser {
    pub fn new() -> Self {
        Self
    }

    fn parse_section(&self, section: &str, mode: ParseMode) -> Result<Question, SkipReason> {
        if is_boilerplate(section) {
            return Err(SkipReason::Boilerplate);
        }

        let lines: Vec<&str> = section
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let mut prompt: Option<&str> = None;
        let mut options: Vec<LabelledOption> = Vec::new();
        let mut seen = HashSet::new();

        for line in &lines {
            if let Some((letter, label)) = match_option(line) {
                // A lettered line that asks something is a stray question fragment
                if label.contains('?') {
                    continue;
                }
                // Duplicates are judged on the whole label, before the description split
                let key = normalize(&strip_emphasis(label));
                if key.is_empty() || !seen.insert(key) {
                    continue;
                }
                let (text, description) = split_label(label);
                if text.is_empty() {
                    continue;
                }
                options.push(LabelledOption {
                    letter,
                    option: QuestionOption { text, description },
                });
            } else if line.contains('?') {
                // Longest question line wins; the first one on ties
                let longer = prompt.is_none_or(|current| line.chars().count() > current.chars().count());
                if longer {
                    prompt = Some(line);
                }
            }
        }

        let prompt = prompt
            .map(clean_prompt)
            .filter(|p| !p.is_empty())
            .ok_or(SkipReason::NoPrompt)?;

        if !mode.accepts(options.len()) {
            return Err(SkipReason::OptionCount(options.len()));
        }

        let letters: HashSet<char> = options.iter().map(|o| o.letter).collect();
        if letters.len() == options.len() {
            options.sort_by_key(|o| o.letter);
        }

        let options = options.into_iter().map(|o| o.option).collect();
        Ok(enrich(Question::new(prompt, options)))
    }
}

impl QuestionnaireParser for HeuristicParser {
    fn parse(&self, text: &str, mode: ParseMode) -> Result<Vec<Question>, ParseError> {
        let normalized = text.replace("\r\n", "\n");
        if normalized.trim().is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let sections = split_sections(&normalized);
        debug!(sections = sections.len(), %mode, "Parsing questionnaire text");

        let mut questions = Vec::new();
        for (index, section) in sections.iter().enumerate() {
            match self.parse_section(section, mode) {
                Ok(question) => {
                    trace!(index, prompt = %question.prompt, options = question.options.len(), "Accepted section");
                    questions.push(question);
                }
                Err(reason) => {
                    trace!(index, ?reason, "Skipped section");
                }
            }
        }

        if questions.is_empty() {
            debug!(sections = sections.len(), %mode, "No questions survived parsing");
            return Err(ParseError::NoQuestions {
                sections: sections.len(),
                mode,
            });
        }

        debug!(questions = questions.len(), "Parsed questionnaire");
        Ok(questions)
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}
