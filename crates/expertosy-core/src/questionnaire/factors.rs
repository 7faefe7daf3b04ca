//! Build preference questions directly from backend factors

use super::model::{Question, QuestionOption};
use super::parser::{categorize, help_text_for};

/// Importance scale offered for every factor, most important first
pub const IMPORTANCE_SCALE: [(&str, &str); 4] = [
    ("Very Important", "This factor is crucial to my decision"),
    ("Important", "This factor matters significantly"),
    ("Somewhat Important", "This factor is worth considering"),
    ("Not Important", "This factor is not a priority"),
];

/// One importance question per non-blank factor, in factor order.
///
/// The factor itself is the prompt. Repeated factors (ignoring case) are
/// asked once.
pub fn questions_from_factors(factors: &[String]) -> Vec<Question> {
    let mut seen = std::collections::HashSet::new();

    factors
        .iter()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty() && seen.insert(f.to_lowercase()))
        .map(|factor| {
            let options = IMPORTANCE_SCALE
                .iter()
                .map(|(text, description)| QuestionOption::new(*text).with_description(*description))
                .collect();

            let mut question = Question::new(factor, options);
            question.category = Some(categorize(factor).to_string());
            question.help_text = help_text_for(factor).map(str::to_string);
            question
        })
        .collect()
}
