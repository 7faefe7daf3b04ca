//! Questionnaire model, parsers and builders

pub mod factors;
pub mod model;
pub mod parser;
pub mod products;

pub use factors::{IMPORTANCE_SCALE, questions_from_factors};
pub use model::{Question, QuestionOption, option_label};
pub use parser::{
    HeuristicParser, JsonQuestionnaireParser, ParseError, ParseMode, ParserKind,
    QuestionnaireParser, categorize, help_text_for,
};
pub use products::{Product, candidate_lines};
