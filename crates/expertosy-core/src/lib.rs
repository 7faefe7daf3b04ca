//! Expertosy Core Library
//!
//! This crate provides the core functionality for Expertosy, a guided
//! product recommendation client: questionnaire parsing, the question wizard,
//! the recommendation backend client, flow orchestration, and configuration.

pub mod api;
pub mod config;
pub mod error;
pub mod flow;
pub mod questionnaire;
pub mod wizard;

// Re-export commonly used types
pub use api::{HttpBackend, RecommendationBackend};
pub use config::{Config, ConfigLoader};
pub use error::{ExpertosyError, ExpertosyResult};
pub use flow::{FlowOutcome, FlowPhase, FlowSettings, FlowStage, LivenessGuard, RecommendationFlow};
pub use questionnaire::{
    HeuristicParser, JsonQuestionnaireParser, ParseError, ParseMode, ParserKind, Product, Question,
    QuestionOption, QuestionnaireParser,
};
pub use wizard::{Progress, Wizard, WizardPhase, WizardState};
