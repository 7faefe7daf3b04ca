//! Questionnaire wizard
//!
//! `Loading -> AwaitingAnswer(0..N) -> Submitting -> Done`, with `Failed`
//! reachable from the two network phases and left again through retry.

mod machine;
mod state;

pub use machine::Wizard;
pub use state::{Progress, WizardPhase, WizardSession, WizardState};
