//! Recommendation flow orchestration
//!
//! A flow runs two wizards back to back. The preference wizard is fed by
//! `generate-factors` and `create-questionnaire`; its answers go to
//! `generate-recommendation`, whose candidate products seed the ranking
//! questionnaire. The ranking answers go to `rank-products`.
//!
//! Only one backend call is ever in flight: every step takes `&mut self`.

mod guard;
mod recommendation;

pub use guard::LivenessGuard;
pub use recommendation::{
    FlowOutcome, FlowPhase, FlowSettings, FlowStage, RecommendationFlow,
};
