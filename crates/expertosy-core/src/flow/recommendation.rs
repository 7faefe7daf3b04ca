//! Preference questionnaire -> candidates -> ranking questionnaire -> ranking

use super::guard::LivenessGuard;
use crate::api::{HttpBackend, RecommendationBackend};
use crate::config::{Config, QuestionSource, QuestionnaireConfig};
use crate::error::{ExpertosyError, ExpertosyResult};
use crate::questionnaire::{
    ParseMode, Product, Question, QuestionnaireParser, candidate_lines, questions_from_factors,
};
use crate::wizard::{Wizard, WizardPhase, WizardState};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Knobs of a recommendation flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowSettings {
    pub question_source: QuestionSource,
    /// Acceptance rule for preference questions
    pub preference_mode: ParseMode,
    /// Acceptance rule for ranking questions
    pub ranking_mode: ParseMode,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            question_source: QuestionSource::Backend,
            preference_mode: ParseMode::Loose,
            ranking_mode: ParseMode::Strict,
        }
    }
}

impl From<&QuestionnaireConfig> for FlowSettings {
    fn from(config: &QuestionnaireConfig) -> Self {
        Self {
            question_source: config.source,
            ..Default::default()
        }
    }
}

/// Which questionnaire a wizard belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStage {
    Preferences,
    Ranking,
}

impl fmt::Display for FlowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowStage::Preferences => write!(f, "preferences"),
            FlowStage::Ranking => write!(f, "ranking"),
        }
    }
}

/// Everything a finished flow produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowOutcome {
    pub query: String,
    /// Preference prompt -> chosen option
    pub preferences: HashMap<String, String>,
    /// Ranking prompt -> chosen option
    pub ranking_answers: HashMap<String, String>,
    /// Candidate product lines from the recommendation
    pub candidates: Vec<String>,
    /// Product lines, best first
    pub ranked_products: Vec<String>,
}

impl FlowOutcome {
    /// Ranked lines split into rank, name and price
    pub fn ranked(&self) -> Vec<Product> {
        self.ranked_products
            .iter()
            .filter_map(|line| Product::parse(line))
            .collect()
    }
}

/// Where a flow stands
#[derive(Debug, Clone)]
pub enum FlowPhase {
    /// No search yet, or restarted
    Idle,
    Preferences(Wizard),
    Ranking(Wizard),
    Finished(FlowOutcome),
}

impl fmt::Display for FlowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowPhase::Idle => write!(f, "idle"),
            FlowPhase::Preferences(w) => write!(f, "preferences {}", w.state()),
            FlowPhase::Ranking(w) => write!(f, "ranking {}", w.state()),
            FlowPhase::Finished(_) => write!(f, "finished"),
        }
    }
}

/// Drives one search from query to ranked products.
///
/// Each backend call goes through the flow's [`LivenessGuard`]; once the
/// guard is torn down, late responses are dropped and return
/// [`ExpertosyError::Cancelled`] without changing the flow.
pub struct RecommendationFlow {
    backend: Arc<dyn RecommendationBackend>,
    parser: Arc<dyn QuestionnaireParser>,
    settings: FlowSettings,
    guard: LivenessGuard,
    phase: FlowPhase,
    query: String,
    factors: Vec<String>,
    preferences: HashMap<String, String>,
    candidates: Vec<String>,
}

impl RecommendationFlow {
    pub fn new(
        backend: Arc<dyn RecommendationBackend>,
        parser: Arc<dyn QuestionnaireParser>,
        settings: FlowSettings,
    ) -> Self {
        Self {
            backend,
            parser,
            settings,
            guard: LivenessGuard::new(),
            phase: FlowPhase::Idle,
            query: String::new(),
            factors: Vec::new(),
            preferences: HashMap::new(),
            candidates: Vec::new(),
        }
    }

    /// Build a flow talking HTTP to the configured backend
    pub fn from_config(config: &Config) -> ExpertosyResult<Self> {
        let backend = HttpBackend::new(&config.api)?;
        Ok(Self::new(
            Arc::new(backend),
            config.questionnaire.parser.build(),
            FlowSettings::from(&config.questionnaire),
        ))
    }

    /// Use an externally owned guard
    pub fn with_guard(mut self, guard: LivenessGuard) -> Self {
        self.guard = guard;
        self
    }

    pub fn guard(&self) -> &LivenessGuard {
        &self.guard
    }

    pub fn settings(&self) -> &FlowSettings {
        &self.settings
    }

    pub fn phase(&self) -> &FlowPhase {
        &self.phase
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn factors(&self) -> &[String] {
        &self.factors
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Stage of the active wizard
    pub fn stage(&self) -> Option<FlowStage> {
        match self.phase {
            FlowPhase::Preferences(_) => Some(FlowStage::Preferences),
            FlowPhase::Ranking(_) => Some(FlowStage::Ranking),
            _ => None,
        }
    }

    /// The active wizard
    pub fn wizard(&self) -> Option<&Wizard> {
        match &self.phase {
            FlowPhase::Preferences(w) | FlowPhase::Ranking(w) => Some(w),
            _ => None,
        }
    }

    pub fn wizard_mut(&mut self) -> Option<&mut Wizard> {
        match &mut self.phase {
            FlowPhase::Preferences(w) | FlowPhase::Ranking(w) => Some(w),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<&FlowOutcome> {
        match &self.phase {
            FlowPhase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Mark the owner as gone
    pub fn teardown(&self) {
        self.guard.teardown();
    }

    /// Begin a new search for `query` and load the preference questions
    pub async fn start(&mut self, query: &str) -> ExpertosyResult<()> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ExpertosyError::invalid_input_field(
                "Please enter what you are looking for",
                "query",
            ));
        }

        self.reset();
        self.query = query.to_string();
        self.phase = FlowPhase::Preferences(Wizard::new(query));
        info!(query, "Starting recommendation flow");

        self.load_preferences().await
    }

    /// Send the answers of the active wizard once it reached `Submitting`
    pub async fn submit(&mut self) -> ExpertosyResult<()> {
        match self.ready_to_submit()? {
            FlowStage::Preferences => self.submit_preferences().await,
            FlowStage::Ranking => self.submit_ranking().await,
        }
    }

    /// Re-run the step the active wizard failed in
    pub async fn retry(&mut self) -> ExpertosyResult<()> {
        let stage = self.stage();
        let wizard = self.wizard_mut().ok_or_else(|| {
            ExpertosyError::invalid_transition("retry", FlowPhase::Idle.to_string())
        })?;
        let during = wizard.retry()?;
        debug!(?stage, %during, "Retrying flow step");

        match (stage, during) {
            (Some(FlowStage::Preferences), WizardPhase::Loading) => self.load_preferences().await,
            (_, WizardPhase::Submitting) => self.submit().await,
            (_, WizardPhase::Loading) => Err(ExpertosyError::invalid_transition(
                "reload questions",
                self.phase.to_string(),
            )),
        }
    }

    /// Throw the current search away
    pub fn restart(&mut self) {
        debug!(phase = %self.phase, "Restarting recommendation flow");
        self.reset();
    }

    fn reset(&mut self) {
        self.phase = FlowPhase::Idle;
        self.query.clear();
        self.factors.clear();
        self.preferences.clear();
        self.candidates.clear();
    }

    fn ready_to_submit(&self) -> ExpertosyResult<FlowStage> {
        match (&self.phase, self.stage()) {
            (FlowPhase::Preferences(w) | FlowPhase::Ranking(w), Some(stage))
                if *w.state() == WizardState::Submitting =>
            {
                Ok(stage)
            }
            (phase, _) => Err(ExpertosyError::invalid_transition(
                "submit answers",
                phase.to_string(),
            )),
        }
    }

    async fn load_preferences(&mut self) -> ExpertosyResult<()> {
        match self.fetch_preference_questions().await {
            Ok((factors, questions)) => {
                self.factors = factors;
                self.active_wizard()?.load(questions)
            }
            Err(error) => Err(self.record_failure(error)),
        }
    }

    async fn fetch_preference_questions(&self) -> ExpertosyResult<(Vec<String>, Vec<Question>)> {
        let factors = self
            .guard
            .run(self.backend.generate_factors(&self.query))
            .await?;

        let questions = match self.settings.question_source {
            QuestionSource::Factors => questions_from_factors(&factors),
            QuestionSource::Backend => {
                let text = self
                    .guard
                    .run(self.backend.create_questionnaire(&self.query, &factors))
                    .await?;
                self.parser.parse(&text, self.settings.preference_mode)?
            }
        };

        debug!(
            factors = factors.len(),
            questions = questions.len(),
            parser = self.parser.name(),
            "Preference questions ready"
        );
        Ok((factors, questions))
    }

    async fn submit_preferences(&mut self) -> ExpertosyResult<()> {
        let (preferences, prompts) = {
            let wizard = self.active_wizard_ref()?;
            (wizard.answers().clone(), wizard.session().prompts())
        };

        match self.fetch_ranking_questions(&preferences, &prompts).await {
            Ok((candidates, questions)) => {
                // Preferences stay Submitting until the ranking wizard accepts its questions
                let mut ranking = Wizard::new(self.query.clone());
                if let Err(error) = ranking.load(questions) {
                    return Err(self.record_failure(error));
                }
                self.active_wizard()?.complete()?;
                info!(candidates = candidates.len(), "Moving on to ranking questions");

                self.preferences = preferences;
                self.candidates = candidates;
                self.phase = FlowPhase::Ranking(ranking);
                Ok(())
            }
            Err(error) => Err(self.record_failure(error)),
        }
    }

    async fn fetch_ranking_questions(
        &self,
        preferences: &HashMap<String, String>,
        previous_questions: &[String],
    ) -> ExpertosyResult<(Vec<String>, Vec<Question>)> {
        let recommendation = self
            .guard
            .run(
                self.backend
                    .generate_recommendation(&self.query, preferences),
            )
            .await?;

        let candidates = candidate_lines(&recommendation);
        if candidates.is_empty() {
            return Err(ExpertosyError::invalid_response(
                "generate-recommendation",
                "Recommendation contained no products",
            ));
        }

        let text = self
            .guard
            .run(self.backend.generate_ranking_questionnaire(
                &candidates,
                &self.query,
                previous_questions,
            ))
            .await?;
        let questions = self.parser.parse(&text, self.settings.ranking_mode)?;

        Ok((candidates, questions))
    }

    async fn submit_ranking(&mut self) -> ExpertosyResult<()> {
        let ranking_answers = self.active_wizard_ref()?.answers().clone();

        let result = self
            .guard
            .run(
                self.backend
                    .rank_products(&self.candidates, &ranking_answers, &self.query),
            )
            .await
            .and_then(|ranked| {
                if ranked.is_empty() {
                    Err(ExpertosyError::invalid_response(
                        "rank-products",
                        "No ranked products returned",
                    ))
                } else {
                    Ok(ranked)
                }
            });

        match result {
            Ok(ranked_products) => {
                self.active_wizard()?.complete()?;
                info!(products = ranked_products.len(), "Recommendation flow finished");

                self.phase = FlowPhase::Finished(FlowOutcome {
                    query: self.query.clone(),
                    preferences: std::mem::take(&mut self.preferences),
                    ranking_answers,
                    candidates: std::mem::take(&mut self.candidates),
                    ranked_products,
                });
                Ok(())
            }
            Err(error) => Err(self.record_failure(error)),
        }
    }

    /// Put the active wizard into `Failed`, unless the owner is gone
    fn record_failure(&mut self, error: ExpertosyError) -> ExpertosyError {
        if matches!(error, ExpertosyError::Cancelled) || !self.guard.is_alive() {
            debug!("Flow owner gone, leaving state untouched");
            return ExpertosyError::Cancelled;
        }

        warn!(error = %error, phase = %self.phase, "Recommendation flow step failed");
        if let Some(wizard) = self.wizard_mut() {
            if let Err(e) = wizard.fail(error.to_string()) {
                warn!("Could not record failure: {}", e);
            }
        }
        error
    }

    fn active_wizard_ref(&self) -> ExpertosyResult<&Wizard> {
        match &self.phase {
            FlowPhase::Preferences(w) | FlowPhase::Ranking(w) => Ok(w),
            phase => Err(ExpertosyError::invalid_transition(
                "use the wizard",
                phase.to_string(),
            )),
        }
    }

    fn active_wizard(&mut self) -> ExpertosyResult<&mut Wizard> {
        match &mut self.phase {
            FlowPhase::Preferences(w) | FlowPhase::Ranking(w) => Ok(w),
            phase => Err(ExpertosyError::invalid_transition(
                "use the wizard",
                phase.to_string(),
            )),
        }
    }
}
