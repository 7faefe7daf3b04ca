//! Recommendation backend interface
//!
//! The backend is an opaque HTTP JSON service that owns all of the
//! recommendation intelligence. [`RecommendationBackend`] describes its five
//! operations; [`HttpBackend`] talks to the real service.

mod client;
pub mod types;

#[cfg(test)]
mod client_tests;

pub use client::HttpBackend;
pub use types::BackendOperation;

use crate::error::ExpertosyResult;
use async_trait::async_trait;
use std::collections::HashMap;

/// Operations offered by the recommendation backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecommendationBackend: Send + Sync {
    /// Considerations relevant to `search_query`; never empty on success
    async fn generate_factors(&self, search_query: &str) -> ExpertosyResult<Vec<String>>;

    /// Raw preference questionnaire text
    async fn create_questionnaire(
        &self,
        search_query: &str,
        factors: &[String],
    ) -> ExpertosyResult<String>;

    /// Recommendation text, one candidate product per line
    async fn generate_recommendation(
        &self,
        search_query: &str,
        user_preferences: &HashMap<String, String>,
    ) -> ExpertosyResult<String>;

    /// Raw ranking questionnaire text comparing `products`
    async fn generate_ranking_questionnaire(
        &self,
        products: &[String],
        search_query: &str,
        previous_questions: &[String],
    ) -> ExpertosyResult<String>;

    /// Products ordered best first
    async fn rank_products(
        &self,
        products: &[String],
        ranking_preferences: &HashMap<String, String>,
        search_query: &str,
    ) -> ExpertosyResult<Vec<String>>;
}
