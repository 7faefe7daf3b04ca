//! reqwest implementation of the recommendation backend

use super::RecommendationBackend;
use super::types::{
    BackendErrorBody, BackendOperation, CreateQuestionnaireRequest, FactorsResponse,
    GenerateFactorsRequest, QuestionnaireResponse, RankProductsRequest,
    RankedProductsResponse, RankingQuestionnaireRequest, RecommendationRequest,
    RecommendationResponse,
};
use crate::config::ApiConfig;
use crate::error::{ExpertosyError, ExpertosyResult};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Backend client posting JSON to `{base_url}/{operation}`
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http_client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a client with the configured URL and timeouts
    pub fn new(config: &ApiConfig) -> ExpertosyResult<Self> {
        let http_client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| {
                ExpertosyError::config_with_context(
                    format!("Failed to create HTTP client: {}", e),
                    "Building the backend client",
                )
            })?;

        Ok(Self::with_client(http_client, config.normalized_base_url()))
    }

    /// Create with a preconfigured reqwest client
    pub fn with_client(http_client: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, operation: BackendOperation) -> String {
        format!("{}/{}", self.base_url, operation.path())
    }

    async fn post<Req, Resp>(&self, operation: BackendOperation, body: &Req) -> ExpertosyResult<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = self.endpoint(operation);
        debug!(%operation, %url, "Calling backend");

        let response = self
            .http_client
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<BackendErrorBody>(&body)
                .ok()
                .map(|b| b.error)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| format!("{} failed with status {}", operation, status));
            warn!(%operation, status = status.as_u16(), "Backend error: {}", message);
            return Err(ExpertosyError::Http {
                message,
                url: Some(url),
                status_code: Some(status.as_u16()),
                context: Some(format!("Calling {}", operation)),
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            warn!(%operation, "Unexpected response shape: {}", e);
            ExpertosyError::invalid_response(operation.path(), e.to_string())
        })
    }
}

#[async_trait]
impl RecommendationBackend for HttpBackend {
    async fn generate_factors(&self, search_query: &str) -> ExpertosyResult<Vec<String>> {
        let response: FactorsResponse = self
            .post(
                BackendOperation::GenerateFactors,
                &GenerateFactorsRequest { search_query },
            )
            .await?;

        if response.factors.is_empty() {
            return Err(ExpertosyError::invalid_response(
                BackendOperation::GenerateFactors.path(),
                "No factors returned",
            ));
        }
        debug!(count = response.factors.len(), "Received factors");
        Ok(response.factors)
    }

    async fn create_questionnaire(
        &self,
        search_query: &str,
        factors: &[String],
    ) -> ExpertosyResult<String> {
        let response: QuestionnaireResponse = self
            .post(
                BackendOperation::CreateQuestionnaire,
                &CreateQuestionnaireRequest {
                    search_query,
                    factors,
                },
            )
            .await?;
        Ok(response.questionnaire)
    }

    async fn generate_recommendation(
        &self,
        search_query: &str,
        user_preferences: &HashMap<String, String>,
    ) -> ExpertosyResult<String> {
        let response: RecommendationResponse = self
            .post(
                BackendOperation::GenerateRecommendation,
                &RecommendationRequest {
                    search_query,
                    user_preferences,
                },
            )
            .await?;
        Ok(response.recommendation)
    }

    async fn generate_ranking_questionnaire(
        &self,
        products: &[String],
        search_query: &str,
        previous_questions: &[String],
    ) -> ExpertosyResult<String> {
        let response: QuestionnaireResponse = self
            .post(
                BackendOperation::GenerateRankingQuestionnaire,
                &RankingQuestionnaireRequest {
                    products,
                    search_query,
                    previous_questions,
                },
            )
            .await?;
        Ok(response.questionnaire)
    }

    async fn rank_products(
        &self,
        products: &[String],
        ranking_preferences: &HashMap<String, String>,
        search_query: &str,
    ) -> ExpertosyResult<Vec<String>> {
        let response: RankedProductsResponse = self
            .post(
                BackendOperation::RankProducts,
                &RankProductsRequest {
                    products,
                    ranking_preferences,
                    search_query,
                },
            )
            .await?;
        Ok(response.ranked_products)
    }
}
