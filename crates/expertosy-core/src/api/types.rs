//! Wire types of the recommendation backend

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The backend's operations, each a POST to `{base_url}/{path}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendOperation {
    GenerateFactors,
    CreateQuestionnaire,
    GenerateRecommendation,
    GenerateRankingQuestionnaire,
    RankProducts,
}

impl BackendOperation {
    pub fn path(&self) -> &'static str {
        match self {
            BackendOperation::GenerateFactors => "generate-factors",
            BackendOperation::CreateQuestionnaire => "create-questionnaire",
            BackendOperation::GenerateRecommendation => "generate-recommendation",
            BackendOperation::GenerateRankingQuestionnaire => "generate-ranking-questionnaire",
            BackendOperation::RankProducts => "rank-products",
        }
    }
}

impl fmt::Display for BackendOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateFactorsRequest<'a> {
    pub search_query: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FactorsResponse {
    pub factors: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateQuestionnaireRequest<'a> {
    pub search_query: &'a str,
    pub factors: &'a [String],
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionnaireResponse {
    pub questionnaire: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationRequest<'a> {
    pub search_query: &'a str,
    pub user_preferences: &'a HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationResponse {
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankingQuestionnaireRequest<'a> {
    pub products: &'a [String],
    pub search_query: &'a str,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    pub previous_questions: &'a [String],
}

#[derive(Debug, Clone, Serialize)]
pub struct RankProductsRequest<'a> {
    pub products: &'a [String],
    pub ranking_preferences: &'a HashMap<String, String>,
    pub search_query: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankedProductsResponse {
    pub ranked_products: Vec<String>,
}

/// Body of a non-2xx backend response
#[derive(Debug, Clone, Deserialize)]
pub struct BackendErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ranking_request_omits_empty_previous_questions() {
        let products = vec!["A".to_string()];
        let request = RankingQuestionnaireRequest {
            products: &products,
            search_query: "laptop",
            previous_questions: &[],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "products": ["A"], "search_query": "laptop" })
        );

        let previous = vec!["Budget?".to_string()];
        let request = RankingQuestionnaireRequest {
            previous_questions: &previous,
            ..request
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap()["previous_questions"],
            json!(["Budget?"])
        );
    }

    #[test]
    fn test_operation_paths() {
        assert_eq!(BackendOperation::RankProducts.to_string(), "rank-products");
        assert_eq!(
            BackendOperation::GenerateRankingQuestionnaire.path(),
            "generate-ranking-questionnaire"
        );
    }
}
