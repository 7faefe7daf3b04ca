//! Tests for the HTTP backend against a mock server

#[cfg(test)]
mod tests {
    use crate::api::{HttpBackend, RecommendationBackend};
    use crate::config::ApiConfig;
    use crate::error::{ExpertosyError, UnifiedError};
    use reqwest::Client;
    use serde_json::json;
    use std::collections::HashMap;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_backend(base_url: &str) -> HttpBackend {
        let http_client = Client::builder()
            .no_proxy()
            .build()
            .expect("Failed to create HTTP client");
        HttpBackend::with_client(http_client, base_url)
    }

    #[tokio::test]
    async fn test_generate_factors_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/generate-factors"))
            .and(header("accept", "application/json"))
            .and(body_json(json!({ "search_query": "laptop" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "factors": ["Budget", "Battery life"] })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let backend = create_test_backend(&mock_server.uri());
        let factors = backend.generate_factors("laptop").await.unwrap();
        assert_eq!(factors, vec!["Budget", "Battery life"]);
    }

    #[tokio::test]
    async fn test_generate_factors_empty_is_invalid_shape() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/generate-factors"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "factors": [] })))
            .mount(&mock_server)
            .await;

        let backend = create_test_backend(&mock_server.uri());
        let err = backend.generate_factors("laptop").await.unwrap_err();
        assert!(matches!(err, ExpertosyError::InvalidResponseShape { .. }));
    }

    #[tokio::test]
    async fn test_unexpected_shape() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/create-questionnaire"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": "1. Q?" })))
            .mount(&mock_server)
            .await;

        let backend = create_test_backend(&mock_server.uri());
        let err = backend
            .create_questionnaire("laptop", &["Budget".to_string()])
            .await
            .unwrap_err();
        match err {
            ExpertosyError::InvalidResponseShape { operation, .. } => {
                assert_eq!(operation, "create-questionnaire");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_backend_error_message_is_kept() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/generate-recommendation"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({ "error": "No preferences provided" })),
            )
            .mount(&mock_server)
            .await;

        let backend = create_test_backend(&mock_server.uri());
        let err = backend
            .generate_recommendation("laptop", &HashMap::new())
            .await
            .unwrap_err();

        match &err {
            ExpertosyError::Http {
                message,
                status_code,
                ..
            } => {
                assert_eq!(message, "No preferences provided");
                assert_eq!(*status_code, Some(400));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_server_error_without_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rank-products"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let backend = create_test_backend(&mock_server.uri());
        let err = backend
            .rank_products(&["A".to_string()], &HashMap::new(), "laptop")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ExpertosyError::Http {
                status_code: Some(500),
                ..
            }
        ));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_ranking_questionnaire_sends_previous_questions() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/generate-ranking-questionnaire"))
            .and(body_json(json!({
                "products": ["1. Dell XPS 15 - $1,499"],
                "search_query": "laptop",
                "previous_questions": ["Budget?"]
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "questionnaire": "1. Which?" })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let backend = create_test_backend(&mock_server.uri());
        let text = backend
            .generate_ranking_questionnaire(
                &["1. Dell XPS 15 - $1,499".to_string()],
                "laptop",
                &["Budget?".to_string()],
            )
            .await
            .unwrap();
        assert_eq!(text, "1. Which?");
    }

    #[tokio::test]
    async fn test_rank_products_success() {
        let mock_server = MockServer::start().await;
        let mut preferences = HashMap::new();
        preferences.insert("Which matters?".to_string(), "Price".to_string());

        Mock::given(method("POST"))
            .and(path("/rank-products"))
            .and(body_json(json!({
                "products": ["A", "B"],
                "ranking_preferences": { "Which matters?": "Price" },
                "search_query": "laptop"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "ranked_products": ["B", "A"] })),
            )
            .mount(&mock_server)
            .await;

        let backend = create_test_backend(&format!("{}/", mock_server.uri()));
        let ranked = backend
            .rank_products(&["A".to_string(), "B".to_string()], &preferences, "laptop")
            .await
            .unwrap();
        assert_eq!(ranked, vec!["B", "A"]);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            request_timeout_secs: 2,
            connect_timeout_secs: 1,
        };
        let http_client = Client::builder()
            .no_proxy()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .expect("Failed to create HTTP client");
        let backend = HttpBackend::with_client(http_client, config.normalized_base_url());
        let err = backend.generate_factors("laptop").await.unwrap_err();
        assert!(matches!(err, ExpertosyError::Network { .. }));
        assert!(err.is_retryable());
    }
}
