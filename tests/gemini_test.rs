//! Integration tests for the Gemini client and analyzer
//!
//! Tests HTTP behavior using wiremock for request/response mocking.

use std::time::Duration;

use serde_json::json;
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use ge_detective::analysis::{Analyzer, GeminiAnalyzer};
use ge_detective::config::{GeminiConfig, RequestConfig};
use ge_detective::error::{AnalysisError, AnalysisErrorKind, GeminiError};
use ge_detective::gemini::{GeminiClient, GenerateContentRequest};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

/// Create a test client pointing to mock server
fn create_test_client(base_url: &str, api_key: Option<&str>) -> GeminiClient {
    let config = GeminiConfig {
        api_key: api_key.map(str::to_string),
        base_url: base_url.to_string(),
        ..GeminiConfig::default()
    };

    let request_config = RequestConfig { timeout_ms: 2000 };

    GeminiClient::new(&config, request_config).expect("Failed to create client")
}

fn create_test_analyzer(base_url: &str) -> GeminiAnalyzer {
    GeminiAnalyzer::new(create_test_client(base_url, Some("test-api-key")))
}

fn result_json() -> serde_json::Value {
    json!({
        "stats": {
            "maleCount": 1,
            "femaleCount": 1,
            "unknownCount": 0,
            "maleRoles": ["经理"],
            "femaleRoles": []
        },
        "narrative": {
            "powerDynamics": "张三是权力主体。",
            "adjectiveAnalysis": "缺乏对李四的特质描写。",
            "socialRoles": "李四被局限于家庭。",
            "summary": "男主外，女主内。"
        },
        "suggestions": {
            "rewriteTips": ["为李四补充职业"],
            "reflectionQuestions": ["为什么是李四做饭？"]
        }
    })
}

fn reply_with_text(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "modelVersion": "gemini-2.5-flash"
    }))
}

#[cfg(test)]
mod analyze_tests {
    use super::*;

    #[tokio::test]
    async fn test_successful_analysis() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("x-goog-api-key", "test-api-key"))
            .and(header("Content-Type", "application/json"))
            .respond_with(reply_with_text(&result_json().to_string()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let analyzer = create_test_analyzer(&mock_server.uri());
        let result = analyzer.analyze("张三是经理，李四在家做饭。").await;

        assert!(result.is_ok(), "Analysis should succeed: {:?}", result.err());
        let result = result.unwrap();
        assert_eq!(result.stats.male_count, 1);
        assert_eq!(result.stats.female_count, 1);
        assert_eq!(result.stats.male_roles, vec!["经理".to_string()]);
        assert!(result.stats.female_roles.is_empty());
        assert_eq!(result.narrative.summary, "男主外，女主内。");
    }

    #[tokio::test]
    async fn test_request_carries_schema_and_text() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(body_partial_json(json!({
                "generationConfig": {"responseMimeType": "application/json"}
            })))
            .respond_with(reply_with_text(&result_json().to_string()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let analyzer = create_test_analyzer(&mock_server.uri());
        analyzer.analyze("李四在家做饭。").await.unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let user_text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(user_text.ends_with("李四在家做饭。"));
        assert_eq!(body["contents"][0]["role"], "user");
        assert!(body["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("GE Detective"));
        assert_eq!(
            body["generationConfig"]["responseSchema"]["required"],
            json!(["stats", "narrative", "suggestions"])
        );
    }

    #[tokio::test]
    async fn test_identical_input_is_not_cached() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(reply_with_text(&result_json().to_string()))
            .expect(2)
            .mount(&mock_server)
            .await;

        let analyzer = create_test_analyzer(&mock_server.uri());
        analyzer.analyze("same text").await.unwrap();
        analyzer.analyze("same text").await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(reply_with_text("{}"))
            .expect(0)
            .mount(&mock_server)
            .await;

        let analyzer = GeminiAnalyzer::new(create_test_client(&mock_server.uri(), None));
        let err = analyzer.analyze("text").await.unwrap_err();

        assert!(matches!(err, AnalysisError::MissingApiKey));
        assert_eq!(err.kind(), AnalysisErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_empty_candidates_is_empty_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [],
                "promptFeedback": {"blockReason": "SAFETY"}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let analyzer = create_test_analyzer(&mock_server.uri());
        let err = analyzer.analyze("text").await.unwrap_err();

        assert!(matches!(err, AnalysisError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_non_schema_reply_is_schema_mismatch() {
        let mock_server = MockServer::start().await;

        let mut incomplete = result_json();
        incomplete["stats"].as_object_mut().unwrap().remove("maleCount");

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(reply_with_text(&incomplete.to_string()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let analyzer = create_test_analyzer(&mock_server.uri());
        let err = analyzer.analyze("text").await.unwrap_err();

        assert!(matches!(err, AnalysisError::SchemaMismatch { .. }));
        assert_eq!(err.kind(), AnalysisErrorKind::SchemaMismatch);
    }

    #[tokio::test]
    async fn test_prose_reply_is_schema_mismatch() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(reply_with_text("这段文字没有明显的性别偏见。"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let analyzer = create_test_analyzer(&mock_server.uri());
        let err = analyzer.analyze("text").await.unwrap_err();

        assert!(matches!(err, AnalysisError::SchemaMismatch { .. }));
    }
}

#[cfg(test)]
mod transport_error_tests {
    use super::*;

    #[tokio::test]
    async fn test_server_error_is_single_attempt() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({
                "error": {"code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE"}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let analyzer = create_test_analyzer(&mock_server.uri());
        let err = analyzer.analyze("text").await.unwrap_err();

        match err {
            AnalysisError::Transport(GeminiError::Api { status, message }) => {
                assert_eq!(status, 503);
                assert!(message.contains("overloaded"));
            }
            other => panic!("Expected transport API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rate_limit_is_transport_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(
                ResponseTemplate::new(429)
                    .set_body_json(json!({
                        "error": {"code": 429, "message": "Resource exhausted", "status": "RESOURCE_EXHAUSTED"}
                    }))
                    .insert_header("Retry-After", "60"),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let analyzer = create_test_analyzer(&mock_server.uri());
        let err = analyzer.analyze("text").await.unwrap_err();

        assert_eq!(err.kind(), AnalysisErrorKind::Transport);
        assert_eq!(err.user_message(), "分析失败，请稍后重试。");
    }

    #[tokio::test]
    async fn test_slow_reply_times_out() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(reply_with_text("{}").set_delay(Duration::from_millis(500)))
            .mount(&mock_server)
            .await;

        let config = GeminiConfig {
            api_key: Some("test-api-key".to_string()),
            base_url: mock_server.uri(),
            ..GeminiConfig::default()
        };
        let client = GeminiClient::new(&config, RequestConfig { timeout_ms: 100 }).unwrap();

        let err = client
            .generate_content(&GenerateContentRequest::new("text"))
            .await
            .unwrap_err();

        assert!(matches!(err, GeminiError::Timeout { timeout_ms: 100 }));
    }

    #[tokio::test]
    async fn test_non_json_body_is_invalid_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let analyzer = create_test_analyzer(&mock_server.uri());
        let err = analyzer.analyze("text").await.unwrap_err();

        assert!(matches!(
            err,
            AnalysisError::Transport(GeminiError::InvalidResponse { .. })
        ));
    }
}
