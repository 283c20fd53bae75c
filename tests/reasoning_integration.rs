//! Commentary strategy tests against a mocked Gemini endpoint
//!
//! ```
//! cargo test --test reasoning_integration
//! ```

mod common;

use parlay_advisor::config::{ReasoningConfig, ReasoningMode};
use parlay_advisor::{
    build_commentator, Commentator, FallbackCommentator, GeminiCommentator, ParlayEvaluation,
    ParlayEvaluator, RuleBasedCommentator,
};
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-1.5-flash";

fn evaluation() -> ParlayEvaluation {
    ParlayEvaluator::default()
        .evaluate_records(&common::prop_parlay(), &common::sample_records())
        .unwrap()
}

fn gemini_reply(text: &str) -> serde_json::Value {
    json!({
        "candidates": [
            {"content": {"role": "model", "parts": [{"text": text}]}, "finishReason": "STOP"}
        ]
    })
}

#[tokio::test]
async fn test_gemini_commentary_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/v1beta/models/{}:generateContent", MODEL)))
        .and(query_param("key", "test-key"))
        .and(body_string_contains("Verdict: Moderate Value"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("**Play it.**")))
        .expect(1)
        .mount(&server)
        .await;

    let commentator = GeminiCommentator::new(&server.uri(), "test-key", MODEL).unwrap();
    let text = commentator.produce_commentary(&evaluation()).await.unwrap();

    assert_eq!(text, "**Play it.**");
}

#[tokio::test]
async fn test_gemini_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let commentator = GeminiCommentator::new(&server.uri(), "test-key", MODEL).unwrap();
    let err = commentator.produce_commentary(&evaluation()).await.unwrap_err();

    assert!(err.to_string().contains("500"), "{}", err);
}

#[tokio::test]
async fn test_empty_candidates_are_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let commentator = GeminiCommentator::new(&server.uri(), "test-key", MODEL).unwrap();
    assert!(commentator.produce_commentary(&evaluation()).await.is_err());
}

#[tokio::test]
async fn test_fallback_uses_rule_based_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let evaluation = evaluation();
    let commentator = FallbackCommentator::new(
        Box::new(GeminiCommentator::new(&server.uri(), "test-key", MODEL).unwrap()),
        Box::new(RuleBasedCommentator::new()),
    );
    let text = commentator.produce_commentary(&evaluation).await.unwrap();

    assert!(text.starts_with("AI analysis unavailable"));
    assert!(text.contains("Leg mahomes-yds"));
    assert!(text.contains("Recommendation:"));
}

#[tokio::test]
async fn test_commentary_does_not_change_numbers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("Looks fine.")))
        .mount(&server)
        .await;

    let config = ReasoningConfig {
        mode: ReasoningMode::Gemini,
        gemini_api_key: Some("test-key".to_string()),
        gemini_endpoint: server.uri(),
        ..ReasoningConfig::default()
    };
    let commentator = build_commentator(&config).unwrap();

    let evaluation = evaluation();
    let before = evaluation.clone();
    let text = commentator.produce_commentary(&evaluation).await.unwrap();

    assert_eq!(text, "Looks fine.");
    assert_eq!(evaluation, before);
}

#[tokio::test]
async fn test_rule_based_mentions_expected_value() {
    let evaluation = ParlayEvaluator::default()
        .evaluate(&common::two_leg_parlay(dec!(25)), &Default::default())
        .unwrap();
    let text = RuleBasedCommentator::new()
        .produce_commentary(&evaluation)
        .await
        .unwrap();

    assert!(text.contains("Combined expected value: $0.00"));
    assert!(text.contains("no clear edge"));
}
