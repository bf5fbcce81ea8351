use crate::error::UpstreamError;
use crate::gemini::GeminiProvider;
use crate::provider::{CompletionRequest, Provider};
use crate::together::TogetherProvider;
use skiff_core::types::ChatMessage;
use std::time::Duration;

fn request() -> CompletionRequest {
    CompletionRequest::new(vec![
        ChatMessage::system("be helpful"),
        ChatMessage::user("q1"),
        ChatMessage::assistant("a1"),
        ChatMessage::user("q2"),
    ])
}

// ========== Status Mapping ==========

#[test]
fn test_status_mapping() {
    assert!(matches!(
        UpstreamError::from_status(reqwest::StatusCode::UNAUTHORIZED),
        UpstreamError::Auth
    ));
    assert!(matches!(
        UpstreamError::from_status(reqwest::StatusCode::FORBIDDEN),
        UpstreamError::Auth
    ));
    assert!(matches!(
        UpstreamError::from_status(reqwest::StatusCode::TOO_MANY_REQUESTS),
        UpstreamError::Quota
    ));
    assert!(matches!(
        UpstreamError::from_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR),
        UpstreamError::Transport(_)
    ));
}

// ========== Defaults ==========

#[test]
fn test_request_defaults() {
    let req = CompletionRequest::new(Vec::new());
    assert_eq!(req.temperature, 0.7);
    assert_eq!(req.max_tokens, 2000);
    let req = req.with_options(0.2, 100);
    assert_eq!(req.temperature, 0.2);
    assert_eq!(req.max_tokens, 100);
}

// ========== Together Payload ==========

#[test]
fn test_together_payload_shape() {
    let provider = TogetherProvider::new(Some("k".into()), Duration::from_secs(30));
    let payload = provider.build_payload(&request());
    assert_eq!(payload["model"], "mistralai/Mixtral-8x7B-Instruct-v0.1");
    assert!((payload["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    assert_eq!(payload["max_tokens"], 2000);
    let messages = payload["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[3]["content"], "q2");
}

#[test]
fn test_together_model_override() {
    let provider = TogetherProvider::new(Some("k".into()), Duration::from_secs(30))
        .with_model("other/model");
    let payload = provider.build_payload(&request());
    assert_eq!(payload["model"], "other/model");
}

#[tokio::test]
async fn test_together_missing_key() {
    let provider = TogetherProvider::new(None, Duration::from_secs(1));
    let err = provider.complete(request()).await.unwrap_err();
    assert!(matches!(err, UpstreamError::MissingApiKey("TOGETHER_API_KEY")));
}

#[tokio::test]
async fn test_together_blank_key_is_missing() {
    let provider = TogetherProvider::new(Some(String::new()), Duration::from_secs(1));
    let err = provider.complete(request()).await.unwrap_err();
    assert!(matches!(err, UpstreamError::MissingApiKey(_)));
}

// ========== Gemini Payload ==========

#[test]
fn test_gemini_payload_shape() {
    let provider = GeminiProvider::new(Some("k".into()), Duration::from_secs(30));
    let payload = provider.build_payload(&request());

    // Leading system message is lifted out of the conversation.
    assert_eq!(payload["systemInstruction"]["parts"][0]["text"], "be helpful");
    let contents = payload["contents"].as_array().unwrap();
    assert_eq!(contents.len(), 3);
    assert_eq!(contents[0]["role"], "user");
    assert_eq!(contents[1]["role"], "model");
    assert_eq!(contents[1]["parts"][0]["text"], "a1");
    assert_eq!(contents[2]["parts"][0]["text"], "q2");
    assert_eq!(payload["generationConfig"]["maxOutputTokens"], 2000);
}

#[test]
fn test_gemini_payload_without_system() {
    let provider = GeminiProvider::new(Some("k".into()), Duration::from_secs(30));
    let payload = provider.build_payload(&CompletionRequest::new(vec![ChatMessage::user("hi")]));
    assert!(payload.get("systemInstruction").is_none());
    assert_eq!(payload["contents"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_gemini_missing_key() {
    let provider = GeminiProvider::new(None, Duration::from_secs(1));
    let err = provider.complete(request()).await.unwrap_err();
    assert!(matches!(err, UpstreamError::MissingApiKey("GEMINI_API_KEY")));
}

// ========== Provider Ids ==========

#[test]
fn test_provider_ids() {
    let t = TogetherProvider::new(None, Duration::from_secs(1));
    let g = GeminiProvider::new(None, Duration::from_secs(1));
    assert_eq!(t.id(), "together");
    assert_eq!(g.id(), "gemini");
}
