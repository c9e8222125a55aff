use super::*;
use crate::llm::mock_server;
use axum::http::StatusCode;

fn client(base_url: String) -> GeminiClient {
    GeminiClient::new("test-key".into(), "gemini-pro".into(), base_url, LlmTimeouts::default()).unwrap()
}

// ===== response parsing =====

#[test]
fn parse_text_response() {
    let json = serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": "We can set up a demo!" }] },
            "finishReason": "STOP"
        }]
    })
    .to_string();
    assert_eq!(parse_generate_content_response(&json).unwrap(), "We can set up a demo!");
}

#[test]
fn parse_uses_first_candidate_and_part() {
    let json = serde_json::json!({
        "candidates": [
            { "content": { "parts": [{ "text": "first" }, { "text": "second" }] } },
            { "content": { "parts": [{ "text": "other" }] } }
        ]
    })
    .to_string();
    assert_eq!(parse_generate_content_response(&json).unwrap(), "first");
}

#[test]
fn parse_missing_candidates() {
    let json = serde_json::json!({ "promptFeedback": { "blockReason": "SAFETY" } }).to_string();
    assert!(matches!(parse_generate_content_response(&json), Err(LlmError::ApiParse(_))));
}

#[test]
fn parse_empty_candidates() {
    let json = serde_json::json!({ "candidates": [] }).to_string();
    assert!(matches!(parse_generate_content_response(&json), Err(LlmError::ApiParse(_))));
}

#[test]
fn parse_missing_parts() {
    let json = serde_json::json!({ "candidates": [{ "content": {} }] }).to_string();
    assert!(matches!(parse_generate_content_response(&json), Err(LlmError::ApiParse(_))));
}

#[test]
fn parse_non_string_text() {
    let json = serde_json::json!({ "candidates": [{ "content": { "parts": [{ "text": 42 }] } }] }).to_string();
    assert!(matches!(parse_generate_content_response(&json), Err(LlmError::ApiParse(_))));
}

#[test]
fn parse_blank_text() {
    let json = serde_json::json!({ "candidates": [{ "content": { "parts": [{ "text": "  " }] } }] }).to_string();
    assert!(matches!(parse_generate_content_response(&json), Err(LlmError::ApiParse(_))));
}

#[test]
fn parse_invalid_json() {
    assert!(matches!(parse_generate_content_response("<html>oops</html>"), Err(LlmError::ApiParse(_))));
}

// ===== HTTP round trips =====

#[tokio::test]
async fn generate_posts_prompt_and_returns_text() {
    let provider = mock_server::spawn(
        StatusCode::OK,
        r#"{"candidates":[{"content":{"parts":[{"text":"Olá!"}]}}]}"#,
    )
    .await;

    let reply = client(provider.base_url.clone())
        .generate("hello there")
        .await
        .unwrap();
    assert_eq!(reply, "Olá!");

    let requests = provider.captured();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/models/gemini-pro:generateContent");
    assert_eq!(requests[0].headers.get("x-goog-api-key").unwrap(), "test-key");
    assert_eq!(
        requests[0].body,
        serde_json::json!({ "contents": [{ "parts": [{ "text": "hello there" }] }] })
    );
}

#[tokio::test]
async fn generate_non_success_status() {
    let provider = mock_server::spawn(StatusCode::SERVICE_UNAVAILABLE, r#"{"error":"overloaded"}"#).await;

    let err = client(provider.base_url.clone())
        .generate("hi")
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::ApiResponse { status: 503, ref body } if body.contains("overloaded")));
}

#[tokio::test]
async fn generate_malformed_success_body() {
    let provider = mock_server::spawn(StatusCode::OK, r#"{"candidates":[]}"#).await;

    let err = client(provider.base_url.clone())
        .generate("hi")
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[tokio::test]
async fn generate_connection_refused() {
    let base_url = mock_server::refused_base_url().await;

    let err = client(base_url).generate("hi").await.unwrap_err();
    assert!(matches!(err, LlmError::ApiRequest(_)));
}
