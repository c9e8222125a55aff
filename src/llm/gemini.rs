//! Google Gemini `generateContent` client.
//!
//! One prompt in, one text part out. The API key travels in the
//! `x-goog-api-key` header so request URLs stay safe to log.

use serde::Serialize;
use serde_json::Value;

use super::config::LlmTimeouts;
use super::http::{ProviderAuth, ProviderHttp};
use super::types::LlmError;

pub struct GeminiClient {
    http: ProviderHttp,
    model: String,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: String, model: String, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = ProviderHttp::new(api_key, &base_url, ProviderAuth::Header("x-goog-api-key"), timeouts)?;
        Ok(Self { http, model })
    }

    /// Send `prompt` as a single user turn and return the first text part.
    ///
    /// # Errors
    ///
    /// `ApiRequest` on transport failure, `ApiResponse` on a non-2xx status,
    /// `ApiParse` when the body lacks `candidates[0].content.parts[0].text`.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let body = GenerateRequest { contents: [GenContent { parts: [GenPart { text: prompt }] }] };
        let path = format!("/models/{}:generateContent", self.model);
        let text = self.http.post_json(&path, &body).await?;
        parse_generate_content_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [GenContent<'a>; 1],
}

#[derive(Serialize)]
struct GenContent<'a> {
    parts: [GenPart<'a>; 1],
}

#[derive(Serialize)]
struct GenPart<'a> {
    text: &'a str,
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

pub(crate) fn parse_generate_content_response(json_text: &str) -> Result<String, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    let Some(candidate) = root
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
    else {
        return Err(LlmError::ApiParse("generateContent: missing candidates[0]".to_string()));
    };
    let Some(part) = candidate
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
    else {
        return Err(LlmError::ApiParse("generateContent: missing content.parts[0]".to_string()));
    };
    match part.get("text").and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
        Some(_) => Err(LlmError::ApiParse("generateContent: empty text".to_string())),
        None => Err(LlmError::ApiParse("generateContent: parts[0].text is not a string".to_string())),
    }
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
