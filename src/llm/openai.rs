//! OpenAI-compatible chat completions client.
//!
//! Sends the prompt as the only user message to `/chat/completions`; works
//! with any server that speaks that endpoint.

use serde::Serialize;
use serde_json::Value;

use super::config::LlmTimeouts;
use super::http::{ProviderAuth, ProviderHttp};
use super::types::LlmError;

pub struct OpenAiClient {
    http: ProviderHttp,
    model: String,
}

impl OpenAiClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: String, model: String, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = ProviderHttp::new(api_key, &base_url, ProviderAuth::Bearer, timeouts)?;
        Ok(Self { http, model })
    }

    /// # Errors
    ///
    /// `ApiRequest` on transport failure, `ApiResponse` on a non-2xx status,
    /// `ApiParse` when the body lacks `choices[0].message.content`.
    pub async fn chat_completion(&self, prompt: &str) -> Result<String, LlmError> {
        let messages = [CcMessage { role: "user", content: prompt }];
        let body = CcRequest { model: &self.model, messages: &messages };
        let text = self.http.post_json("/chat/completions", &body).await?;
        parse_chat_completions_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct CcRequest<'a> {
    model: &'a str,
    messages: &'a [CcMessage<'a>],
}

#[derive(Serialize)]
struct CcMessage<'a> {
    role: &'static str,
    content: &'a str,
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

pub(crate) fn parse_chat_completions_response(json_text: &str) -> Result<String, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    let Some(choice) = root
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
    else {
        return Err(LlmError::ApiParse("chat_completions: missing choices[0]".to_string()));
    };
    match choice
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
    {
        Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
        _ => Err(LlmError::ApiParse("chat_completions: missing message content".to_string())),
    }
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
