//! LLM types: provider-neutral errors and the completion trait.
//!
//! Provider clients (Gemini, OpenAI-compatible) all return a plain reply
//! string for a single prompt, so the shared surface is small.

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the LLM provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The LLM provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The response body did not contain the generated text.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl crate::error::ErrorCode for LlmError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::ApiRequest(_) => "E_API_REQUEST",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::ApiParse(_) => "E_API_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::ApiRequest(_) | Self::ApiResponse { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// FAILURE KIND
// =============================================================================

/// How a completion call failed, as seen by the chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The call never completed at the network level.
    TransportFailure,
    /// The endpoint answered with a non-2xx status.
    NonSuccessStatus,
    /// The endpoint answered 2xx but the text field was absent or mistyped.
    MalformedPayload,
}

impl FailureKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TransportFailure => "transport_failure",
            Self::NonSuccessStatus => "non_success_status",
            Self::MalformedPayload => "malformed_payload",
        }
    }
}

impl From<&LlmError> for FailureKind {
    fn from(err: &LlmError) -> Self {
        match err {
            LlmError::ApiResponse { .. } => Self::NonSuccessStatus,
            LlmError::ApiParse(_) => Self::MalformedPayload,
            // Setup errors only surface at call time when no request was sent.
            LlmError::ApiRequest(_)
            | LlmError::ConfigParse(_)
            | LlmError::MissingApiKey { .. }
            | LlmError::HttpClientBuild(_) => Self::TransportFailure,
        }
    }
}

// =============================================================================
// LLM COMPLETION TRAIT
// =============================================================================

/// Provider-neutral async trait for single-shot completions. Enables mocking
/// in tests.
#[async_trait::async_trait]
pub trait LlmComplete: Send + Sync {
    /// Send one prompt and return the generated text.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails, the provider answers
    /// with a non-success status, or the response has no generated text.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
