//! LLM: multi-provider adapter for the chat assistant.
//!
//! DESIGN
//! ======
//! Configured from environment variables. The `LlmClient` enum dispatches to
//! Gemini or an OpenAI-compatible endpoint based on `LLM_PROVIDER`; callers
//! only see the single-shot [`LlmComplete`] trait.

pub mod config;
pub mod gemini;
pub(crate) mod http;
pub mod openai;
pub mod types;

#[cfg(test)]
pub(crate) mod mock_server;

use config::{LlmConfig, LlmProviderKind};
pub use types::LlmComplete;
use types::LlmError;

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete LLM client that dispatches to Gemini or OpenAI.
///
/// Configured from environment variables by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: LlmProvider,
    model: String,
}

enum LlmProvider {
    Gemini(gemini::GeminiClient),
    OpenAi(openai::OpenAiClient),
}

impl LlmClient {
    /// Build an LLM client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let model = config.model.clone();
        let inner = match config.provider {
            LlmProviderKind::Gemini => LlmProvider::Gemini(gemini::GeminiClient::new(
                config.api_key,
                config.model,
                config.base_url,
                config.timeouts,
            )?),
            LlmProviderKind::OpenAi => LlmProvider::OpenAi(openai::OpenAiClient::new(
                config.api_key,
                config.model,
                config.base_url,
                config.timeouts,
            )?),
        };
        Ok(Self { inner, model })
    }

    /// Return the configured model name (e.g. `"gemini-pro"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn provider(&self) -> LlmProviderKind {
        match self.inner {
            LlmProvider::Gemini(_) => LlmProviderKind::Gemini,
            LlmProvider::OpenAi(_) => LlmProviderKind::OpenAi,
        }
    }
}

#[async_trait::async_trait]
impl LlmComplete for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        match &self.inner {
            LlmProvider::Gemini(c) => c.generate(prompt).await,
            LlmProvider::OpenAi(c) => c.chat_completion(prompt).await,
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
