//! HTTP transport shared by the provider clients.
//!
//! Providers differ only in endpoint path, request body, and how the API key
//! is attached. Status and transport errors map onto `LlmError` the same way
//! for every provider.

use std::time::Duration;

use serde::Serialize;

use super::config::LlmTimeouts;
use super::types::LlmError;

/// How the API key is attached to each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProviderAuth {
    /// Raw key in the named header.
    Header(&'static str),
    /// `Authorization: Bearer <key>`.
    Bearer,
}

pub(crate) struct ProviderHttp {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    auth: ProviderAuth,
}

impl ProviderHttp {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub(crate) fn new(
        api_key: String,
        base_url: &str,
        auth: ProviderAuth,
        timeouts: LlmTimeouts,
    ) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        let base_url = base_url.trim_end_matches('/').to_string();
        Ok(Self { http, api_key, base_url, auth })
    }

    /// POST `body` as JSON to `{base_url}{path}` and return the raw 2xx body.
    pub(crate) async fn post_json(&self, path: &str, body: &impl Serialize) -> Result<String, LlmError> {
        let url = format!("{}{}", self.base_url, path);
        let request = self.http.post(url).json(body);
        let request = match self.auth {
            ProviderAuth::Header(name) => request.header(name, &self.api_key),
            ProviderAuth::Bearer => request.bearer_auth(&self.api_key),
        };
        let response = request
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if !status.is_success() {
            return Err(LlmError::ApiResponse { status: status.as_u16(), body: text });
        }
        Ok(text)
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
