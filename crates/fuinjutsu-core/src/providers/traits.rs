//! Provider trait definition

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::{ProviderError, ProviderResult};
use crate::secrets::SecretStore;

/// Model configuration for provider requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderModelConfig {
    /// Model identifier as used by the provider's API
    pub model: String,
    /// Custom API base URL
    pub api_base: Option<String>,
}

impl ProviderModelConfig {
    /// Create a new model config
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_base: None,
        }
    }

    /// Set the API base URL
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }
}

/// Generation options for a single completion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChatOptions {
    /// Sampling temperature
    pub temperature: f64,
    /// Maximum tokens to generate
    pub max_tokens: u32,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 150,
        }
    }
}

impl ChatOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set temperature
    pub fn with_temperature(mut self, temp: f64) -> Self {
        self.temperature = temp;
        self
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = tokens;
        self
    }
}

/// Single-shot chat completion against a hosted LLM
///
/// One request per call; no retries or streaming.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "huggingface")
    fn name(&self) -> &str;

    /// Get the default API base URL
    fn default_api_base(&self) -> &str;

    /// Send a prompt and return the generated text
    async fn complete(&self, prompt: &str, options: ChatOptions) -> ProviderResult<String>;

    /// Get the API base URL, using custom if provided
    fn get_api_base(&self, model: &ProviderModelConfig) -> String {
        model
            .api_base
            .clone()
            .unwrap_or_else(|| self.default_api_base().to_string())
            .trim_end_matches('/')
            .to_string()
    }
}

/// Look up the API key for `service`, treating blank values as missing
pub(crate) fn require_api_key(secrets: &dyn SecretStore, service: &str) -> ProviderResult<String> {
    secrets
        .get(service)
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| ProviderError::missing_api_key(service))
}

/// Check the status and parse the JSON body of a provider response
pub(crate) async fn read_json_response(
    provider: &str,
    response: reqwest::Response,
) -> ProviderResult<serde_json::Value> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::transport(provider, e))?;

    if !status.is_success() {
        return Err(ProviderError::status(provider, status.as_u16(), body));
    }

    serde_json::from_str(&body).map_err(|e| ProviderError::malformed(provider, e.to_string()))
}
