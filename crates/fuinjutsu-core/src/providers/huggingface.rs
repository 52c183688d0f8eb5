//! HuggingFace inference API provider

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::error::{ProviderError, ProviderResult};
use super::traits::{read_json_response, require_api_key, ChatOptions, ChatProvider, ProviderModelConfig};
use crate::logging::Logger;
use crate::secrets::SecretStore;

/// Default base URL of the HuggingFace inference API
pub const HUGGINGFACE_API_BASE: &str = "https://api-inference.huggingface.co/models";

/// Text-generation model used when none is configured
pub const HUGGINGFACE_DEFAULT_MODEL: &str = "google/flan-t5-xxl";

/// Text generation through `<base>/<model>`
pub struct HuggingFaceProvider {
    secrets: Arc<dyn SecretStore>,
    http: reqwest::Client,
    model: ProviderModelConfig,
    logger: Arc<dyn Logger>,
}

impl HuggingFaceProvider {
    pub fn new(secrets: Arc<dyn SecretStore>, http: reqwest::Client, logger: Arc<dyn Logger>) -> Self {
        Self {
            secrets,
            http,
            model: ProviderModelConfig::new(HUGGINGFACE_DEFAULT_MODEL),
            logger,
        }
    }

    /// Override model or API base
    pub fn with_model(mut self, model: ProviderModelConfig) -> Self {
        self.model = model;
        self
    }
}

#[async_trait]
impl ChatProvider for HuggingFaceProvider {
    fn name(&self) -> &str {
        "huggingface"
    }

    fn default_api_base(&self) -> &str {
        HUGGINGFACE_API_BASE
    }

    async fn complete(&self, prompt: &str, options: ChatOptions) -> ProviderResult<String> {
        let api_key = require_api_key(self.secrets.as_ref(), self.name())?;
        let url = format!("{}/{}", self.get_api_base(&self.model), self.model.model);

        self.logger.debug(&format!(
            "[HuggingFaceProvider] POST {} ({} prompt chars)",
            url,
            prompt.chars().count()
        ));

        let body = json!({
            "inputs": prompt,
            "parameters": {
                "temperature": options.temperature,
                "max_length": options.max_tokens,
            }
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::transport(self.name(), e))?;

        let value = read_json_response(self.name(), response).await?;

        value
            .get(0)
            .and_then(|first| first.get("generated_text"))
            .and_then(|text| text.as_str())
            .map(str::to_string)
            .ok_or_else(|| ProviderError::malformed(self.name(), "missing [0].generated_text"))
    }
}
