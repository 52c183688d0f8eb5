//! OpenAI chat completions provider

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::error::{ProviderError, ProviderResult};
use super::traits::{read_json_response, require_api_key, ChatOptions, ChatProvider, ProviderModelConfig};
use crate::logging::Logger;
use crate::secrets::SecretStore;
use crate::types::ChatMessage;

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-3.5-turbo";

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Chat completions with a fixed system prompt
pub struct OpenAiProvider {
    secrets: Arc<dyn SecretStore>,
    http: reqwest::Client,
    model: ProviderModelConfig,
    logger: Arc<dyn Logger>,
}

impl OpenAiProvider {
    pub fn new(secrets: Arc<dyn SecretStore>, http: reqwest::Client, logger: Arc<dyn Logger>) -> Self {
        Self {
            secrets,
            http,
            model: ProviderModelConfig::new(OPENAI_DEFAULT_MODEL),
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
impl ChatProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn default_api_base(&self) -> &str {
        OPENAI_API_BASE
    }

    async fn complete(&self, prompt: &str, options: ChatOptions) -> ProviderResult<String> {
        let api_key = require_api_key(self.secrets.as_ref(), self.name())?;
        let url = format!("{}/chat/completions", self.get_api_base(&self.model));

        self.logger.debug(&format!(
            "[OpenAiProvider] POST {} model={}",
            url, self.model.model
        ));

        let body = json!({
            "model": self.model.model,
            "messages": [ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)],
            "temperature": options.temperature,
            "max_tokens": options.max_tokens,
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
            .pointer("/choices/0/message/content")
            .and_then(|content| content.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                ProviderError::malformed(self.name(), "missing choices[0].message.content")
            })
    }
}
