//! Mock provider for testing
//!
//! Provides deterministic responses without network dependencies.

use std::sync::Arc;

use async_trait::async_trait;

use super::error::{ProviderError, ProviderResult};
use super::traits::{ChatOptions, ChatProvider};
use crate::logging::Logger;

/// Mock response mode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MockMode {
    /// Echo back the prompt
    #[default]
    Echo,
    /// Return a fixed response
    Fixed(String),
    /// Fail with an upstream-style error
    Error(String),
}

/// Mock LLM provider for testing
pub struct MockProvider {
    mode: MockMode,
    logger: Arc<dyn Logger>,
}

impl MockProvider {
    pub fn new(mode: MockMode, logger: Arc<dyn Logger>) -> Self {
        Self { mode, logger }
    }

    /// Create an echo provider
    pub fn echo(logger: Arc<dyn Logger>) -> Self {
        Self::new(MockMode::Echo, logger)
    }

    /// Create a fixed response provider
    pub fn fixed(response: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self::new(MockMode::Fixed(response.into()), logger)
    }

    /// Create an error-producing provider
    pub fn error(message: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self::new(MockMode::Error(message.into()), logger)
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn default_api_base(&self) -> &str {
        "mock://localhost"
    }

    async fn complete(&self, prompt: &str, options: ChatOptions) -> ProviderResult<String> {
        self.logger.debug(&format!(
            "[MockProvider] complete mode={:?} max_tokens={}",
            self.mode, options.max_tokens
        ));

        match &self.mode {
            MockMode::Echo => Ok(format!("Echo: {}", prompt)),
            MockMode::Fixed(response) => Ok(response.clone()),
            MockMode::Error(message) => Err(ProviderError::status(self.name(), 500, message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;

    fn test_logger() -> Arc<dyn Logger> {
        Arc::new(NoOpLogger)
    }

    #[tokio::test]
    async fn test_echo_mode() {
        let provider = MockProvider::echo(test_logger());
        let answer = provider.complete("Hello", ChatOptions::default()).await.unwrap();
        assert_eq!(answer, "Echo: Hello");
    }

    #[tokio::test]
    async fn test_fixed_mode() {
        let provider = MockProvider::fixed("Always this", test_logger());
        let answer = provider.complete("anything", ChatOptions::default()).await.unwrap();
        assert_eq!(answer, "Always this");
    }

    #[tokio::test]
    async fn test_error_mode() {
        let provider = MockProvider::error("Simulated failure", test_logger());
        let err = provider.complete("x", ChatOptions::default()).await.unwrap_err();
        assert!(err.to_string().contains("Simulated failure"));
        assert!(err.is_upstream());
    }
}
