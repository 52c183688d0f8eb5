//! LLM chat providers
//!
//! Each provider sends one prompt per call to a hosted API and returns the
//! generated text. API keys are read from a [`SecretStore`] at call time, so
//! a key saved through the config store is picked up without a restart.
//!
//! The `MockProvider` is kept for testing purposes.

mod traits;
mod error;
mod huggingface;
mod openai;
mod mock;

pub use traits::{ChatOptions, ChatProvider, ProviderModelConfig};
pub use error::{ProviderError, ProviderResult};
pub use huggingface::{HuggingFaceProvider, HUGGINGFACE_API_BASE, HUGGINGFACE_DEFAULT_MODEL};
pub use openai::{OpenAiProvider, OPENAI_API_BASE, OPENAI_DEFAULT_MODEL};
pub use mock::{MockMode, MockProvider};

use std::sync::Arc;

use crate::config::canonical_service_id;
use crate::logging::Logger;
use crate::secrets::SecretStore;

/// Create a provider for the given provider ID
///
/// Returns `None` for ids that are not in [`supported_providers`].
pub fn create_provider(
    provider_id: &str,
    secrets: Arc<dyn SecretStore>,
    http: reqwest::Client,
    logger: Arc<dyn Logger>,
) -> Option<Arc<dyn ChatProvider>> {
    match canonical_service_id(provider_id).as_str() {
        "huggingface" => Some(Arc::new(HuggingFaceProvider::new(secrets, http, logger)) as Arc<dyn ChatProvider>),
        "openai" => Some(Arc::new(OpenAiProvider::new(secrets, http, logger)) as Arc<dyn ChatProvider>),
        "mock" => Some(Arc::new(MockProvider::echo(logger)) as Arc<dyn ChatProvider>),
        _ => None,
    }
}

/// List all supported provider IDs
pub fn supported_providers() -> Vec<&'static str> {
    vec!["huggingface", "openai", "mock"]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::secrets::MemorySecretStore;

    fn make(id: &str) -> Option<Arc<dyn ChatProvider>> {
        create_provider(
            id,
            Arc::new(MemorySecretStore::new()),
            reqwest::Client::new(),
            Arc::new(NoOpLogger),
        )
    }

    #[test]
    fn test_create_known_providers() {
        for id in supported_providers() {
            assert_eq!(make(id).unwrap().name(), id);
        }
        assert_eq!(make("OpenAI").unwrap().name(), "openai");
    }

    #[test]
    fn test_unknown_provider() {
        assert!(make("anthropic").is_none());
        assert!(make("").is_none());
    }
}
