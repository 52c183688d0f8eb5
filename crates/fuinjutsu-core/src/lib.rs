//! Fûinjutsu Core
//!
//! Local building blocks of the Fûinjutsu LLM workbench:
//!
//! - `config`: JSON settings file with API keys encrypted at rest
//! - `secrets`: the `SecretStore` trait plugins and providers read keys through
//! - `mcp`: registry of pluggable text-processing modules (MCPs)
//! - `providers`: single-shot chat completion against hosted LLM APIs
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fuinjutsu_core::{ConfigStore, PluginCatalog, PluginContext, PluginRegistry, TracingLogger};
//!
//! let logger = Arc::new(TracingLogger::new("fuinjutsu"));
//! let store = Arc::new(ConfigStore::open_default());
//! store.set("huggingface", "hf_...")?;
//!
//! let registry = PluginRegistry::new(
//!     PluginCatalog::builtin(),
//!     PluginContext::new(store.clone(), logger),
//! );
//! registry.discover();
//! let output = registry.execute("text_summarizer", input).await?;
//! ```

pub mod types;
pub mod secrets;
pub mod logging;
pub mod crypto;
pub mod config;
pub mod providers;
pub mod mcp;

// Re-export commonly used types
pub use types::{ChatMessage, MessageRole};

pub use secrets::{
    SecretStore, SecretInfo, SecretStoreError, SecretStoreResult,
    EnvSecretStore, MemorySecretStore,
};

pub use logging::{Logger, NoOpLogger, TracingLogger};

pub use crypto::{CryptoError, SecretCipher};

pub use config::{
    ApiKeyEntry, ConfigError, ConfigResult, ConfigStore, Encryption, KeyStatus, StoreOptions,
    canonical_service_id, mask_secret, KNOWN_SERVICES,
};

pub use providers::{
    ChatOptions, ChatProvider, ProviderError, ProviderResult,
    create_provider, supported_providers,
};

pub use mcp::{
    DiscoveryReport, JsonMap, Plugin, PluginCatalog, PluginContext, PluginError,
    PluginMetadata, PluginRegistry, RegistryError,
};
