//! Secret lookup abstractions
//!
//! - `SecretStore` trait consumed by plugins and chat providers
//! - `EnvSecretStore`: `<SERVICE>_API_KEY` environment convention
//! - `MemorySecretStore`: ephemeral store for tests
//!
//! The persistent, encrypted store lives in [`crate::config::ConfigStore`].

mod traits;
mod env_store;
mod memory_store;

pub use traits::{env_var_for, SecretStore, SecretInfo, SecretStoreError, SecretStoreResult};
pub use env_store::EnvSecretStore;
pub use memory_store::MemorySecretStore;
