//! Environment variable secret store

use std::env;

use super::traits::{env_var_for, SecretStore, SecretStoreError, SecretStoreResult};

/// Secret store that reads `<SERVICE>_API_KEY` environment variables
///
/// This store is read-only. It is the fallback the config store consults
/// when nothing is stored for a service.
///
/// # Example
///
/// ```
/// use fuinjutsu_core::secrets::{SecretStore, EnvSecretStore};
///
/// let store = EnvSecretStore::new();
///
/// // Reads HUGGINGFACE_API_KEY
/// let key = store.get("huggingface");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSecretStore;

impl EnvSecretStore {
    /// Create a new environment variable secret store
    pub fn new() -> Self {
        Self
    }
}

impl SecretStore for EnvSecretStore {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self, service_id: &str) -> Option<String> {
        if service_id.trim().is_empty() {
            return None;
        }

        // Empty variables count as unset
        env::var(env_var_for(service_id))
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn store(&self, _service_id: &str, _value: &str) -> SecretStoreResult<()> {
        Err(SecretStoreError::ReadOnly)
    }

    fn delete(&self, _service_id: &str) -> SecretStoreResult<()> {
        Err(SecretStoreError::ReadOnly)
    }
}
