//! Core traits and types for secret lookup

use thiserror::Error;

/// Information about a secret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretInfo {
    /// Whether a usable value exists
    pub available: bool,
    /// Which source provided the secret ("config", "env", ...)
    pub source: String,
}

impl SecretInfo {
    pub fn new(available: bool, source: impl Into<String>) -> Self {
        Self {
            available,
            source: source.into(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            available: false,
            source: "none".to_string(),
        }
    }
}

/// Errors that can occur during secret store operations
#[derive(Error, Debug)]
pub enum SecretStoreError {
    #[error("Store is read-only")]
    ReadOnly,

    #[error("Secret not found: {0}")]
    NotFound(String),

    #[error("Failed to persist secret: {0}")]
    Persist(String),

    #[error("Store error: {0}")]
    Other(String),
}

pub type SecretStoreResult<T> = Result<T, SecretStoreError>;

/// Trait for secret storage implementations
///
/// Plugins and chat providers only see this trait, so the same code runs
/// against the encrypted config file, the process environment or an
/// in-memory map in tests.
///
/// # Example
///
/// ```
/// use fuinjutsu_core::secrets::{SecretStore, EnvSecretStore};
///
/// let store = EnvSecretStore::new();
/// // store.get("openai") will check OPENAI_API_KEY
/// ```
pub trait SecretStore: Send + Sync {
    /// Human-readable name of this store
    fn name(&self) -> &str;

    /// Retrieve a secret for a service id
    fn get(&self, service_id: &str) -> Option<String>;

    /// Store a secret
    ///
    /// Returns `Err(SecretStoreError::ReadOnly)` if the store doesn't support writing.
    fn store(&self, service_id: &str, value: &str) -> SecretStoreResult<()>;

    /// Delete a secret; deleting an absent secret is not an error
    fn delete(&self, service_id: &str) -> SecretStoreResult<()>;

    /// Check if a secret exists
    fn has(&self, service_id: &str) -> bool {
        self.get(service_id).is_some()
    }

    /// Get information about a secret
    fn get_info(&self, service_id: &str) -> SecretInfo {
        if self.has(service_id) {
            SecretInfo::new(true, self.name())
        } else {
            SecretInfo::not_found()
        }
    }
}

/// Environment variable consulted for a service id: `openai` -> `OPENAI_API_KEY`
pub fn env_var_for(service_id: &str) -> String {
    format!("{}_API_KEY", service_id.trim().to_uppercase())
}
