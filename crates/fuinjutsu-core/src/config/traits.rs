//! Configuration store errors

use crate::crypto::CryptoError;
use crate::secrets::SecretStoreError;

/// Errors that can occur during configuration operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Encryption error for '{service_id}': {source}")]
    Crypto {
        service_id: String,
        #[source]
        source: CryptoError,
    },

    #[error("Invalid service id: {0:?}")]
    InvalidServiceId(String),

    /// Without encryption such a value would read back as ciphertext
    #[error("Key for '{0}' starts with the ciphertext tag and cannot be stored unencrypted")]
    TaggedPlaintext(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl From<ConfigError> for SecretStoreError {
    fn from(err: ConfigError) -> Self {
        SecretStoreError::Persist(err.to_string())
    }
}
