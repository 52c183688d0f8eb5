//! File-backed settings and API-key store with encryption at rest

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::crypto::{is_tagged, SecretCipher};
use crate::logging::{Logger, TracingLogger};
use crate::secrets::{EnvSecretStore, SecretInfo, SecretStore, SecretStoreResult};

use super::file::{default_config_path, ConfigFile};
use super::record::{ConfigRecord, StoredSecret};
use super::service::{canonical_service_id, mask_secret};
use super::traits::{ConfigError, ConfigResult};

/// How API-key values are protected on disk
#[derive(Debug, Clone, Default)]
pub enum Encryption {
    /// Key derived from this machine's identifier
    #[default]
    Machine,
    /// Caller-supplied cipher
    Cipher(SecretCipher),
    /// Store plaintext; tagged values found on disk stay unusable
    Disabled,
}

/// Options for opening a [`ConfigStore`]
#[derive(Clone)]
pub struct StoreOptions {
    pub encryption: Encryption,
    pub logger: Arc<dyn Logger>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            encryption: Encryption::Machine,
            logger: Arc::new(TracingLogger::new("config")),
        }
    }
}

impl StoreOptions {
    pub fn with_encryption(mut self, encryption: Encryption) -> Self {
        self.encryption = encryption;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }
}

/// Display state of a stored key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStatus {
    /// Non-empty plaintext available
    Set,
    /// Stored as the empty string
    Empty,
    /// Ciphertext that could not be decrypted on this machine
    Unreadable,
}

/// A stored key prepared for display; never carries the plaintext
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyEntry {
    pub service_id: String,
    pub masked: String,
    pub status: KeyStatus,
}

/// Persistent store for settings and API keys
///
/// Every mutation rewrites the whole file synchronously. The in-memory
/// record stays authoritative when a write fails; the error is returned to
/// the caller and the write is not retried.
///
/// Key lookups fall back to the `<SERVICE>_API_KEY` environment variable
/// when nothing is stored for a service.
///
/// # Example
///
/// ```no_run
/// use fuinjutsu_core::config::ConfigStore;
///
/// let store = ConfigStore::open("config.json");
/// store.set("huggingface", "hf_xyz").unwrap();
/// assert_eq!(store.get("huggingface").as_deref(), Some("hf_xyz"));
/// ```
pub struct ConfigStore {
    path: PathBuf,
    cipher: Option<SecretCipher>,
    record: RwLock<ConfigRecord>,
    env: EnvSecretStore,
    logger: Arc<dyn Logger>,
}

impl ConfigStore {
    /// Open the store at `path` with machine-bound encryption
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::open_with(path, StoreOptions::default())
    }

    /// Open the store at the default location
    pub fn open_default() -> Self {
        Self::open(default_config_path())
    }

    /// Open the store at `path`
    ///
    /// Never fails: an unreadable or malformed file yields an empty record,
    /// and a missing file is created empty.
    pub fn open_with(path: impl Into<PathBuf>, options: StoreOptions) -> Self {
        let cipher = match options.encryption {
            Encryption::Machine => Some(SecretCipher::for_machine()),
            Encryption::Cipher(cipher) => Some(cipher),
            Encryption::Disabled => None,
        };

        let store = Self {
            path: path.into(),
            cipher,
            record: RwLock::new(ConfigRecord::default()),
            env: EnvSecretStore::new(),
            logger: options.logger,
        };

        if store.path.exists() {
            let record = store.load_record();
            *store.record.write() = record;
        } else {
            // Best effort: a failure here surfaces again on the first mutation
            let _ = store.persist(&ConfigRecord::default());
        }

        store
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether API keys are encrypted on save
    pub fn is_encrypted(&self) -> bool {
        self.cipher.is_some()
    }

    /// Re-read the file, replacing the in-memory record
    pub fn reload(&self) {
        let record = self.load_record();
        *self.record.write() = record;
    }

    fn load_record(&self) -> ConfigRecord {
        match ConfigFile::read(&self.path) {
            Ok(file) => {
                let record = ConfigRecord::from_file(file, self.cipher.as_ref(), self.logger.as_ref());
                self.logger.debug(&format!(
                    "[ConfigStore] Loaded {} settings and {} keys from {}",
                    record.settings.len(),
                    record.api_keys.len(),
                    self.path.display()
                ));
                record
            }
            Err(e) => {
                self.logger.error(&format!(
                    "[ConfigStore] Failed to load {}: {}; starting empty",
                    self.path.display(),
                    e
                ));
                ConfigRecord::default()
            }
        }
    }

    fn persist(&self, record: &ConfigRecord) -> ConfigResult<()> {
        let result = record
            .to_file(self.cipher.as_ref())
            .and_then(|file| file.write(&self.path));

        if let Err(e) = &result {
            self.logger.error(&format!(
                "[ConfigStore] Failed to save {}: {}",
                self.path.display(),
                e
            ));
        }
        result
    }

    fn canonical(service_id: &str) -> ConfigResult<String> {
        let id = canonical_service_id(service_id);
        if id.is_empty() {
            return Err(ConfigError::InvalidServiceId(service_id.to_string()));
        }
        Ok(id)
    }

    // ---- API keys ----

    /// Plaintext secret for a service
    ///
    /// A stored value (the empty string included) wins over the
    /// environment. Undecryptable values count as absent.
    pub fn get(&self, service_id: &str) -> Option<String> {
        let id = Self::canonical(service_id).ok()?;
        self.stored(&id).or_else(|| self.env.get(&id))
    }

    fn stored(&self, id: &str) -> Option<String> {
        self.record
            .read()
            .api_keys
            .get(id)
            .and_then(|secret| secret.plaintext().map(str::to_string))
    }

    /// Upsert a secret and persist
    pub fn set(&self, service_id: &str, secret: &str) -> ConfigResult<()> {
        let id = Self::canonical(service_id)?;
        if self.cipher.is_none() && is_tagged(secret) {
            return Err(ConfigError::TaggedPlaintext(id));
        }
        let mut record = self.record.write();
        record
            .api_keys
            .insert(id.clone(), StoredSecret::Plain(secret.to_string()));
        self.logger.info(&format!(
            "[ConfigStore] Stored key for '{}' ({} chars)",
            id,
            secret.chars().count()
        ));
        self.persist(&record)
    }

    /// Delete a secret and persist; returns whether it existed
    pub fn remove(&self, service_id: &str) -> ConfigResult<bool> {
        let id = Self::canonical(service_id)?;
        let mut record = self.record.write();
        if record.api_keys.remove(&id).is_none() {
            return Ok(false);
        }
        self.logger.info(&format!("[ConfigStore] Removed key for '{}'", id));
        self.persist(&record).map(|_| true)
    }

    /// All usable stored secrets (plaintext); mask before display
    pub fn list_all(&self) -> BTreeMap<String, String> {
        self.record
            .read()
            .api_keys
            .iter()
            .filter_map(|(id, secret)| secret.plaintext().map(|v| (id.clone(), v.to_string())))
            .collect()
    }

    /// Service ids whose stored value could not be decrypted
    pub fn unreadable_keys(&self) -> Vec<String> {
        self.record
            .read()
            .api_keys
            .iter()
            .filter(|(_, secret)| secret.plaintext().is_none())
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Display rows for every stored key
    pub fn entries(&self) -> Vec<ApiKeyEntry> {
        self.record
            .read()
            .api_keys
            .iter()
            .map(|(id, secret)| {
                let (masked, status) = match secret {
                    StoredSecret::Plain(v) if v.is_empty() => (mask_secret(v), KeyStatus::Empty),
                    StoredSecret::Plain(v) => (mask_secret(v), KeyStatus::Set),
                    StoredSecret::Unreadable(_) => (mask_secret(""), KeyStatus::Unreadable),
                };
                ApiKeyEntry {
                    service_id: id.clone(),
                    masked,
                    status,
                }
            })
            .collect()
    }

    // ---- Settings ----

    /// Raw setting value
    pub fn get_setting(&self, name: &str) -> Option<Value> {
        self.record.read().settings.get(name).cloned()
    }

    /// Setting value or `default` when unset
    pub fn get_setting_or(&self, name: &str, default: Value) -> Value {
        self.get_setting(name).unwrap_or(default)
    }

    /// Setting deserialized into `T`; `None` if unset or of another shape
    pub fn get_setting_as<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        self.get_setting(name)
            .and_then(|value| serde_json::from_value(value).ok())
    }

    /// Upsert a setting and persist
    pub fn set_setting<T: Serialize>(&self, name: &str, value: T) -> ConfigResult<()> {
        let value = serde_json::to_value(value)?;
        let mut record = self.record.write();
        record.settings.insert(name.to_string(), value);
        self.persist(&record)
    }

    /// Delete a setting and persist; returns whether it existed
    pub fn remove_setting(&self, name: &str) -> ConfigResult<bool> {
        let mut record = self.record.write();
        if record.settings.remove(name).is_none() {
            return Ok(false);
        }
        self.persist(&record).map(|_| true)
    }
}

impl SecretStore for ConfigStore {
    fn name(&self) -> &str {
        "config"
    }

    fn get(&self, service_id: &str) -> Option<String> {
        ConfigStore::get(self, service_id)
    }

    fn store(&self, service_id: &str, value: &str) -> SecretStoreResult<()> {
        Ok(self.set(service_id, value)?)
    }

    fn delete(&self, service_id: &str) -> SecretStoreResult<()> {
        self.remove(service_id)?;
        Ok(())
    }

    fn get_info(&self, service_id: &str) -> SecretInfo {
        let Ok(id) = Self::canonical(service_id) else {
            return SecretInfo::not_found();
        };
        if self.stored(&id).is_some() {
            SecretInfo::new(true, self.name())
        } else if self.env.has(&id) {
            SecretInfo::new(true, self.env.name())
        } else {
            SecretInfo::not_found()
        }
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("path", &self.path)
            .field("encrypted", &self.is_encrypted())
            .field("keys", &format!("[{} keys]", self.record.read().api_keys.len()))
            .finish()
    }
}
