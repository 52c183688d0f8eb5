//! In-memory configuration record and its on-disk transform

use std::collections::BTreeMap;

use serde_json::Value;

use crate::crypto::{is_tagged, SecretCipher};
use crate::logging::Logger;

use super::file::ConfigFile;
use super::traits::{ConfigError, ConfigResult};

/// A stored API key as held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredSecret {
    /// Usable plaintext value
    Plain(String),
    /// Ciphertext that could not be opened, kept verbatim so that saving
    /// writes it back untouched
    Unreadable(String),
}

impl StoredSecret {
    /// The plaintext value, if usable
    pub fn plaintext(&self) -> Option<&str> {
        match self {
            StoredSecret::Plain(value) => Some(value),
            StoredSecret::Unreadable(_) => None,
        }
    }
}

/// The persisted unit of state, with API keys decrypted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigRecord {
    pub settings: BTreeMap<String, Value>,
    pub api_keys: BTreeMap<String, StoredSecret>,
}

impl ConfigRecord {
    /// Build the in-memory record from a loaded file
    ///
    /// Tagged values are decrypted; a value that fails to decrypt (or any
    /// tagged value when encryption is disabled) becomes `Unreadable`.
    /// Untagged values are legacy plaintext and are taken as-is.
    pub fn from_file(file: ConfigFile, cipher: Option<&SecretCipher>, logger: &dyn Logger) -> Self {
        let api_keys = file
            .api_keys
            .into_iter()
            .map(|(service_id, value)| {
                let secret = if !is_tagged(&value) {
                    StoredSecret::Plain(value)
                } else {
                    match cipher.map(|c| c.open(&value)) {
                        Some(Ok(plain)) => StoredSecret::Plain(plain),
                        Some(Err(e)) => {
                            logger.warn(&format!(
                                "[ConfigStore] Key for '{}' is unusable: {}",
                                service_id, e
                            ));
                            StoredSecret::Unreadable(value)
                        }
                        None => {
                            logger.warn(&format!(
                                "[ConfigStore] Key for '{}' is encrypted but encryption is disabled",
                                service_id
                            ));
                            StoredSecret::Unreadable(value)
                        }
                    }
                };
                (service_id, secret)
            })
            .collect();

        Self {
            settings: file.settings,
            api_keys,
        }
    }

    /// Produce the on-disk document
    ///
    /// Plaintext values are sealed when a cipher is given; unreadable
    /// values are already ciphertext and are written back unchanged.
    pub fn to_file(&self, cipher: Option<&SecretCipher>) -> ConfigResult<ConfigFile> {
        let mut api_keys = BTreeMap::new();
        for (service_id, secret) in &self.api_keys {
            let stored = match (secret, cipher) {
                (StoredSecret::Plain(value), Some(cipher)) => {
                    cipher.seal(value).map_err(|source| ConfigError::Crypto {
                        service_id: service_id.clone(),
                        source,
                    })?
                }
                (StoredSecret::Plain(value), None) => value.clone(),
                (StoredSecret::Unreadable(raw), _) => raw.clone(),
            };
            api_keys.insert(service_id.clone(), stored);
        }

        Ok(ConfigFile {
            settings: self.settings.clone(),
            api_keys,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::CIPHERTEXT_TAG;
    use crate::logging::NoOpLogger;

    fn cipher() -> SecretCipher {
        SecretCipher::from_machine_id("record-tests")
    }

    #[test]
    fn test_plaintext_is_sealed_on_save() {
        let cipher = cipher();
        let mut record = ConfigRecord::default();
        record
            .api_keys
            .insert("openai".to_string(), StoredSecret::Plain("sk-123".to_string()));

        let file = record.to_file(Some(&cipher)).unwrap();
        let stored = &file.api_keys["openai"];
        assert!(stored.starts_with(CIPHERTEXT_TAG));
        assert_eq!(cipher.open(stored).unwrap(), "sk-123");
    }

    #[test]
    fn test_unreadable_is_not_double_encrypted() {
        let raw = format!("{}garbage", CIPHERTEXT_TAG);
        let mut record = ConfigRecord::default();
        record
            .api_keys
            .insert("openai".to_string(), StoredSecret::Unreadable(raw.clone()));

        let file = record.to_file(Some(&cipher())).unwrap();
        assert_eq!(file.api_keys["openai"], raw);
    }

    #[test]
    fn test_legacy_plaintext_loads_as_is() {
        let mut file = ConfigFile::default();
        file.api_keys.insert("cohere".to_string(), "legacy-key".to_string());

        let record = ConfigRecord::from_file(file, Some(&cipher()), &NoOpLogger);
        assert_eq!(
            record.api_keys["cohere"],
            StoredSecret::Plain("legacy-key".to_string())
        );
    }

    #[test]
    fn test_per_key_decrypt_failure() {
        let good = cipher().seal("good").unwrap();
        let foreign = SecretCipher::from_machine_id("someone-else").seal("bad").unwrap();

        let mut file = ConfigFile::default();
        file.api_keys.insert("a".to_string(), good);
        file.api_keys.insert("b".to_string(), foreign.clone());

        let record = ConfigRecord::from_file(file, Some(&cipher()), &NoOpLogger);
        assert_eq!(record.api_keys["a"].plaintext(), Some("good"));
        assert_eq!(record.api_keys["b"], StoredSecret::Unreadable(foreign));
        assert_eq!(record.api_keys["b"].plaintext(), None);
    }

    #[test]
    fn test_without_cipher() {
        let sealed = cipher().seal("x").unwrap();
        let mut file = ConfigFile::default();
        file.api_keys.insert("a".to_string(), sealed.clone());
        file.api_keys.insert("b".to_string(), "plain".to_string());

        let record = ConfigRecord::from_file(file, None, &NoOpLogger);
        assert_eq!(record.api_keys["a"], StoredSecret::Unreadable(sealed));

        let out = record.to_file(None).unwrap();
        assert_eq!(out.api_keys["b"], "plain");
    }
}
