//! Machine-bound encryption for stored API keys
//!
//! Values are sealed with AES-256-GCM under a key derived with
//! PBKDF2-HMAC-SHA256 from a machine identifier and a fixed application
//! salt. A config file written on one machine therefore only opens on a
//! machine reporting the same identifier. This trades strong secrecy for
//! zero-setup convenience: anyone who can reproduce the identifier can
//! decrypt the file.
//!
//! Sealed values are stored as [`CIPHERTEXT_TAG`] followed by the URL-safe
//! base64 encoding of `nonce || ciphertext`.

use std::env;

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::Engine;
use once_cell::sync::OnceCell;
use sha2::Sha256;
use thiserror::Error;

/// Prefix marking a stored value as ciphertext
pub const CIPHERTEXT_TAG: &str = "encrypted:";

/// Identifier used when the host exposes no name at all
pub const FALLBACK_MACHINE_ID: &str = "fuinjutsu";

const KDF_SALT: &[u8] = b"fuinjutsu_salt";
const KDF_ITERATIONS: u32 = 100_000;
const NONCE_LEN: usize = 12;

static MACHINE_CIPHER: OnceCell<SecretCipher> = OnceCell::new();

/// Errors that can occur while sealing or opening a value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Failed to encrypt value")]
    EncryptionFailed,

    #[error("Value is not valid ciphertext")]
    MalformedCiphertext,

    #[error("Failed to decrypt value (wrong machine key or corrupted data)")]
    DecryptionFailed,
}

pub type CryptoResult<T> = Result<T, CryptoError>;

/// Resolve the identifier the encryption key is derived from
///
/// Checks `COMPUTERNAME`, then `HOSTNAME`, then the OS hostname.
pub fn machine_id() -> String {
    env::var("COMPUTERNAME")
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(|| env::var("HOSTNAME").ok().filter(|v| !v.is_empty()))
        .or_else(|| {
            hostname::get()
                .ok()
                .and_then(|name| name.into_string().ok())
                .filter(|v| !v.is_empty())
        })
        .unwrap_or_else(|| FALLBACK_MACHINE_ID.to_string())
}

/// Check whether a stored value carries the ciphertext tag
pub fn is_tagged(value: &str) -> bool {
    value.starts_with(CIPHERTEXT_TAG)
}

/// Symmetric cipher for API-key values
#[derive(Clone)]
pub struct SecretCipher {
    cipher: Aes256Gcm,
}

impl SecretCipher {
    /// Derive a cipher from an arbitrary machine identifier
    pub fn from_machine_id(machine_id: &str) -> Self {
        let mut key = [0u8; 32];
        pbkdf2::pbkdf2_hmac::<Sha256>(machine_id.as_bytes(), KDF_SALT, KDF_ITERATIONS, &mut key);
        Self {
            cipher: Aes256Gcm::new(&key.into()),
        }
    }

    /// Cipher for this machine, derived once per process
    pub fn for_machine() -> Self {
        MACHINE_CIPHER
            .get_or_init(|| Self::from_machine_id(&machine_id()))
            .clone()
    }

    /// Encrypt a value into its tagged, storable form
    pub fn seal(&self, plaintext: &str) -> CryptoResult<String> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| CryptoError::EncryptionFailed)?;

        let mut combined = nonce.to_vec();
        combined.extend_from_slice(&ciphertext);
        let encoded = base64::engine::general_purpose::URL_SAFE.encode(combined);
        Ok(format!("{}{}", CIPHERTEXT_TAG, encoded))
    }

    /// Decrypt a tagged value produced by [`SecretCipher::seal`]
    pub fn open(&self, stored: &str) -> CryptoResult<String> {
        let encoded = stored
            .strip_prefix(CIPHERTEXT_TAG)
            .ok_or(CryptoError::MalformedCiphertext)?;
        let combined = base64::engine::general_purpose::URL_SAFE
            .decode(encoded)
            .map_err(|_| CryptoError::MalformedCiphertext)?;

        if combined.len() < NONCE_LEN {
            return Err(CryptoError::MalformedCiphertext);
        }

        let (nonce_bytes, ciphertext) = combined.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| CryptoError::DecryptionFailed)?;

        String::from_utf8(plaintext).map_err(|_| CryptoError::DecryptionFailed)
    }
}

impl std::fmt::Debug for SecretCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretCipher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_open_roundtrip() {
        let cipher = SecretCipher::from_machine_id("test-machine");

        let sealed = cipher.seal("hf_secret_value").unwrap();
        assert!(is_tagged(&sealed));
        assert!(!sealed.contains("hf_secret_value"));
        assert_eq!(cipher.open(&sealed).unwrap(), "hf_secret_value");
    }

    #[test]
    fn test_empty_value_roundtrip() {
        let cipher = SecretCipher::from_machine_id("test-machine");
        let sealed = cipher.seal("").unwrap();
        assert_eq!(cipher.open(&sealed).unwrap(), "");
    }

    #[test]
    fn test_nonce_makes_ciphertext_unique() {
        let cipher = SecretCipher::from_machine_id("test-machine");
        assert_ne!(cipher.seal("same").unwrap(), cipher.seal("same").unwrap());
    }

    #[test]
    fn test_other_machine_cannot_open() {
        let here = SecretCipher::from_machine_id("machine-a");
        let there = SecretCipher::from_machine_id("machine-b");

        let sealed = here.seal("secret").unwrap();
        assert_eq!(there.open(&sealed), Err(CryptoError::DecryptionFailed));
    }

    #[test]
    fn test_malformed_values() {
        let cipher = SecretCipher::from_machine_id("test-machine");
        assert_eq!(cipher.open("plain"), Err(CryptoError::MalformedCiphertext));
        assert_eq!(
            cipher.open("encrypted:not base64!!"),
            Err(CryptoError::MalformedCiphertext)
        );
        assert_eq!(cipher.open("encrypted:AAAA"), Err(CryptoError::MalformedCiphertext));
    }

    #[test]
    fn test_machine_id_never_empty() {
        assert!(!machine_id().is_empty());
    }
}
