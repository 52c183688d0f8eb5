//! On-disk configuration document (JSON)
//!
//! ```json
//! {
//!   "settings": { "theme": "dark" },
//!   "api_keys": { "openai": "encrypted:..." }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::traits::ConfigResult;

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "FUINJUTSU_CONFIG";

/// Configuration file structure as persisted
///
/// `api_keys` values are either ciphertext-tagged strings or legacy
/// plaintext left by an unencrypted writer.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub settings: BTreeMap<String, Value>,

    #[serde(default)]
    pub api_keys: BTreeMap<String, String>,
}

impl ConfigFile {
    /// Read and parse a config file
    pub fn read(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the document as indented JSON, creating parent directories
    pub fn write(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Default config file location
///
/// `$FUINJUTSU_CONFIG` if set, otherwise `<config dir>/fuinjutsu/config.json`
/// (`~/.config` on Linux, `~/Library/Application Support` on macOS).
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
    config_dir.join("fuinjutsu").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("config.json");

        let mut file = ConfigFile::default();
        file.settings.insert("theme".to_string(), Value::String("dark".to_string()));
        file.write(&path).unwrap();

        assert_eq!(ConfigFile::read(&path).unwrap(), file);
    }

    #[test]
    fn test_missing_sections_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{}").unwrap();

        let file = ConfigFile::read(&path).unwrap();
        assert!(file.settings.is_empty());
        assert!(file.api_keys.is_empty());
    }

    #[test]
    fn test_indented_output() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut file = ConfigFile::default();
        file.api_keys.insert("openai".to_string(), "encrypted:abc".to_string());
        file.write(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n  \"api_keys\""));
        assert!(content.contains("\"settings\""));
    }

    #[test]
    fn test_default_path_file_name() {
        let path = default_config_path();
        assert!(path.to_string_lossy().ends_with(".json"));
    }
}
