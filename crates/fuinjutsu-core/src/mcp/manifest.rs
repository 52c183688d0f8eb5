//! Optional YAML manifest selecting which catalog entries to load
//!
//! ```yaml
//! plugins:
//!   - sentiment_analyzer
//!   - text_summarizer
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog::canonical_plugin_name;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
}

pub type ManifestResult<T> = Result<T, ManifestError>;

/// List of plugin names enabled for discovery
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginManifest {
    #[serde(default)]
    pub plugins: Vec<String>,
}

impl PluginManifest {
    /// Read a manifest file
    pub fn load(path: &Path) -> ManifestResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> ManifestResult<Self> {
        // An empty document means "nothing enabled"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Canonical names listed in the manifest
    pub fn names(&self) -> Vec<String> {
        self.plugins.iter().map(|p| canonical_plugin_name(p)).collect()
    }

    /// Whether a canonical plugin name is enabled
    pub fn allows(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| canonical_plugin_name(p) == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_manifest() {
        let manifest = PluginManifest::from_yaml("plugins:\n  - Sentiment_Analyzer.rs\n  - text_summarizer\n").unwrap();
        assert!(manifest.allows("sentiment_analyzer"));
        assert!(manifest.allows("text_summarizer"));
        assert!(!manifest.allows("text_translator"));
        assert_eq!(manifest.names(), vec!["sentiment_analyzer", "text_summarizer"]);
    }

    #[test]
    fn test_empty_manifest() {
        assert_eq!(PluginManifest::from_yaml("").unwrap(), PluginManifest::default());
        assert!(PluginManifest::from_yaml("{}").unwrap().plugins.is_empty());
    }

    #[test]
    fn test_invalid_manifest() {
        assert!(matches!(
            PluginManifest::from_yaml("plugins: 42"),
            Err(ManifestError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            PluginManifest::load(&dir.path().join("absent.yaml")),
            Err(ManifestError::Io(_))
        ));
    }
}
