//! Explicit list of plugins the registry may load

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::logging::Logger;
use crate::providers::HUGGINGFACE_API_BASE;
use crate::secrets::SecretStore;

use super::builtin::{SentimentAnalyzer, TextSummarizer, TextTranslator};
use super::plugin::Plugin;

/// Shared services handed to plugin factories
#[derive(Clone)]
pub struct PluginContext {
    /// Credential source for plugins calling hosted APIs
    pub secrets: Arc<dyn SecretStore>,
    /// Shared HTTP client
    pub http: reqwest::Client,
    /// Base URL for HuggingFace model endpoints
    pub huggingface_api_base: String,
    pub logger: Arc<dyn Logger>,
}

impl PluginContext {
    pub fn new(secrets: Arc<dyn SecretStore>, logger: Arc<dyn Logger>) -> Self {
        Self {
            secrets,
            http: reqwest::Client::new(),
            huggingface_api_base: HUGGINGFACE_API_BASE.to_string(),
            logger,
        }
    }

    pub fn with_http(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn with_huggingface_api_base(mut self, base: impl Into<String>) -> Self {
        self.huggingface_api_base = base.into();
        self
    }
}

/// Errors a factory reports when it cannot build its plugin
#[derive(Error, Debug)]
pub enum PluginLoadError {
    #[error("missing dependency: {0}")]
    MissingDependency(String),

    #[error("{0}")]
    Other(String),
}

/// Factory function type for building plugins
pub type PluginFactory =
    Box<dyn Fn(&PluginContext) -> Result<Arc<dyn Plugin>, PluginLoadError> + Send + Sync>;

/// A loadable unit: its source name and how to build it
pub struct PluginDefinition {
    /// Source file name the plugin is known by (e.g. `text_summarizer.rs`)
    pub source: String,
    pub factory: PluginFactory,
}

impl PluginDefinition {
    pub fn new<F>(source: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&PluginContext) -> Result<Arc<dyn Plugin>, PluginLoadError> + Send + Sync + 'static,
    {
        Self {
            source: source.into(),
            factory: Box::new(factory),
        }
    }

    /// Canonical registry name
    pub fn name(&self) -> String {
        canonical_plugin_name(&self.source)
    }
}

impl std::fmt::Debug for PluginDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginDefinition")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Registry name for a source: file stem, lowercased
///
/// `"mcps/Text_Summarizer.rs"` becomes `"text_summarizer"`.
pub fn canonical_plugin_name(source: &str) -> String {
    Path::new(source.trim())
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Ordered set of plugin definitions
///
/// Discovery walks the catalog in insertion order; a later definition with
/// the same canonical name replaces an earlier one.
#[derive(Debug, Default)]
pub struct PluginCatalog {
    definitions: Vec<PluginDefinition>,
}

impl PluginCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of the bundled MCP modules
    pub fn builtin() -> Self {
        Self::new()
            .with(PluginDefinition::new("sentiment_analyzer.rs", |_| {
                Ok(Arc::new(SentimentAnalyzer::new()) as Arc<dyn Plugin>)
            }))
            .with(PluginDefinition::new("text_summarizer.rs", |_| {
                Ok(Arc::new(TextSummarizer::new()) as Arc<dyn Plugin>)
            }))
            .with(PluginDefinition::new("text_translator.rs", |ctx| {
                Ok(Arc::new(TextTranslator::new(ctx)) as Arc<dyn Plugin>)
            }))
    }

    /// Append a definition (builder style)
    pub fn with(mut self, definition: PluginDefinition) -> Self {
        self.definitions.push(definition);
        self
    }

    /// Append a definition
    pub fn register(&mut self, definition: PluginDefinition) {
        self.definitions.push(definition);
    }

    pub fn definitions(&self) -> &[PluginDefinition] {
        &self.definitions
    }

    /// Whether any definition has this canonical name
    pub fn contains(&self, name: &str) -> bool {
        self.definitions.iter().any(|d| d.name() == name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_plugin_name() {
        assert_eq!(canonical_plugin_name("text_summarizer.rs"), "text_summarizer");
        assert_eq!(canonical_plugin_name("mcps/Text_Summarizer.py"), "text_summarizer");
        assert_eq!(canonical_plugin_name("Echo"), "echo");
        assert_eq!(canonical_plugin_name(""), "");
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = PluginCatalog::builtin();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains("sentiment_analyzer"));
        assert!(catalog.contains("text_summarizer"));
        assert!(catalog.contains("text_translator"));
        assert!(!catalog.contains("text_translator.rs"));
    }

    #[test]
    fn test_register() {
        let mut catalog = PluginCatalog::new();
        assert!(catalog.is_empty());

        catalog.register(PluginDefinition::new("custom.rs", |_| {
            Err(PluginLoadError::Other("not today".into()))
        }));
        assert_eq!(catalog.definitions()[0].name(), "custom");
    }
}
