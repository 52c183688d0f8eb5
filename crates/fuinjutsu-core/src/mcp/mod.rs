//! MCP (Model Context Protocol) module registry
//!
//! An MCP is a self-contained text-processing unit: metadata describing its
//! input and output fields plus an async `invoke` over a JSON mapping.
//!
//! ```rust,ignore
//! use fuinjutsu_core::mcp::{PluginCatalog, PluginContext, PluginRegistry};
//!
//! let context = PluginContext::new(secrets, logger);
//! let registry = PluginRegistry::new(PluginCatalog::builtin(), context);
//! let report = registry.discover();
//!
//! let output = registry.execute("sentiment_analyzer", input).await?;
//! ```

mod builtin;
mod catalog;
mod manifest;
mod plugin;
mod registry;

pub use builtin::{SentimentAnalyzer, TextSummarizer, TextTranslator};
pub use catalog::{
    canonical_plugin_name, PluginCatalog, PluginContext, PluginDefinition, PluginFactory,
    PluginLoadError,
};
pub use manifest::{ManifestError, ManifestResult, PluginManifest};
pub use plugin::{InputExt, JsonMap, Plugin, PluginError, PluginMetadata, PluginResult};
pub use registry::{
    error_output, DiagnosticKind, DiscoveryDiagnostic, DiscoveryReport, PluginRecord,
    PluginRegistry, RegistryError, RegistryResult,
};
