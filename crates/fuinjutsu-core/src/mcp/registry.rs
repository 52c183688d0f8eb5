//! Plugin registry: discovery, lookup and isolated invocation
//!
//! The registry builds every definition of its [`PluginCatalog`] (optionally
//! filtered by a [`PluginManifest`]), validates the metadata and keeps the
//! plugins that passed under their canonical names. A factory that fails or
//! panics is recorded as a diagnostic and skipped; it never prevents the
//! other plugins from loading.
//!
//! Rediscovery builds a fresh map and swaps it in, so concurrent readers see
//! either the old or the new plugin set, never a half-filled one.

use std::any::Any;
use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::FutureExt;
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::logging::Logger;

use super::catalog::{PluginCatalog, PluginContext, PluginDefinition};
use super::manifest::PluginManifest;
use super::plugin::{JsonMap, Plugin, PluginError, PluginMetadata};

/// A loaded plugin and what the registry knows about it
#[derive(Clone)]
pub struct PluginRecord {
    /// Canonical registry name
    pub name: String,
    /// Source the plugin was built from
    pub source: String,
    pub metadata: PluginMetadata,
    plugin: Arc<dyn Plugin>,
}

impl PluginRecord {
    pub fn plugin(&self) -> &Arc<dyn Plugin> {
        &self.plugin
    }
}

impl std::fmt::Debug for PluginRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRecord")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

/// Why a plugin was not (or not cleanly) loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The factory returned an error or panicked
    LoadFailed,
    /// Metadata missing required fields
    InvalidMetadata,
    /// A later definition replaced an earlier one with the same name
    Overwritten,
    /// The manifest names a plugin the catalog does not have
    NotInCatalog,
    /// The manifest could not be read
    Manifest,
}

/// One problem found during discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveryDiagnostic {
    pub plugin: String,
    pub kind: DiagnosticKind,
    pub message: String,
}

/// Outcome of a discovery pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiscoveryReport {
    /// Names now registered, sorted
    pub loaded: Vec<String>,
    pub diagnostics: Vec<DiscoveryDiagnostic>,
}

impl DiscoveryReport {
    /// True when nothing went wrong
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    fn push(&mut self, plugin: impl Into<String>, kind: DiagnosticKind, message: impl Into<String>) {
        self.diagnostics.push(DiscoveryDiagnostic {
            plugin: plugin.into(),
            kind,
            message: message.into(),
        });
    }
}

/// Errors returned by [`PluginRegistry::try_execute`]
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("MCP '{0}' not found")]
    NotFound(String),

    #[error("MCP '{name}' failed: {source}")]
    Invocation {
        name: String,
        #[source]
        source: PluginError,
    },
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Build the `{"error": message}` mapping returned for failed invocations
pub fn error_output(message: impl Into<String>) -> JsonMap {
    let mut output = JsonMap::new();
    output.insert("error".to_string(), Value::String(message.into()));
    output
}

/// Registry of loaded plugins
pub struct PluginRegistry {
    catalog: PluginCatalog,
    context: PluginContext,
    manifest_path: Option<PathBuf>,
    plugins: RwLock<BTreeMap<String, PluginRecord>>,
    last_report: RwLock<DiscoveryReport>,
    logger: Arc<dyn Logger>,
}

impl PluginRegistry {
    /// Create an empty registry; call [`PluginRegistry::discover`] to load
    pub fn new(catalog: PluginCatalog, context: PluginContext) -> Self {
        let logger = context.logger.clone();
        Self {
            catalog,
            context,
            manifest_path: None,
            plugins: RwLock::new(BTreeMap::new()),
            last_report: RwLock::new(DiscoveryReport::default()),
            logger,
        }
    }

    /// Only load the plugins listed in this YAML manifest
    pub fn with_manifest(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = Some(path.into());
        self
    }

    pub fn manifest_path(&self) -> Option<&Path> {
        self.manifest_path.as_deref()
    }

    /// (Re)load every enabled plugin from the catalog
    ///
    /// Replaces the previous plugin set. A missing or unreadable manifest
    /// leaves the registry empty and reports why.
    pub fn discover(&self) -> DiscoveryReport {
        let mut report = DiscoveryReport::default();

        let manifest = match &self.manifest_path {
            None => None,
            Some(path) => match PluginManifest::load(path) {
                Ok(manifest) => Some(manifest),
                Err(e) => {
                    self.logger.error(&format!(
                        "[PluginRegistry] Cannot read manifest {}: {}",
                        path.display(),
                        e
                    ));
                    report.push(path.display().to_string(), DiagnosticKind::Manifest, e.to_string());
                    return self.commit(BTreeMap::new(), report);
                }
            },
        };

        let mut discovered: BTreeMap<String, PluginRecord> = BTreeMap::new();

        for definition in self.catalog.definitions() {
            let name = definition.name();
            if name.is_empty() {
                report.push(&definition.source, DiagnosticKind::LoadFailed, "empty plugin name");
                continue;
            }

            if let Some(ref manifest) = manifest {
                if !manifest.allows(&name) {
                    self.logger.debug(&format!(
                        "[PluginRegistry] Skipping {} (not in manifest)",
                        name
                    ));
                    continue;
                }
            }

            let plugin = match self.build(definition) {
                Ok(plugin) => plugin,
                Err(reason) => {
                    self.logger.error(&format!(
                        "[PluginRegistry] Failed to load {}: {}",
                        definition.source, reason
                    ));
                    report.push(&name, DiagnosticKind::LoadFailed, reason);
                    continue;
                }
            };

            let metadata = plugin.metadata().clone();
            if let Err(reason) = metadata.validate() {
                self.logger.error(&format!(
                    "[PluginRegistry] Rejected {}: {}",
                    definition.source, reason
                ));
                report.push(&name, DiagnosticKind::InvalidMetadata, reason);
                continue;
            }

            if let Some(previous) = discovered.get(&name) {
                self.logger.warn(&format!(
                    "[PluginRegistry] {} replaces {} under name '{}'",
                    definition.source, previous.source, name
                ));
                report.push(
                    &name,
                    DiagnosticKind::Overwritten,
                    format!("{} replaced by {}", previous.source, definition.source),
                );
            }

            self.logger.info(&format!("[PluginRegistry] MCP loaded: {}", name));
            discovered.insert(
                name.clone(),
                PluginRecord {
                    name,
                    source: definition.source.clone(),
                    metadata,
                    plugin,
                },
            );
        }

        if let Some(manifest) = manifest {
            for listed in manifest.names() {
                if !self.catalog.contains(&listed) {
                    self.logger.warn(&format!(
                        "[PluginRegistry] Manifest lists unknown MCP '{}'",
                        listed
                    ));
                    report.push(listed, DiagnosticKind::NotInCatalog, "no such plugin in catalog");
                }
            }
        }

        self.commit(discovered, report)
    }

    fn build(&self, definition: &PluginDefinition) -> Result<Arc<dyn Plugin>, String> {
        match std::panic::catch_unwind(AssertUnwindSafe(|| (definition.factory)(&self.context))) {
            Ok(Ok(plugin)) => Ok(plugin),
            Ok(Err(e)) => Err(e.to_string()),
            Err(payload) => Err(format!("factory panicked: {}", panic_message(payload.as_ref()))),
        }
    }

    fn commit(
        &self,
        discovered: BTreeMap<String, PluginRecord>,
        mut report: DiscoveryReport,
    ) -> DiscoveryReport {
        report.loaded = discovered.keys().cloned().collect();
        self.logger.info(&format!(
            "[PluginRegistry] {} MCP(s) available, {} diagnostic(s)",
            report.loaded.len(),
            report.diagnostics.len()
        ));

        *self.plugins.write() = discovered;
        *self.last_report.write() = report.clone();
        report
    }

    /// Look up a plugin by its registry name
    pub fn get(&self, name: &str) -> Option<PluginRecord> {
        self.plugins.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.plugins.read().contains_key(name)
    }

    /// Name to metadata for every loaded plugin
    pub fn list_all(&self) -> BTreeMap<String, PluginMetadata> {
        self.plugins
            .read()
            .iter()
            .map(|(name, record)| (name.clone(), record.metadata.clone()))
            .collect()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        self.plugins.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.read().is_empty()
    }

    /// Report of the most recent discovery
    pub fn last_report(&self) -> DiscoveryReport {
        self.last_report.read().clone()
    }

    /// Invoke a plugin, surfacing failures as typed errors
    ///
    /// Panics inside the plugin are caught and reported as
    /// [`PluginError::Panicked`].
    pub async fn try_execute(&self, name: &str, input: JsonMap) -> RegistryResult<JsonMap> {
        let record = self
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;

        self.logger.debug(&format!("[PluginRegistry] Executing {}", name));

        let outcome = AssertUnwindSafe(record.plugin.invoke(&input))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(source)) => Err(RegistryError::Invocation {
                name: name.to_string(),
                source,
            }),
            Err(payload) => Err(RegistryError::Invocation {
                name: name.to_string(),
                source: PluginError::Panicked(panic_message(payload.as_ref())),
            }),
        }
    }

    /// Invoke a plugin
    ///
    /// Only an unknown name is an error; any failure inside the plugin comes
    /// back as `{"error": message}`.
    pub async fn execute(&self, name: &str, input: JsonMap) -> RegistryResult<JsonMap> {
        match self.try_execute(name, input).await {
            Err(RegistryError::Invocation { name, source }) => {
                self.logger.warn(&format!(
                    "[PluginRegistry] {} returned an error: {}",
                    name, source
                ));
                Ok(error_output(source.to_string()))
            }
            other => other,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
