//! Shared application state (composition root)

use std::sync::Arc;

use fuinjutsu_core::config::{default_config_path, StoreOptions};
use fuinjutsu_core::{
    ConfigStore, Logger, PluginCatalog, PluginContext, PluginRegistry, SecretStore, TracingLogger,
};

use crate::config::ServerConfig;

/// Services shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ConfigStore>,
    pub registry: Arc<PluginRegistry>,
    pub http: reqwest::Client,
    pub logger: Arc<dyn Logger>,
}

impl AppState {
    /// Open the config store, load the bundled MCPs and wire them together
    pub fn build(config: &ServerConfig) -> Self {
        let logger: Arc<dyn Logger> = Arc::new(TracingLogger::new("fuinjutsu"));
        let options = StoreOptions::default().with_logger(logger.clone());
        let path = config
            .config_path
            .clone()
            .unwrap_or_else(default_config_path);
        let store = Arc::new(ConfigStore::open_with(path, options));

        let http = reqwest::Client::new();
        let context = PluginContext::new(store.clone() as Arc<dyn SecretStore>, logger.clone())
            .with_http(http.clone());

        let mut registry = PluginRegistry::new(PluginCatalog::builtin(), context);
        if let Some(manifest) = &config.plugin_manifest {
            registry = registry.with_manifest(manifest.clone());
        }

        Self::new(store, registry, http, logger)
    }

    /// Assemble state from prebuilt parts and run discovery once
    pub fn new(
        store: Arc<ConfigStore>,
        registry: PluginRegistry,
        http: reqwest::Client,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let report = registry.discover();
        for diagnostic in &report.diagnostics {
            logger.warn(&format!(
                "[AppState] MCP '{}' {:?}: {}",
                diagnostic.plugin, diagnostic.kind, diagnostic.message
            ));
        }

        Self {
            store,
            registry: Arc::new(registry),
            http,
            logger,
        }
    }

    /// The store viewed as a secret source
    pub fn secrets(&self) -> Arc<dyn SecretStore> {
        self.store.clone()
    }
}
