//! Server settings read from the environment

use std::path::PathBuf;

use fuinjutsu_core::config::CONFIG_PATH_ENV;
use thiserror::Error;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const PLUGIN_MANIFEST_ENV: &str = "FUINJUTSU_PLUGIN_MANIFEST";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ServerConfigError {
    #[error("invalid PORT value '{0}'")]
    InvalidPort(String),
}

/// Listener address and file locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface or host name to bind
    pub host: String,
    pub port: u16,
    /// Config file; the platform default when unset
    pub config_path: Option<PathBuf>,
    /// YAML manifest restricting which MCPs load
    pub plugin_manifest: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            config_path: None,
            plugin_manifest: None,
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `FUINJUTSU_CONFIG` and `FUINJUTSU_PLUGIN_MANIFEST`
    pub fn from_env() -> Result<Self, ServerConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = var(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match var(PORT_ENV) {
            Some(value) => value
                .parse()
                .map_err(|_| ServerConfigError::InvalidPort(value.clone()))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host,
            port,
            config_path: var(CONFIG_PATH_ENV).map(PathBuf::from),
            plugin_manifest: var(PLUGIN_MANIFEST_ENV).map(PathBuf::from),
        })
    }

    /// `host:port`, resolved by the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
