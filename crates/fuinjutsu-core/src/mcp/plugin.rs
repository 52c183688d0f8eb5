//! Plugin capability contract

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// JSON object used for plugin input and output
pub type JsonMap = serde_json::Map<String, Value>;

/// Descriptive metadata every plugin exposes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginMetadata {
    /// Human-readable title
    pub name: String,
    /// What the plugin does
    pub description: String,
    pub version: String,
    pub author: String,
    /// Input field -> human-readable type/description
    pub input_schema: BTreeMap<String, String>,
    /// Output field -> human-readable type/description
    pub output_schema: BTreeMap<String, String>,
}

impl PluginMetadata {
    /// Create metadata with empty schemas
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            version: "1.0.0".to_string(),
            author: "Fûinjutsu".to_string(),
            input_schema: BTreeMap::new(),
            output_schema: BTreeMap::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Document an input field
    pub fn input(mut self, field: impl Into<String>, description: impl Into<String>) -> Self {
        self.input_schema.insert(field.into(), description.into());
        self
    }

    /// Document an output field
    pub fn output(mut self, field: impl Into<String>, description: impl Into<String>) -> Self {
        self.output_schema.insert(field.into(), description.into());
        self
    }

    /// Check the fields discovery requires
    pub fn validate(&self) -> Result<(), String> {
        if self.description.trim().is_empty() {
            return Err("metadata has no description".to_string());
        }
        if self.input_schema.is_empty() {
            return Err("metadata has an empty input_schema".to_string());
        }
        if self.output_schema.is_empty() {
            return Err("metadata has an empty output_schema".to_string());
        }
        Ok(())
    }
}

/// Errors a plugin reports from an invocation
#[derive(Error, Debug)]
pub enum PluginError {
    /// Required input missing or of the wrong type
    #[error("{0}")]
    InvalidInput(String),

    /// The plugin could not complete the transformation
    #[error("{0}")]
    Failed(String),

    /// The plugin panicked; captured at the registry boundary
    #[error("plugin panicked: {0}")]
    Panicked(String),
}

impl PluginError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Whether the caller sent bad input (as opposed to the plugin failing)
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

pub type PluginResult<T> = Result<T, PluginError>;

/// A self-contained text-processing unit
///
/// Implementations validate their own input and return
/// `PluginError::InvalidInput` rather than panicking. The registry never
/// checks input against the schema; it only forwards the mapping.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Metadata describing the plugin and its schemas
    fn metadata(&self) -> &PluginMetadata;

    /// Run the plugin on an input mapping
    async fn invoke(&self, input: &JsonMap) -> PluginResult<JsonMap>;
}

/// Typed accessors for plugin input
pub trait InputExt {
    /// String field, `None` if absent or not a string
    fn get_str(&self, key: &str) -> Option<&str>;

    /// String field with a default when absent; wrong type is an error
    fn str_or<'a>(&'a self, key: &str, default: &'a str) -> PluginResult<&'a str>;
}

impl InputExt for JsonMap {
    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn str_or<'a>(&'a self, key: &str, default: &'a str) -> PluginResult<&'a str> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(Value::String(s)) => Ok(s),
            Some(_) => Err(PluginError::invalid_input(format!(
                "Le champ '{}' doit être une chaîne de caractères",
                key
            ))),
        }
    }
}
