//! HTTP error responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fuinjutsu_core::{ConfigError, ProviderError, RegistryError};
use serde_json::json;

/// Error returned by handlers, rendered as `{"error": message}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::warn!(status = self.status.as_u16(), "{}", self.message);
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.status.as_u16(), self.message)
    }
}

impl From<ConfigError> for ApiError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::InvalidServiceId(_) | ConfigError::TaggedPlaintext(_) => {
                Self::bad_request(e.to_string())
            }
            _ => Self::internal(e.to_string()),
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::NotFound(name) => Self::not_found(format!("MCP '{}' non trouvé", name)),
            RegistryError::Invocation { source, .. } if source.is_invalid_input() => {
                Self::bad_request(source.to_string())
            }
            RegistryError::Invocation { source, .. } => Self::internal(source.to_string()),
        }
    }
}

impl From<ProviderError> for ApiError {
    fn from(e: ProviderError) -> Self {
        if e.is_upstream() {
            Self::bad_gateway(e.to_string())
        } else {
            Self::bad_request(e.to_string())
        }
    }
}

/// Result type for all handlers
pub type HandlerResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use fuinjutsu_core::PluginError;

    #[test]
    fn test_registry_error_mapping() {
        let not_found: ApiError = RegistryError::NotFound("x".into()).into();
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);
        assert_eq!(not_found.message, "MCP 'x' non trouvé");

        let invalid: ApiError = RegistryError::Invocation {
            name: "x".into(),
            source: PluginError::invalid_input("bad"),
        }
        .into();
        assert_eq!(invalid.status, StatusCode::BAD_REQUEST);

        let failed: ApiError = RegistryError::Invocation {
            name: "x".into(),
            source: PluginError::Panicked("boom".into()),
        }
        .into();
        assert_eq!(failed.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_provider_error_mapping() {
        let missing: ApiError = ProviderError::missing_api_key("openai").into();
        assert_eq!(missing.status, StatusCode::BAD_REQUEST);

        let upstream: ApiError = ProviderError::status("openai", 429, "slow down").into();
        assert_eq!(upstream.status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_config_error_mapping() {
        let invalid: ApiError = ConfigError::InvalidServiceId("  ".into()).into();
        assert_eq!(invalid.status, StatusCode::BAD_REQUEST);

        let tagged: ApiError = ConfigError::TaggedPlaintext("openai".into()).into();
        assert_eq!(tagged.status, StatusCode::BAD_REQUEST);
    }
}
