//! Failures of a single prompt/response exchange with a hosted model

use thiserror::Error;

/// Where a chat completion went wrong
///
/// Every provider makes exactly one HTTP request per prompt, so the
/// variants follow that request: no key to send, no answer, a non-2xx
/// answer, or a 2xx answer without the completion text.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("API key is required for {provider}")]
    MissingApiKey { provider: String },

    #[error("{provider} request failed: {source}")]
    Transport {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    /// `body` is the raw reply text
    #[error("{provider} API error ({status}): {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("Invalid response from {provider}: {detail}")]
    MalformedReply { provider: String, detail: String },
}

impl ProviderError {
    pub fn missing_api_key(provider: impl Into<String>) -> Self {
        Self::MissingApiKey {
            provider: provider.into(),
        }
    }

    pub fn transport(provider: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            provider: provider.into(),
            source,
        }
    }

    pub fn status(provider: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            provider: provider.into(),
            status,
            body: body.into(),
        }
    }

    pub fn malformed(provider: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::MalformedReply {
            provider: provider.into(),
            detail: detail.into(),
        }
    }

    /// Whether the request left this process; only a missing key is local
    pub fn is_upstream(&self) -> bool {
        !matches!(self, Self::MissingApiKey { .. })
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
