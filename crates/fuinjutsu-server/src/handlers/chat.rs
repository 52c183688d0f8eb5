//! Single-prompt chat against a hosted LLM

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use fuinjutsu_core::{create_provider, ChatOptions};
use serde::{Deserialize, Serialize};

use super::json_body;
use crate::error::{ApiError, HandlerResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub prompt: String,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub provider: String,
    pub response: String,
}

/// POST /chat/:provider
pub async fn chat_handler(
    State(state): State<AppState>,
    Path(provider_id): Path<String>,
    body: Bytes,
) -> HandlerResult<Json<ChatResponse>> {
    let provider = create_provider(
        &provider_id,
        state.secrets(),
        state.http.clone(),
        state.logger.clone(),
    )
    .ok_or_else(|| ApiError::not_found(format!("Unknown provider '{}'", provider_id)))?;

    let request: ChatRequest = json_body(&body)?;

    if request.prompt.trim().is_empty() {
        return Err(ApiError::bad_request("prompt is required"));
    }

    let mut options = ChatOptions::default();
    if let Some(temperature) = request.temperature {
        options = options.with_temperature(temperature);
    }
    if let Some(max_tokens) = request.max_tokens {
        options = options.with_max_tokens(max_tokens);
    }

    let response = provider.complete(&request.prompt, options).await?;

    Ok(Json(ChatResponse {
        provider: provider.name().to_string(),
        response,
    }))
}
