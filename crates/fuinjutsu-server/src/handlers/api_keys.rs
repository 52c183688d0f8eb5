//! API key management; plaintext never leaves the server

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fuinjutsu_core::config::display_name;
use fuinjutsu_core::{canonical_service_id, KeyStatus};
use serde::{Deserialize, Serialize};

use super::json_body;
use crate::error::{ApiError, HandlerResult};
use crate::state::AppState;

/// A stored key as listed over HTTP
#[derive(Debug, Serialize)]
pub struct ApiKeyDto {
    pub service: String,
    pub id: String,
    pub masked: String,
    pub status: KeyStatus,
}

#[derive(Debug, Deserialize)]
pub struct SetKeyRequest {
    pub key: String,
}

/// GET /api-keys
pub async fn list_keys_handler(State(state): State<AppState>) -> Json<Vec<ApiKeyDto>> {
    let keys = state
        .store
        .entries()
        .into_iter()
        .map(|entry| ApiKeyDto {
            service: display_name(&entry.service_id).to_string(),
            id: entry.service_id,
            masked: entry.masked,
            status: entry.status,
        })
        .collect();
    Json(keys)
}

/// PUT /api-keys/:service
pub async fn set_key_handler(
    State(state): State<AppState>,
    Path(service): Path<String>,
    body: Bytes,
) -> HandlerResult<StatusCode> {
    if canonical_service_id(&service).is_empty() {
        return Err(ApiError::bad_request("Vous devez spécifier un nom de service"));
    }
    let request: SetKeyRequest = json_body(&body)?;

    state.store.set(&service, &request.key)?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api-keys/:service
pub async fn delete_key_handler(
    State(state): State<AppState>,
    Path(service): Path<String>,
) -> HandlerResult<StatusCode> {
    state.store.remove(&service)?;
    Ok(StatusCode::NO_CONTENT)
}
