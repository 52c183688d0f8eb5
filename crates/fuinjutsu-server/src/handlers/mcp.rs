//! MCP listing, reload and execution

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use fuinjutsu_core::mcp::{DiscoveryReport, JsonMap, PluginMetadata};
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, HandlerResult};
use crate::state::AppState;

/// A loaded MCP as listed over HTTP
#[derive(Debug, Serialize)]
pub struct McpDto {
    pub name: String,
    pub metadata: PluginMetadata,
}

/// GET /mcp
pub async fn list_mcps_handler(State(state): State<AppState>) -> Json<Vec<McpDto>> {
    let mcps = state
        .registry
        .list_all()
        .into_iter()
        .map(|(name, metadata)| McpDto { name, metadata })
        .collect();
    Json(mcps)
}

/// GET /mcp/:name
pub async fn get_mcp_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> HandlerResult<Json<McpDto>> {
    let record = state
        .registry
        .get(&name)
        .ok_or_else(|| ApiError::not_found(format!("MCP '{}' non trouvé", name)))?;

    Ok(Json(McpDto {
        name: record.name,
        metadata: record.metadata,
    }))
}

/// POST /admin/mcp/reload
pub async fn reload_mcps_handler(State(state): State<AppState>) -> Json<DiscoveryReport> {
    Json(state.registry.discover())
}

/// Body must be a non-empty JSON object
fn parse_input(body: &[u8]) -> HandlerResult<JsonMap> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|_| ApiError::bad_request("Données d'entrée non valides"))?;

    match value {
        Value::Object(map) if !map.is_empty() => Ok(map),
        _ => Err(ApiError::bad_request(
            "Données d'entrée manquantes ou non valides",
        )),
    }
}

/// POST /mcp/:name
pub async fn execute_mcp_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> HandlerResult<Json<JsonMap>> {
    if !state.registry.contains(&name) {
        return Err(ApiError::not_found(format!("MCP '{}' non trouvé", name)));
    }

    let input = parse_input(&body)?;
    let output = state.registry.try_execute(&name, input).await?;
    Ok(Json(output))
}
