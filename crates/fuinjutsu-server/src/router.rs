//! Application router configuration

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{api_keys, basic, chat, mcp};
use crate::state::AppState;

/// Create the application router with a specific state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(basic::health_handler))
        // MCP modules
        .route("/mcp", get(mcp::list_mcps_handler))
        .route("/admin/mcp/reload", post(mcp::reload_mcps_handler))
        .route(
            "/mcp/:name",
            get(mcp::get_mcp_handler).post(mcp::execute_mcp_handler),
        )
        // API keys
        .route("/api-keys", get(api_keys::list_keys_handler))
        .route(
            "/api-keys/:service",
            put(api_keys::set_key_handler).delete(api_keys::delete_key_handler),
        )
        // Chat
        .route("/chat/:provider", post(chat::chat_handler))
        .with_state(state)
}
