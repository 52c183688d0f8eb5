//! Fûinjutsu REST server
//!
//! Exposes the MCP registry, the API-key store and the chat providers of
//! `fuinjutsu-core` over HTTP.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod shutdown;
pub mod state;

pub use config::{ServerConfig, ServerConfigError};
pub use error::{ApiError, HandlerResult};
pub use router::create_router;
pub use state::AppState;

/// Bind, serve and wait for a shutdown signal
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::build(&config);
    tracing::info!(
        config = %state.store.path().display(),
        encrypted = state.store.is_encrypted(),
        mcps = state.registry.len(),
        "Fûinjutsu state ready"
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
