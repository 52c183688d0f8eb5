use anyhow::Context;
use fuinjutsu_server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("fuinjutsu=info,fuinjutsu_core=info,fuinjutsu_server=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();

    let config = ServerConfig::from_env().context("invalid server configuration")?;
    fuinjutsu_server::serve(config).await
}
