use std::sync::Arc;

use anyhow::Context;
use cinedeck_metadata::tmdb::TmdbClient;
use cinedeck_server::config::ServerConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env().context("invalid configuration")?;
    info!(base_url = %config.tmdb.base_url, "using TMDB catalog");

    let catalog = TmdbClient::new(&config.tmdb).context("failed to build TMDB client")?;
    let app_state =
        cinedeck_server::state::AppState::new(Arc::new(catalog), config.tmdb.image_base_url);

    let app = cinedeck_server::routes::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .context("failed to bind")?;
    info!(addr = %config.bind, "server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
