use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use backstage::api::ApiClient;
use backstage::config::{Cli, Config};
use backstage::routes;
use backstage::session::SessionStore;
use backstage::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse CLI args and load config
    let cli = Cli::parse();
    let data_dir = Config::data_dir(&cli)?;
    std::fs::create_dir_all(&data_dir)?;
    tracing::info!("Data directory: {}", data_dir.display());

    let config = Config::load(&cli)?;

    let session_path = config.session_path();
    let session = SessionStore::open(&session_path)
        .with_context(|| format!("opening session store {}", session_path.display()))?;
    let session = Arc::new(session);
    tracing::info!("Session store: {}", session.path().display());
    if let Some(username) = session.username() {
        tracing::info!("Restored session for {}", username);
    }

    let api = ApiClient::new(&config.api, session.clone()).context("building API client")?;
    tracing::info!("Backend API: {}", api.base_url());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = routes::router(AppState::new(config, session, api));

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
