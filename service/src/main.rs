#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use votelog_api::{
    config::Config,
    http::build_router,
    rest::AppState,
    votelog::{PageSettings, YamlVoteLogRepository},
};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load and validate configuration first (fail-fast)
    let config = Config::load().map_err(|e| anyhow::anyhow!("{e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.level))
        .init();

    // Init banner so container logs clearly show startup
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "votelog-api starting up"
    );

    let repo = YamlVoteLogRepository::load(&config.data)?;
    let state = AppState::new(Arc::new(repo), PageSettings::from(&config.site));

    let app = build_router(state, &config.cors, config.swagger.enabled);

    let addr = config.server.socket_addr()?;
    tracing::info!("Starting server at http://{}/api/v1/votelogs", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
