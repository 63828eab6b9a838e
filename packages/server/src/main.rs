use std::net::SocketAddr;

use anyhow::Context;
use tracing::{Level, info};

use server::config::AppConfig;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load config")?;

    let level: Level = config
        .server
        .log_level
        .parse()
        .context("Invalid server.log_level")?;
    tracing_subscriber::fmt().with_max_level(level).init();

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server.host / server.port")?;

    info!(
        delay_ms = config.analysis.delay_ms,
        timeout_ms = config.analysis.timeout_ms,
        max_code_size = config.analysis.max_code_size,
        "Analysis pipeline configured"
    );

    let app = server::build_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Code scoring service running at http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
