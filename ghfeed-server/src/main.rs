mod config;
mod github;
mod routes;
mod state;

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ghfeed_server=info,tower_http=info".into()),
        )
        .init();

    let config = ServerConfig::load()?;
    info!(
        token_exists = config.token().is_some(),
        token_length = config.token().map(str::len).unwrap_or(0),
        pagination = ?config.pagination_mode,
        github_api = %config.github_api_url,
        "environment check"
    );

    let state = AppState::new(&config)?;
    let app = routes::app(state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("ghfeed-server listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("ghfeed-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
