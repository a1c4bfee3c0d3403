use anyhow::Context;
use tracing_subscriber::EnvFilter;

use market_gate::{app, config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up JWT_SECRET, UPSTREAM_URL, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting market gate in {:?} mode", config.environment);

    let state = AppState::from_config(config).context("invalid configuration")?;
    match &state.upstream {
        Some(upstream) => tracing::info!("Forwarding allowed requests to {}", upstream.base()),
        None => tracing::warn!("UPSTREAM_URL not set; pages are answered with placeholders"),
    }

    let bind_addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Market gate listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .await
        .context("server error")?;

    Ok(())
}
