use anyhow::Context;
use clap::Parser; // for cli
use geonames_gateway::config::Args;
use geonames_gateway::state::AppState;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // parse cli arguments
    let args = Args::parse();

    // creating shared state
    let state = Arc::new(AppState::from_args(&args).context("failed to build app state")?);

    if !state.credentials.is_usable() {
        tracing::warn!("GEONAMES_USERNAME is not set, Geonames routes will answer 401");
    }

    let app = geonames_gateway::app(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("Gateway running on http://localhost:{}", args.port);
    tracing::info!("Forwarding to Geonames at {}", args.geonames_url);
    tracing::info!("Cache TTL: {} seconds", args.cache_ttl);
    tracing::info!(
        "Rate limit: {} requests per minute, {} per hour",
        args.requests_per_minute, args.requests_per_hour
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
