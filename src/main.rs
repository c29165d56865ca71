//! Service entry point

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use websearch_rs::{
    config::Settings,
    network::HttpClient,
    providers::ProviderRegistry,
    search::SearchManager,
    web::{create_router, AppState},
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    info!("Starting websearch-rs v{}", websearch_rs::VERSION);

    // Resolve configuration once; the core never reads the environment
    let settings = Settings::from_env();

    let client = HttpClient::new()?;
    let registry = Arc::new(ProviderRegistry::from_settings(&settings));
    info!(
        "Configured {} providers, {} available",
        registry.len(),
        registry.available_providers().len()
    );

    let manager = SearchManager::new(registry, client);
    let app = create_router(AppState::new(manager));

    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
