//! Event API HTTP server.

use event_api_core::memory::InMemoryEventRepository;
use event_api_server::{Config, build_app, install_metrics, serve, shutdown_signal};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,event_api=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Event API server");

    // Load configuration
    let config = Config::from_env();
    config.validate()?;
    info!(
        public_base_url = %config.api.public_base_url,
        default_page_size = config.api.default_page_size,
        max_page_size = config.api.max_page_size,
        "Configuration loaded"
    );

    install_metrics(config.metrics_addr()?)?;

    let repository = Arc::new(InMemoryEventRepository::new());
    let app = build_app(&config, repository);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, "Server listening");

    serve(listener, app, shutdown_signal(), config.shutdown_timeout()).await?;

    Ok(())
}
