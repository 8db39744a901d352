//! Application wiring: state, router, metrics exporter and serving.

use crate::config::{Config, ConfigError};
use axum::Router;
use event_api_core::repository::EventRepository;
use event_api_web::links::LinkBuilder;
use event_api_web::metrics::register_metrics;
use event_api_web::{AppState, PagingConfig, build_router};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{info, warn};

/// Errors that stop the server from starting or running.
#[derive(Error, Debug)]
pub enum StartupError {
    /// Configuration is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Socket or runtime failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Prometheus exporter could not be installed
    #[error("Metrics error: {0}")]
    Metrics(String),

    /// The server task panicked or was cancelled
    #[error("Server task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Build the HTTP application for `config` over `repository`.
pub fn build_app(config: &Config, repository: Arc<dyn EventRepository>) -> Router {
    let state = AppState::new(repository, LinkBuilder::new(&config.api.public_base_url))
        .with_paging(PagingConfig {
            default_size: config.api.default_page_size,
            max_size: config.api.max_page_size,
        });
    build_router(state)
}

/// Install the Prometheus recorder with its scrape endpoint on `addr` and
/// describe the API metrics.
///
/// # Errors
///
/// Returns [`StartupError::Metrics`] when a recorder is already installed or
/// the listener cannot be set up.
pub fn install_metrics(addr: SocketAddr) -> Result<(), StartupError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| StartupError::Metrics(e.to_string()))?;

    register_metrics();
    info!(addr = %addr, "Metrics exporter listening at http://{addr}/metrics");
    Ok(())
}

/// Serve `router` on `listener` until `shutdown` resolves.
///
/// In-flight requests get `grace` to finish once shutdown begins.
///
/// # Errors
///
/// Returns an error when the server fails or its task panics.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
    grace: Duration,
) -> Result<(), StartupError> {
    let (stopping_tx, mut stopping_rx) = broadcast::channel::<()>(1);

    let mut server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                let _ = stopping_tx.send(());
            })
            .await
    });
    let abort = server.abort_handle();

    tokio::select! {
        result = &mut server => result??,
        () = async {
            let _ = stopping_rx.recv().await;
            tokio::time::sleep(grace).await;
        } => {
            warn!(grace_secs = grace.as_secs(), "Graceful shutdown timed out, aborting open connections");
            abort.abort();
        },
    }

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            },
            Err(err) => {
                warn!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
