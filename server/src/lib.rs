//! Event API server.
//!
//! Wires the event REST API into a runnable service:
//!
//! - configuration from environment variables ([`config`])
//! - in-memory event storage
//! - the axum router from `event-api-web`
//! - a Prometheus scrape endpoint
//! - graceful shutdown on Ctrl+C and SIGTERM
//!
//! # Usage
//!
//! ```bash
//! PORT=8080 PUBLIC_BASE_URL=http://localhost:8080 cargo run -p event-api-server
//! ```

#![forbid(unsafe_code)]

pub mod app;
pub mod config;

pub use app::{StartupError, build_app, install_metrics, serve, shutdown_signal};
pub use config::{ApiConfig, Config, ConfigError, ServerConfig};
