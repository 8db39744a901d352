//! Configuration management for the event API server.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Unparsable numbers fall back to their defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors found while validating a [`Config`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A page size is zero.
    #[error("{0} must be at least 1")]
    ZeroPageSize(&'static str),

    /// The default page size is above the maximum.
    #[error("DEFAULT_PAGE_SIZE ({default}) exceeds MAX_PAGE_SIZE ({max})")]
    DefaultAboveMax {
        /// Configured default
        default: u32,
        /// Configured maximum
        max: u32,
    },

    /// A host/port pair is not a socket address.
    #[error("Invalid {name} address: {value}")]
    InvalidAddress {
        /// Which address
        name: &'static str,
        /// The rejected `host:port`
        value: String,
    },

    /// The public base URL is not absolute.
    #[error("PUBLIC_BASE_URL must start with http:// or https://, got {0}")]
    InvalidBaseUrl(String),
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// API behaviour configuration
    pub api: ApiConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Metrics server host (for Prometheus scraping)
    pub metrics_host: String,
    /// Metrics server port
    pub metrics_port: u16,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL prefixed to every link href
    pub public_base_url: String,
    /// Listing page size when the request names none
    pub default_page_size: u32,
    /// Largest listing page size
    pub max_page_size: u32,
}

fn parsed<T: FromStr>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    get(key).and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

fn text(get: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    get(key).unwrap_or_else(|| default.to_string())
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    #[must_use]
    pub fn from_source(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            server: ServerConfig {
                host: text(&get, "HOST", "0.0.0.0"),
                port: parsed(&get, "PORT", 8080),
                log_level: text(&get, "RUST_LOG", "info"),
                metrics_host: text(&get, "METRICS_HOST", "0.0.0.0"),
                metrics_port: parsed(&get, "METRICS_PORT", 9090),
                shutdown_timeout: parsed(&get, "SHUTDOWN_TIMEOUT", 30),
            },
            api: ApiConfig {
                public_base_url: text(&get, "PUBLIC_BASE_URL", "http://localhost:8080"),
                default_page_size: parsed(&get, "DEFAULT_PAGE_SIZE", 20),
                max_page_size: parsed(&get, "MAX_PAGE_SIZE", 2000),
            },
        }
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.default_page_size == 0 {
            return Err(ConfigError::ZeroPageSize("DEFAULT_PAGE_SIZE"));
        }
        if self.api.max_page_size == 0 {
            return Err(ConfigError::ZeroPageSize("MAX_PAGE_SIZE"));
        }
        if self.api.default_page_size > self.api.max_page_size {
            return Err(ConfigError::DefaultAboveMax {
                default: self.api.default_page_size,
                max: self.api.max_page_size,
            });
        }
        let url = &self.api.public_base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(url.clone()));
        }
        self.bind_addr()?;
        self.metrics_addr()?;
        Ok(())
    }

    /// Address the HTTP server binds to.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAddress`] when `HOST` is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        socket_addr("server", &self.server.host, self.server.port)
    }

    /// Address the Prometheus exporter binds to.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAddress`] when `METRICS_HOST` is not an IP address.
    pub fn metrics_addr(&self) -> Result<SocketAddr, ConfigError> {
        socket_addr("metrics", &self.server.metrics_host, self.server.metrics_port)
    }

    /// Graceful shutdown timeout.
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.server.shutdown_timeout)
    }
}

fn socket_addr(name: &'static str, host: &str, port: u16) -> Result<SocketAddr, ConfigError> {
    let value = format!("{host}:{port}");
    value
        .parse()
        .map_err(|_| ConfigError::InvalidAddress { name, value })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_source(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.metrics_port, 9090);
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(30));
        assert_eq!(config.api.public_base_url, "http://localhost:8080");
        assert_eq!(config.api.default_page_size, 20);
        assert_eq!(config.api.max_page_size, 2000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("PUBLIC_BASE_URL", "https://events.example.com"),
            ("DEFAULT_PAGE_SIZE", "10"),
            ("MAX_PAGE_SIZE", "100"),
        ]);

        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:3000");
        assert_eq!(config.api.public_base_url, "https://events.example.com");
        assert_eq!(config.api.default_page_size, 10);
        assert_eq!(config.api.max_page_size, 100);
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let config = config(&[("PORT", "eighty"), ("MAX_PAGE_SIZE", "-1")]);

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.api.max_page_size, 2000);
    }

    #[test]
    fn validation_errors() {
        assert_eq!(
            config(&[("DEFAULT_PAGE_SIZE", "0")]).validate(),
            Err(ConfigError::ZeroPageSize("DEFAULT_PAGE_SIZE"))
        );
        assert_eq!(
            config(&[("DEFAULT_PAGE_SIZE", "50"), ("MAX_PAGE_SIZE", "10")]).validate(),
            Err(ConfigError::DefaultAboveMax {
                default: 50,
                max: 10
            })
        );
        assert!(matches!(
            config(&[("HOST", "not a host")]).validate(),
            Err(ConfigError::InvalidAddress { name: "server", .. })
        ));
        assert!(matches!(
            config(&[("PUBLIC_BASE_URL", "localhost")]).validate(),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
    }
}
