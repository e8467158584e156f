//! Server configuration for Sales Flow.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::net::SocketAddr;

use salesflow_scene::field::DEFAULT_COUNT;

/// Default port when neither `SALESFLOW_BIND_ADDR` nor `PORT` is set.
const DEFAULT_PORT: u16 = 3000;

/// Largest background field the server will build.
pub const MAX_FIELD_COUNT: usize = 1024;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Number of boxes in the hero background.
    pub field_count: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            log_level: "info".to_owned(),
            field_count: DEFAULT_COUNT,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT`: port to bind on (PaaS convention, binds to `0.0.0.0`)
    /// - `SALESFLOW_BIND_ADDR`: full bind address (overrides `PORT`, default: `127.0.0.1:3000`)
    /// - `SALESFLOW_LOG_LEVEL`: log filter (default: `info`)
    /// - `SALESFLOW_FIELD_COUNT`: decorative box count (default: `42`, at most [`MAX_FIELD_COUNT`] is built)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // Priority: SALESFLOW_BIND_ADDR > PORT > default.
        let bind_addr = if let Some(addr) = lookup("SALESFLOW_BIND_ADDR") {
            addr.parse().unwrap_or(defaults.bind_addr)
        } else if let Some(port) = lookup("PORT") {
            let port: u16 = port.parse().unwrap_or(DEFAULT_PORT);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            defaults.bind_addr
        };

        let log_level = lookup("SALESFLOW_LOG_LEVEL").unwrap_or(defaults.log_level);

        let field_count = lookup("SALESFLOW_FIELD_COUNT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.field_count);

        Self {
            bind_addr,
            log_level,
            field_count,
        }
    }
}
