//! Server configuration from environment

use lestats::DEFAULT_TIMEOUT_SECS;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Default host address
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default port number
pub const DEFAULT_PORT: u16 = 8080;

/// Default base URL of the statistics service
pub const DEFAULT_STATS_URL: &str = "http://localhost:3000";

/// Default shared secret for token validation
///
/// Matches the development secret of the token-issuing service; always
/// override in production via `LEQR_JWT_SECRET`.
pub const DEFAULT_JWT_SECRET: &str = "guillermo.cirilo";

/// Server configuration loaded at startup
///
/// The JWT secret is the only process-wide shared value; it is read once
/// here and injected, never held as a mutable global.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Base URL of the downstream statistics service
    pub stats_url: String,

    /// Timeout for the statistics call, in seconds
    pub stats_timeout_secs: u64,

    /// Shared secret for bearer-token validation
    pub jwt_secret: String,

    /// Log level for tracing
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            stats_url: DEFAULT_STATS_URL.to_string(),
            stats_timeout_secs: DEFAULT_TIMEOUT_SECS,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load config from environment variables with fallback to defaults
    ///
    /// Environment variables:
    /// - `LEQR_HOST` - Server host
    /// - `LEQR_PORT` - Server port
    /// - `LEQR_STATS_URL` - Statistics service base URL
    /// - `LEQR_STATS_TIMEOUT_SECS` - Statistics call timeout in seconds
    /// - `LEQR_JWT_SECRET` - Token validation secret
    /// - `LEQR_LOG_LEVEL` - Log level (trace, debug, info, warn, error)
    ///
    /// # Returns
    ///
    /// Server configuration with env vars applied
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("LEQR_HOST") {
            config.host = host;
        }

        if let Ok(port_str) = std::env::var("LEQR_PORT") {
            if let Ok(port) = port_str.parse::<u16>() {
                config.port = port;
            }
        }

        if let Ok(stats_url) = std::env::var("LEQR_STATS_URL") {
            config.stats_url = stats_url;
        }

        if let Ok(timeout_str) = std::env::var("LEQR_STATS_TIMEOUT_SECS") {
            if let Ok(timeout) = timeout_str.parse::<u64>() {
                config.stats_timeout_secs = timeout;
            }
        }

        if let Ok(secret) = std::env::var("LEQR_JWT_SECRET") {
            config.jwt_secret = secret;
        }

        if let Ok(log_level) = std::env::var("LEQR_LOG_LEVEL") {
            config.log_level = log_level;
        }

        config
    }

    /// Get the socket address for the server
    ///
    /// # Returns
    ///
    /// `Result<SocketAddr, String>` - Parsed address or error message
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("Invalid address: {}", e))
    }

    /// Get the full server URL
    ///
    /// # Returns
    ///
    /// Formatted URL string (e.g., "http://0.0.0.0:8080")
    #[must_use]
    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Validate configuration
    ///
    /// # Returns
    ///
    /// `Result<(), String>` - Ok if valid, error otherwise
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port cannot be zero".to_string());
        }

        if self.host.is_empty() {
            return Err("Host cannot be empty".to_string());
        }

        if self.stats_url.is_empty() {
            return Err("Statistics service URL cannot be empty".to_string());
        }

        if self.stats_timeout_secs == 0 {
            return Err("Statistics timeout must be greater than zero".to_string());
        }

        if self.jwt_secret.is_empty() {
            return Err("JWT secret cannot be empty".to_string());
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.log_level
                ));
            }
        }

        Ok(())
    }
}
