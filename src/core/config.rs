//! Configuration management for the Discogs MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults. The resulting struct is
//! passed explicitly to everything that needs it; nothing reads the
//! environment after startup.

use super::transport::TransportConfig;
use crate::domains::discogs::RateLimitConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Upstream Discogs API configuration.
    pub discogs: DiscogsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Configuration for the Discogs API client.
#[derive(Clone, Serialize, Deserialize)]
pub struct DiscogsConfig {
    /// Personal access token. Unauthenticated requests get a lower rate
    /// ceiling and no marketplace data.
    /// Generate one at: https://www.discogs.com/settings/developers
    pub token: Option<String>,

    /// API origin, without trailing slash.
    pub base_url: String,

    /// Public website origin used to build result URLs.
    pub site_url: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Client-side rate limiting.
    pub rate_limit: RateLimitConfig,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for DiscogsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscogsConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("site_url", &self.site_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("rate_limit", &self.rate_limit)
            .finish()
    }
}

impl Default for DiscogsConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_url: "https://api.discogs.com".to_string(),
            site_url: "https://www.discogs.com".to_string(),
            request_timeout_secs: 30,
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "discogs-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig::default(),
            transport: TransportConfig::default(),
            discogs: DiscogsConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_timestamps: true,
        }
    }
}

impl LoggingConfig {
    /// Read `MCP_LOG_LEVEL` and `MCP_LOG_TIMESTAMPS` (after loading `.env`).
    ///
    /// Separate from [`Config::from_env`] so the subscriber can be installed
    /// before the rest of the configuration logs its warnings.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut logging = Self::default();
        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            logging.level = level;
        }
        if let Ok(ts) = std::env::var("MCP_LOG_TIMESTAMPS") {
            logging.with_timestamps = !matches!(ts.to_lowercase().as_str(), "false" | "0");
        }
        logging
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Variables are prefixed with `MCP_` (e.g. `MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`). The Discogs token is also read from the unprefixed
    /// `DISCOGS_TOKEN`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        config.logging = LoggingConfig::from_env();
        config.transport = TransportConfig::from_env();

        let token = std::env::var("MCP_DISCOGS_TOKEN")
            .or_else(|_| std::env::var("DISCOGS_TOKEN"))
            .ok()
            .filter(|t| !t.trim().is_empty());
        if token.is_some() {
            info!("Discogs token loaded from environment");
        } else {
            warn!(
                "No Discogs token configured. Requests are unauthenticated and \
                 marketplace pricing will be unavailable (set DISCOGS_TOKEN)"
            );
        }
        config.discogs.token = token;

        if let Ok(base_url) = std::env::var("MCP_DISCOGS_BASE_URL") {
            config.discogs.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("MCP_DISCOGS_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.discogs.request_timeout_secs = secs,
                Err(_) => warn!("Ignoring invalid MCP_DISCOGS_TIMEOUT_SECS: {}", timeout),
            }
        }

        if let Ok(limit) = std::env::var("MCP_DISCOGS_RATE_LIMIT") {
            match limit.parse::<u32>() {
                Ok(0) => {
                    config.discogs.rate_limit.enabled = false;
                    warn!("Client-side rate limiting disabled");
                }
                Ok(n) => config.discogs.rate_limit.max_requests = n,
                Err(_) => warn!("Ignoring invalid MCP_DISCOGS_RATE_LIMIT: {}", limit),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn clear_discogs_env() {
        unsafe {
            std::env::remove_var("MCP_DISCOGS_TOKEN");
            std::env::remove_var("DISCOGS_TOKEN");
            std::env::remove_var("MCP_DISCOGS_RATE_LIMIT");
            std::env::remove_var("MCP_DISCOGS_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_token_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_discogs_env();
        unsafe {
            std::env::set_var("DISCOGS_TOKEN", "test_token_12345");
        }
        let config = Config::from_env();
        assert_eq!(config.discogs.token.as_deref(), Some("test_token_12345"));
        clear_discogs_env();
    }

    #[test]
    fn test_prefixed_token_wins() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_discogs_env();
        unsafe {
            std::env::set_var("DISCOGS_TOKEN", "plain");
            std::env::set_var("MCP_DISCOGS_TOKEN", "prefixed");
        }
        let config = Config::from_env();
        assert_eq!(config.discogs.token.as_deref(), Some("prefixed"));
        clear_discogs_env();
    }

    #[test]
    fn test_rate_limit_override() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_discogs_env();
        unsafe {
            std::env::set_var("MCP_DISCOGS_RATE_LIMIT", "25");
            std::env::set_var("MCP_DISCOGS_TIMEOUT_SECS", "5");
        }
        let config = Config::from_env();
        assert!(config.discogs.rate_limit.enabled);
        assert_eq!(config.discogs.rate_limit.max_requests, 25);
        assert_eq!(config.discogs.request_timeout_secs, 5);

        unsafe {
            std::env::set_var("MCP_DISCOGS_RATE_LIMIT", "0");
        }
        let config = Config::from_env();
        assert!(!config.discogs.rate_limit.enabled);
        clear_discogs_env();
    }

    #[test]
    fn test_logging_config_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_LOG_LEVEL", "debug");
            std::env::set_var("MCP_LOG_TIMESTAMPS", "false");
        }
        let logging = LoggingConfig::from_env();
        assert_eq!(logging.level, "debug");
        assert!(!logging.with_timestamps);

        let config = Config::from_env();
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.with_timestamps);

        unsafe {
            std::env::remove_var("MCP_LOG_LEVEL");
            std::env::remove_var("MCP_LOG_TIMESTAMPS");
        }
        let logging = LoggingConfig::from_env();
        assert_eq!(logging.level, "info");
        assert!(logging.with_timestamps);
    }

    #[test]
    fn test_token_redacted_in_debug() {
        let discogs = DiscogsConfig {
            token: Some("super_secret_token".to_string()),
            ..Default::default()
        };
        let debug_str = format!("{:?}", discogs);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_token"));
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert!(config.discogs.token.is_none());
        assert_eq!(config.discogs.base_url, "https://api.discogs.com");
        assert_eq!(config.discogs.rate_limit.max_requests, 60);
        assert_eq!(config.discogs.rate_limit.period_secs, 60);
    }
}
