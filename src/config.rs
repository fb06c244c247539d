//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::BackendKind;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Which backend serves the cache contract
    pub backend: BackendKind,
    /// In-process sweep interval in seconds
    pub sweep_interval: u64,
    /// Interval in seconds between background pings of the backend
    pub maintenance_interval: u64,
    /// Redis connection URL, may carry credentials
    pub redis_url: String,
    /// Blocking-read timeout in milliseconds for new stream entries, 0 = wait forever
    pub redis_block_ms: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_BACKEND` - `local` or `redis` (default: local)
    /// - `SWEEP_INTERVAL` - Sweep interval in seconds (default: 60)
    /// - `MAINTENANCE_INTERVAL` - Ping frequency in seconds (default: 1)
    /// - `REDIS_URL` - Redis URL (default: redis://127.0.0.1:6379)
    /// - `REDIS_BLOCK_MS` - Blocking read timeout in ms (default: 5000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            backend: env::var("CACHE_BACKEND")
                .map(|v| BackendKind::parse_or_default(&v))
                .unwrap_or(defaults.backend),
            sweep_interval: parse_var("SWEEP_INTERVAL").unwrap_or(defaults.sweep_interval),
            maintenance_interval: parse_var("MAINTENANCE_INTERVAL")
                .unwrap_or(defaults.maintenance_interval),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            redis_block_ms: parse_var("REDIS_BLOCK_MS").unwrap_or(defaults.redis_block_ms),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
        }
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }

    pub fn maintenance_interval(&self) -> Duration {
        Duration::from_secs(self.maintenance_interval)
    }

    pub fn redis_block(&self) -> Duration {
        Duration::from_millis(self.redis_block_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::Local,
            sweep_interval: 60,
            maintenance_interval: 1,
            redis_url: "redis://127.0.0.1:6379".to_string(),
            redis_block_ms: 5000,
            server_port: 3000,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.backend, BackendKind::Local);
        assert_eq!(config.sweep_interval(), Duration::from_secs(60));
        assert_eq!(config.maintenance_interval(), Duration::from_secs(1));
        assert_eq!(config.redis_block(), Duration::from_millis(5000));
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_BACKEND");
        env::remove_var("SWEEP_INTERVAL");
        env::remove_var("MAINTENANCE_INTERVAL");
        env::remove_var("REDIS_URL");
        env::remove_var("REDIS_BLOCK_MS");
        env::remove_var("SERVER_PORT");

        let config = Config::from_env();
        assert_eq!(config, Config::default());
    }
}
