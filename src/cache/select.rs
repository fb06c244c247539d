//! Backend Selection
//!
//! Builds the configured backend behind the shared contract.

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use crate::cache::{Cache, LocalCache, RedisCache};
use crate::config::Config;
use crate::error::Result;

/// Which backend implements the cache contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    #[default]
    Local,
    Redis,
}

impl BackendKind {
    /// Parses a backend name case-insensitively, falling back to `Local`.
    pub fn parse_or_default(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "local" | "memory" => BackendKind::Local,
            "redis" => BackendKind::Redis,
            other => {
                warn!("Unknown cache backend '{}', using local", other);
                BackendKind::Local
            }
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Local => f.write_str("local"),
            BackendKind::Redis => f.write_str("redis"),
        }
    }
}

/// Creates the backend named by `config`.
///
/// The Redis backend is checked with `PING` before it is returned.
pub async fn connect(config: &Config) -> Result<Arc<dyn Cache>> {
    let cache: Arc<dyn Cache> = match config.backend {
        BackendKind::Local => Arc::new(LocalCache::new(config.sweep_interval())),
        BackendKind::Redis => {
            Arc::new(RedisCache::connect(&config.redis_url, config.redis_block()).await?)
        }
    };

    info!("Using {} cache backend", config.backend);
    Ok(cache)
}
