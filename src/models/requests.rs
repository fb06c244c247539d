//! Request DTOs for the cache service API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use std::time::Duration;

use serde::Deserialize;

/// Default number of entries returned by `GET /streams/:stream/last`.
pub const DEFAULT_LAST_N: usize = 10;

/// Request body for `PUT /keys/:key`
///
/// # Fields
/// - `value`: The value to store
/// - `ttl_ms`: Optional TTL in milliseconds; missing or 0 means no practical expiration
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The value to store
    pub value: String,
    /// Optional TTL in milliseconds
    #[serde(default)]
    pub ttl_ms: Option<u64>,
}

impl SetRequest {
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms.unwrap_or(0))
    }
}

/// Request body for `DELETE /keys`
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteRequest {
    /// Keys to remove; absent keys are ignored
    #[serde(default)]
    pub keys: Vec<String>,
}

/// Request body for `POST /streams/:stream`
#[derive(Debug, Clone, Deserialize)]
pub struct AppendRequest {
    /// Opaque payload appended to the stream
    pub value: String,
    /// Maximum number of entries the stream keeps
    pub maxlen: u64,
}

/// Query string for `GET /streams/:stream/last`
#[derive(Debug, Clone, Deserialize)]
pub struct LastNQuery {
    #[serde(default = "default_last_n")]
    pub n: usize,
}

fn default_last_n() -> usize {
    DEFAULT_LAST_N
}

/// Returns an error message if a path segment naming a key or stream is empty.
pub fn validate_name(kind: &str, name: &str) -> Option<String> {
    if name.trim().is_empty() {
        return Some(format!("{kind} name cannot be empty"));
    }
    None
}
