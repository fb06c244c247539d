//! Response DTOs for the cache service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{StreamEntry, StreamId};

/// Response body for `GET /keys/:key`
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: String,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for `PUT /keys/:key`
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for `DELETE /keys` and `DELETE /keys/:key`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The keys that were requested for removal
    pub keys: Vec<String>,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            message: format!("{} key(s) deleted", keys.len()),
            keys,
        }
    }
}

/// Response body for `POST /streams/:stream`
#[derive(Debug, Clone, Serialize)]
pub struct AppendResponse {
    pub stream: String,
    /// Backend-assigned ID of the new entry
    pub id: StreamId,
}

impl AppendResponse {
    pub fn new(stream: impl Into<String>, id: StreamId) -> Self {
        Self {
            stream: stream.into(),
            id: id.into(),
        }
    }
}

/// Response body for stream reads, entries ordered oldest first
#[derive(Debug, Clone, Serialize)]
pub struct EntriesResponse {
    pub stream: String,
    pub entries: Vec<StreamEntry>,
}

impl EntriesResponse {
    pub fn new(stream: impl Into<String>, entries: Vec<StreamEntry>) -> Self {
        Self {
            stream: stream.into(),
            entries,
        }
    }
}

/// Response body for `GET /ping`
#[derive(Debug, Clone, Serialize)]
pub struct PingResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Raw reply from the backend
    pub reply: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl PingResponse {
    /// Creates a new PingResponse with current timestamp
    pub fn healthy(reply: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            reply: reply.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_response_serialize() {
        let resp = GetResponse::new("test_key", "test_value");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("test_key"));
        assert!(json.contains("test_value"));
    }

    #[test]
    fn test_set_response_serialize() {
        let resp = SetResponse::new("my_key");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("my_key"));
        assert!(json.contains("successfully"));
    }

    #[test]
    fn test_delete_response_counts_keys() {
        let resp = DeleteResponse::new(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(resp.message, "2 key(s) deleted");
    }

    #[test]
    fn test_entries_response_serialize() {
        let resp = EntriesResponse::new(
            "chat",
            vec![StreamEntry::new("0", "hello"), StreamEntry::new("1", "world")],
        );
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["stream"], "chat");
        assert_eq!(json["entries"][0]["id"], "0");
        assert_eq!(json["entries"][1]["value"], "world");
    }

    #[test]
    fn test_ping_response_serialize() {
        let resp = PingResponse::healthy("pong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("pong"));
        assert!(json.contains("timestamp"));
    }
}
