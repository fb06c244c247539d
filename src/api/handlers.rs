//! API Handlers
//!
//! HTTP request handlers, one per cache contract operation.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::debug;

use crate::cache::{Cache, LocalCache};
use crate::error::{CacheError, Result};
use crate::models::{
    validate_name, AppendRequest, AppendResponse, DeleteRequest, DeleteResponse, EntriesResponse,
    GetResponse, LastNQuery, PingResponse, SetRequest, SetResponse,
};

/// Application state shared across all handlers.
///
/// Handlers only see the cache contract, never a concrete backend.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<dyn Cache>,
}

impl AppState {
    /// Creates a new AppState around an already-built backend.
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self { cache }
    }

    /// Creates a new AppState backed by an in-process cache.
    pub fn local() -> Self {
        Self::new(Arc::new(LocalCache::default()))
    }
}

fn require_name(kind: &str, name: &str) -> Result<()> {
    match validate_name(kind, name) {
        Some(error_msg) => Err(CacheError::InvalidArgument(error_msg)),
        None => Ok(()),
    }
}

/// Handler for GET /keys/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    require_name("key", &key)?;
    let value = state.cache.get(&key).await?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for PUT /keys/:key
///
/// A missing or zero `ttl_ms` stores the value without practical expiration.
pub async fn set_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    require_name("key", &key)?;
    state.cache.set(&key, &req.value, req.ttl()).await?;

    Ok(Json(SetResponse::new(key)))
}

/// Handler for DELETE /keys/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    require_name("key", &key)?;
    state.cache.del(&[key.as_str()]).await?;

    Ok(Json(DeleteResponse::new(vec![key])))
}

/// Handler for DELETE /keys
///
/// Removes every listed key; unknown keys are not an error.
pub async fn delete_many_handler(
    State(state): State<AppState>,
    Json(req): Json<DeleteRequest>,
) -> Result<Json<DeleteResponse>> {
    let keys: Vec<&str> = req.keys.iter().map(String::as_str).collect();
    state.cache.del(&keys).await?;

    Ok(Json(DeleteResponse::new(req.keys)))
}

/// Handler for POST /streams/:stream
pub async fn append_handler(
    State(state): State<AppState>,
    Path(stream): Path<String>,
    Json(req): Json<AppendRequest>,
) -> Result<Json<AppendResponse>> {
    require_name("stream", &stream)?;
    let id = state.cache.xadd(&stream, &req.value, req.maxlen).await?;
    debug!("Appended entry {} to stream {}", id, stream);

    Ok(Json(AppendResponse::new(stream, id)))
}

/// Handler for GET /streams/:stream/new
///
/// Consumes the entries it returns.
pub async fn new_entries_handler(
    State(state): State<AppState>,
    Path(stream): Path<String>,
) -> Result<Json<EntriesResponse>> {
    require_name("stream", &stream)?;
    let entries = state.cache.xget_new(&stream).await?;

    Ok(Json(EntriesResponse::new(stream, entries)))
}

/// Handler for GET /streams/:stream/last?n=
pub async fn last_n_handler(
    State(state): State<AppState>,
    Path(stream): Path<String>,
    Query(query): Query<LastNQuery>,
) -> Result<Json<EntriesResponse>> {
    require_name("stream", &stream)?;
    let entries = state.cache.xget_last_n(&stream, query.n).await?;

    Ok(Json(EntriesResponse::new(stream, entries)))
}

/// Handler for GET /ping
pub async fn ping_handler(State(state): State<AppState>) -> Result<Json<PingResponse>> {
    let reply = state.cache.ping().await?;

    Ok(Json(PingResponse::healthy(reply)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::requests::DEFAULT_LAST_N;

    fn set_request(value: &str) -> Json<SetRequest> {
        Json(SetRequest {
            value: value.to_string(),
            ttl_ms: None,
        })
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = AppState::local();

        let result = set_handler(
            State(state.clone()),
            Path("test_key".to_string()),
            set_request("test_value"),
        )
        .await;
        assert!(result.is_ok());

        let response = get_handler(State(state), Path("test_key".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value, "test_value");
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let state = AppState::local();

        let result = get_handler(State(state), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_key_is_ok() {
        let state = AppState::local();

        let result = delete_handler(State(state), Path("never-set".to_string())).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_many_handler() {
        let state = AppState::local();
        for key in ["a", "b"] {
            set_handler(State(state.clone()), Path(key.to_string()), set_request("v"))
                .await
                .unwrap();
        }

        let req = DeleteRequest {
            keys: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        };
        let response = delete_many_handler(State(state.clone()), Json(req))
            .await
            .unwrap();
        assert_eq!(response.keys.len(), 3);

        assert!(get_handler(State(state), Path("a".to_string())).await.is_err());
    }

    #[tokio::test]
    async fn test_append_and_read_handlers() {
        let state = AppState::local();

        for value in ["hello", "world"] {
            let req = AppendRequest {
                value: value.to_string(),
                maxlen: 100,
            };
            append_handler(State(state.clone()), Path("chat".to_string()), Json(req))
                .await
                .unwrap();
        }

        let response = last_n_handler(
            State(state),
            Path("chat".to_string()),
            Query(LastNQuery { n: DEFAULT_LAST_N }),
        )
        .await
        .unwrap();
        assert_eq!(response.entries.len(), 2);
        assert_eq!(response.entries[0].id, "0");
        assert_eq!(response.entries[1].value, "world");
    }

    #[tokio::test]
    async fn test_append_with_zero_maxlen() {
        let state = AppState::local();

        let req = AppendRequest {
            value: "v".to_string(),
            maxlen: 0,
        };
        let result = append_handler(State(state), Path("s".to_string()), Json(req)).await;
        assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_new_entries_unknown_stream() {
        let state = AppState::local();

        let result = new_entries_handler(State(state), Path("missing".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_blank_key_rejected() {
        let state = AppState::local();

        let result = set_handler(State(state), Path(" ".to_string()), set_request("v")).await;
        assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_ping_handler() {
        let state = AppState::local();

        let response = ping_handler(State(state)).await.unwrap();
        assert_eq!(response.status, "healthy");
        assert_eq!(response.reply, "pong");
    }
}
