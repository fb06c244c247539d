//! API Routes
//!
//! Configures the Axum router with all cache service endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    append_handler, delete_handler, delete_many_handler, get_handler, last_n_handler,
    new_entries_handler, ping_handler, set_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET/PUT/DELETE /keys/:key` - Get, set or delete one key
/// - `DELETE /keys` - Delete several keys
/// - `POST /streams/:stream` - Append to a stream
/// - `GET /streams/:stream/new` - Consume entries added since the last read
/// - `GET /streams/:stream/last?n=` - Most recent entries, oldest first
/// - `GET /ping` - Backend liveness probe
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/keys/:key",
            get(get_handler).put(set_handler).delete(delete_handler),
        )
        .route("/keys", axum::routing::delete(delete_many_handler))
        .route("/streams/:stream", post(append_handler))
        .route("/streams/:stream/new", get(new_entries_handler))
        .route("/streams/:stream/last", get(last_n_handler))
        .route("/ping", get(ping_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
