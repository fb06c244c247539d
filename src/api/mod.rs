//! API Module
//!
//! HTTP handlers and routing that expose the cache contract.
//!
//! # Endpoints
//! - `GET /keys/:key` - Retrieve a value by key
//! - `PUT /keys/:key` - Store a value with optional TTL
//! - `DELETE /keys/:key`, `DELETE /keys` - Delete one or several keys
//! - `POST /streams/:stream` - Append an entry
//! - `GET /streams/:stream/new` - Consume new entries
//! - `GET /streams/:stream/last` - Read the most recent entries
//! - `GET /ping` - Liveness probe

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
