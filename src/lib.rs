//! Stream Cache - pluggable key/value and stream cache
//!
//! One contract for key/value storage with expiry and for bounded, ordered,
//! append-only streams, served by an in-process backend or by Redis.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{Cache, LocalCache, RedisCache, StreamEntry, StreamId};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_maintenance_task;
