//! Maintenance Task
//!
//! Background task that periodically pings the cache backend.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::Cache;

/// Spawns a background task that pings `cache` every `interval`.
///
/// For the in-process backend each ping gives the sweep state machine a
/// chance to reclaim expired keys. For Redis it is a health check; failures
/// are logged and the task keeps running.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache: Arc<dyn Cache> = Arc::new(LocalCache::default());
/// let handle = spawn_maintenance_task(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_maintenance_task(cache: Arc<dyn Cache>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting maintenance task with interval of {:?}", interval);

        let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // the first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            match cache.ping().await {
                Ok(reply) => debug!("Maintenance ping: {}", reply),
                Err(e) => warn!("Maintenance ping failed: {}", e),
            }
        }
    })
}
