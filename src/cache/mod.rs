//! Cache Module
//!
//! Key/value storage with expiry and bounded streams behind one contract,
//! with an in-process backend and a Redis backend.

mod clock;
mod contract;
mod entry;
mod local;
mod remote;
mod ring_buffer;
mod select;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use contract::{Cache, StreamEntry, StreamId};
pub use entry::{KeyEntry, PERMANENT_TTL};
pub use local::{LocalCache, MaintenanceState, DEFAULT_SWEEP_INTERVAL};
pub use remote::{RedisCache, STREAM_FIELD};
pub use ring_buffer::RingBuffer;
pub use select::{connect, BackendKind};

use crate::error::{CacheError, Result};

// == Public Constants ==
/// Largest `maxlen` a stream accepts.
pub const MAX_STREAM_LEN: u64 = i32::MAX as u64;

pub(crate) fn check_maxlen(stream: &str, maxlen: u64) -> Result<()> {
    if maxlen == 0 || maxlen > MAX_STREAM_LEN {
        return Err(CacheError::InvalidArgument(format!(
            "maxlen for stream {stream} must be between 1 and {MAX_STREAM_LEN}, got {maxlen}"
        )));
    }
    Ok(())
}

pub(crate) fn check_count(stream: &str, count: usize) -> Result<()> {
    if count == 0 {
        return Err(CacheError::InvalidArgument(format!(
            "count for stream {stream} must be greater than 0"
        )));
    }
    Ok(())
}
