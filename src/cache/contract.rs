//! Cache Contract
//!
//! The operation set every backend implements. Callers hold an
//! `Arc<dyn Cache>` and never see backend-specific types.

use std::cmp::Ordering;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

// == Stream ID ==
/// Backend-assigned identifier of a stream entry.
///
/// IDs are unique and increase in append order within a stream. They are
/// ordered by value, not as strings: a local `"z"` sorts before `"10"`, and a
/// Redis `"999-0"` before `"1000-0"`. Compare them or hand them back; never
/// parse them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamId(String);

impl StreamId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for StreamId {
    /// Compares `-`-separated segments pairwise, shorter segment first, then
    /// byte by byte. Counters carry no leading zeros, so this is numeric order
    /// for both base-36 and `ms-seq` IDs.
    fn cmp(&self, other: &Self) -> Ordering {
        let mut ours = self.0.split('-');
        let mut theirs = other.0.split('-');
        loop {
            match (ours.next(), theirs.next()) {
                (Some(a), Some(b)) => {
                    let by_segment = a.len().cmp(&b.len()).then_with(|| a.cmp(b));
                    if by_segment != Ordering::Equal {
                        return by_segment;
                    }
                }
                (Some(_), None) => return Ordering::Greater,
                (None, Some(_)) => return Ordering::Less,
                (None, None) => return Ordering::Equal,
            }
        }
    }
}

impl PartialOrd for StreamId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for StreamId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for StreamId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl PartialEq<str> for StreamId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for StreamId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// == Stream Entry ==
/// One entry of a stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamEntry {
    pub id: StreamId,
    pub value: String,
}

impl StreamEntry {
    pub fn new(id: impl Into<StreamId>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Key/value storage with expiry plus bounded, ordered, append-only streams.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Returns the value for `key`, or `NotFound` if it was never set or has expired.
    async fn get(&self, key: &str) -> Result<String>;

    /// Stores `value` under `key`, replacing any previous value and expiry.
    /// A zero `ttl` means no practical expiration.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Removes every listed key. Absent keys are ignored.
    async fn del(&self, keys: &[&str]) -> Result<()>;

    /// Appends `value` to `stream`, creating the stream if needed, and keeps
    /// at most `maxlen` most recent entries. Returns the new entry's ID.
    async fn xadd(&self, stream: &str, value: &str, maxlen: u64) -> Result<StreamId>;

    /// Returns, oldest first, every entry appended since the last read.
    ///
    /// Consuming: entries returned here are not returned again by this call.
    /// With several concurrent readers of one stream the entries are split
    /// between them in no particular order.
    async fn xget_new(&self, stream: &str) -> Result<Vec<StreamEntry>>;

    /// Returns up to `count` most recent entries, oldest first.
    ///
    /// Fails with `NotFound` for an unknown stream and `EmptyStream` when
    /// the stream has nothing to return.
    async fn xget_last_n(&self, stream: &str, count: usize) -> Result<Vec<StreamEntry>>;

    /// Liveness probe. Backends may use it to run deferred maintenance.
    async fn ping(&self) -> Result<String>;
}
