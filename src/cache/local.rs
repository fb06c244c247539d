//! In-Process Backend
//!
//! Concurrent key/value store with lazy expiry and per-stream ring buffers.
//!
//! Expired keys are hidden from `get` immediately but are only physically
//! removed by the maintenance sweep, which runs from `ping` once the sweep
//! interval has elapsed. Nothing here survives a process restart.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::cache::{
    check_count, check_maxlen, Cache, Clock, KeyEntry, RingBuffer, StreamEntry, StreamId,
    SystemClock,
};
use crate::error::{CacheError, Result};

/// Default time between maintenance sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

const PONG: &str = "pong";

// == Maintenance State ==
/// Phase of the sweep-and-clean cycle driven by `ping`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MaintenanceState {
    Idle = 0,
    /// Scanning keys for expired entries
    Sweeping = 1,
    /// Removing the keys found by the last sweep
    Cleaning = 2,
}

impl MaintenanceState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => MaintenanceState::Sweeping,
            2 => MaintenanceState::Cleaning,
            _ => MaintenanceState::Idle,
        }
    }
}

// == Stream ==
/// A named stream: its buffered entries and the next ID to hand out.
#[derive(Debug)]
struct Stream {
    next_id: u64,
    buffer: RingBuffer<StreamEntry>,
}

impl Stream {
    fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            next_id: 0,
            buffer: RingBuffer::new(capacity)?,
        })
    }

    fn append(&mut self, value: &str) -> StreamId {
        let id = StreamId::new(encode_base36(self.next_id));
        self.buffer.push(StreamEntry::new(id.clone(), value));
        self.next_id += 1;
        id
    }

    /// Pops up to `count` newest entries and returns them oldest first.
    fn take_newest(&mut self, count: usize) -> Vec<StreamEntry> {
        let count = count.min(self.buffer.len());
        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            if let Some(entry) = self.buffer.pop() {
                entries.push(entry);
            }
        }
        entries.reverse();
        entries
    }
}

// == Local Cache ==
/// In-process implementation of [`Cache`].
#[derive(Debug)]
pub struct LocalCache {
    /// Key/value storage, sharded so unrelated keys do not contend
    store: DashMap<String, KeyEntry>,
    /// Named streams; each stream serializes its own appends and drains
    streams: DashMap<String, Arc<Mutex<Stream>>>,
    /// Keys found expired by the last sweep, awaiting removal
    expired: Mutex<Vec<String>>,
    state: AtomicU8,
    next_sweep_at: Mutex<DateTime<Utc>>,
    sweep_interval: Duration,
    clock: Arc<dyn Clock>,
}

impl LocalCache {
    // == Constructor ==
    /// Creates an empty cache sweeping every `sweep_interval`.
    pub fn new(sweep_interval: Duration) -> Self {
        Self::with_clock(sweep_interval, Arc::new(SystemClock))
    }

    /// Creates an empty cache reading time from `clock`.
    pub fn with_clock(sweep_interval: Duration, clock: Arc<dyn Clock>) -> Self {
        let next_sweep_at = schedule(clock.now(), sweep_interval);

        Self {
            store: DashMap::new(),
            streams: DashMap::new(),
            expired: Mutex::new(Vec::new()),
            state: AtomicU8::new(MaintenanceState::Idle as u8),
            next_sweep_at: Mutex::new(next_sweep_at),
            sweep_interval,
            clock,
        }
    }

    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }

    pub fn maintenance_state(&self) -> MaintenanceState {
        MaintenanceState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Number of keys physically held, expired-but-unswept ones included.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Number of streams created so far.
    pub fn stream_count(&self) -> usize {
        self.streams.len()
    }

    /// Runs a sweep-and-clean pass if the sweep interval has elapsed.
    ///
    /// Returns the number of keys reclaimed. A pass already in progress on
    /// another thread makes this a no-op.
    pub fn run_maintenance(&self) -> usize {
        let now = self.clock.now();
        if now <= *self.next_sweep_at.lock() {
            return 0;
        }

        if self
            .state
            .compare_exchange(
                MaintenanceState::Idle as u8,
                MaintenanceState::Sweeping as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            return 0;
        }

        // another pass may have finished between the check and the swap
        if now <= *self.next_sweep_at.lock() {
            self.state.store(MaintenanceState::Idle as u8, Ordering::Release);
            return 0;
        }

        self.sweep(now);
        self.state
            .store(MaintenanceState::Cleaning as u8, Ordering::Release);
        let removed = self.clean(now);

        *self.next_sweep_at.lock() = schedule(self.clock.now(), self.sweep_interval);
        self.state.store(MaintenanceState::Idle as u8, Ordering::Release);

        removed
    }

    /// Collects expired keys into the pending list without touching the store.
    fn sweep(&self, now: DateTime<Utc>) {
        let candidates: Vec<String> = self
            .store
            .iter()
            .filter(|entry| entry.value().is_expired_at(now))
            .map(|entry| entry.key().clone())
            .collect();

        debug!("Sweep found {} expired keys", candidates.len());
        self.expired.lock().extend(candidates);
    }

    /// Removes swept keys one at a time and clears the pending list.
    ///
    /// A key re-set after the sweep is left alone. The pending list keeps its
    /// allocation.
    fn clean(&self, now: DateTime<Utc>) -> usize {
        let mut expired = self.expired.lock();

        let removed = expired
            .iter()
            .filter(|key| {
                self.store
                    .remove_if(key.as_str(), |_, entry| entry.is_expired_at(now))
                    .is_some()
            })
            .count();

        expired.clear();
        removed
    }

    fn stream(&self, name: &str) -> Result<Arc<Mutex<Stream>>> {
        self.streams
            .get(name)
            .map(|stream| Arc::clone(stream.value()))
            .ok_or_else(|| CacheError::NotFound(format!("stream {name}")))
    }
}

impl Default for LocalCache {
    fn default() -> Self {
        Self::new(DEFAULT_SWEEP_INTERVAL)
    }
}

#[async_trait]
impl Cache for LocalCache {
    async fn get(&self, key: &str) -> Result<String> {
        let now = self.clock.now();
        match self.store.get(key) {
            Some(entry) if !entry.is_expired_at(now) => Ok(entry.value.clone()),
            _ => Err(CacheError::NotFound(format!("key {key}"))),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let entry = KeyEntry::new(value.to_string(), ttl, self.clock.now())?;
        self.store.insert(key.to_string(), entry);
        Ok(())
    }

    async fn del(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.store.remove(*key);
        }
        Ok(())
    }

    async fn xadd(&self, stream: &str, value: &str, maxlen: u64) -> Result<StreamId> {
        check_maxlen(stream, maxlen)?;

        let handle = match self.streams.entry(stream.to_string()) {
            Entry::Occupied(occupied) => Arc::clone(occupied.get()),
            Entry::Vacant(vacant) => {
                let created = Arc::new(Mutex::new(Stream::new(maxlen as usize)?));
                debug!("Created stream {} with capacity {}", stream, maxlen);
                Arc::clone(vacant.insert(created).value())
            }
        };

        let id = handle.lock().append(value);
        Ok(id)
    }

    async fn xget_new(&self, stream: &str) -> Result<Vec<StreamEntry>> {
        let handle = self.stream(stream)?;
        let mut guard = handle.lock();
        let len = guard.buffer.len();
        Ok(guard.take_newest(len))
    }

    async fn xget_last_n(&self, stream: &str, count: usize) -> Result<Vec<StreamEntry>> {
        check_count(stream, count)?;
        let handle = self.stream(stream)?;
        let mut guard = handle.lock();
        if guard.buffer.is_empty() {
            return Err(CacheError::EmptyStream(format!("stream {stream}")));
        }
        Ok(guard.take_newest(count))
    }

    async fn ping(&self) -> Result<String> {
        let removed = self.run_maintenance();
        if removed > 0 {
            info!("Maintenance sweep reclaimed {} expired keys", removed);
        }
        Ok(PONG.to_string())
    }
}

fn schedule(now: DateTime<Utc>, interval: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(interval)
        .ok()
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Encodes `n` in lowercase base 36.
fn encode_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if n == 0 {
        return "0".to_string();
    }

    let mut buf = Vec::with_capacity(13);
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    buf.into_iter().map(char::from).collect()
}
