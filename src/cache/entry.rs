//! Key Entry Module
//!
//! Defines the value stored for each key together with its expiry deadline.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::{CacheError, Result};

/// Lifetime given to entries stored with a zero TTL: one year.
pub const PERMANENT_TTL: Duration = Duration::from_secs(8760 * 60 * 60);

// == Key Entry ==
/// A single key/value entry with an absolute expiry time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEntry {
    /// The stored value
    pub value: String,
    /// Instant after which the entry is considered gone
    pub expires_at: DateTime<Utc>,
}

impl KeyEntry {
    // == Constructor ==
    /// Creates an entry that expires `ttl` after `now`.
    ///
    /// A zero `ttl` means "no practical expiration" and is replaced by
    /// [`PERMANENT_TTL`].
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl` - Time to live, zero for practically permanent
    /// * `now` - Current time from the owning backend's clock
    pub fn new(value: String, ttl: Duration, now: DateTime<Utc>) -> Result<Self> {
        let ttl = if ttl.is_zero() { PERMANENT_TTL } else { ttl };

        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|delta| now.checked_add_signed(delta))
            .ok_or_else(|| {
                CacheError::InvalidArgument(format!("ttl of {ttl:?} is out of range"))
            })?;

        Ok(Self { value, expires_at })
    }

    // == Is Expired ==
    /// Returns true once `now` has passed the expiry deadline.
    ///
    /// The deadline itself still counts as live.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
