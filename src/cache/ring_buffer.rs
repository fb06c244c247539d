//! Ring Buffer Module
//!
//! Fixed-capacity circular buffer that overwrites its oldest entry when full.

use std::mem::size_of;

use crate::error::{CacheError, Result};

// == Ring Buffer ==
/// Fixed-capacity circular container.
///
/// Holds the last `min(pushes, capacity)` items in insertion order. `pop` and
/// `peek` operate on the most recently pushed item still present.
///
/// Not synchronized: callers sharing a buffer across threads must serialize
/// `push`/`pop` themselves.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    /// Backing storage, grown on demand up to `capacity` slots
    slots: Vec<Option<T>>,
    /// Configured bound on the number of live items
    capacity: usize,
    /// Index of the slot the next push writes to
    back: usize,
    /// Number of live items
    len: usize,
}

/// Slots reserved up front; storage beyond this is allocated as items arrive.
const INITIAL_SLOTS: usize = 16;

impl<T> RingBuffer<T> {
    // == Constructor ==
    /// Creates a ring buffer holding at most `capacity` items.
    ///
    /// Storage grows with the number of items pushed, so a large `capacity`
    /// costs nothing until it is used. A zero capacity is rejected with
    /// `InvalidArgument`.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidArgument(
                "ring buffer capacity must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            slots: Vec::with_capacity(capacity.min(INITIAL_SLOTS)),
            capacity,
            back: 0,
            len: 0,
        })
    }

    // == Push ==
    /// Appends an item, overwriting the oldest one when the buffer is full.
    pub fn push(&mut self, item: T) {
        if self.back < self.slots.len() {
            self.slots[self.back] = Some(item);
        } else {
            self.grow();
            self.slots.push(Some(item));
        }

        self.back = (self.back + 1) % self.capacity;
        if self.len < self.capacity {
            self.len += 1;
        }
    }

    /// Doubles the backing storage without going past `capacity`.
    fn grow(&mut self) {
        let allocated = self.slots.capacity();
        if self.slots.len() < allocated {
            return;
        }
        let extra = allocated.min(self.capacity.saturating_sub(allocated)).max(1);
        self.slots.reserve_exact(extra);
    }

    // == Pop ==
    /// Removes and returns the most recently pushed item, or `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.back = (self.back + self.capacity - 1) % self.capacity;
        self.len -= 1;
        self.slots.get_mut(self.back).and_then(Option::take)
    }

    // == Peek ==
    /// Returns the item `pop` would return, without removing it.
    pub fn peek(&self) -> Option<&T> {
        if self.len == 0 {
            return None;
        }

        let newest = (self.back + self.capacity - 1) % self.capacity;
        self.slots.get(newest).and_then(Option::as_ref)
    }

    /// Iterates live items from oldest to newest without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let capacity = self.capacity;
        let start = self.back + capacity - self.len;
        (0..self.len).filter_map(move |offset| {
            self.slots
                .get((start + offset) % capacity)
                .and_then(Option::as_ref)
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Estimated size in bytes of the buffer and the storage allocated so far.
    ///
    /// Heap data owned by the items themselves is not counted.
    pub fn mem_usage(&self) -> usize {
        size_of::<Self>() + size_of::<Option<T>>() * self.slots.capacity()
    }
}
