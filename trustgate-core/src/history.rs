//! Bounded per-account login history
//!
//! Each account carries a capped, most-recent-first log of its scored
//! attempts. The history is the only state the engine reads; it is owned by
//! the history store and mutated exactly once per scoring call, by appending
//! the new record and evicting the oldest beyond capacity.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::attempt::AttemptRecord;

/// Default number of records retained per account.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// A bounded, most-recent-first sequence of [`AttemptRecord`]s for one account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountHistory {
    records: VecDeque<AttemptRecord>,
    capacity: usize,
}

impl AccountHistory {
    /// Create an empty history retaining up to `capacity` records.
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(64)),
            capacity: capacity.max(1),
        }
    }

    /// Rebuild a history from records ordered most-recent-first, truncating
    /// to capacity.
    pub fn from_records(records: Vec<AttemptRecord>, capacity: usize) -> Self {
        let mut history = Self::new(capacity);
        history.records.extend(records);
        history.records.truncate(history.capacity);
        history
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the retention cap, truncating stored records if it shrinks.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.records.truncate(self.capacity);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recent record, if any attempt has been scored.
    pub fn latest(&self) -> Option<&AttemptRecord> {
        self.records.front()
    }

    /// Iterate over records, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &AttemptRecord> {
        self.records.iter()
    }

    /// Rolling count of consecutive low-trust attempts, as carried by the
    /// most recent record. Zero for an empty history.
    pub fn consecutive_low_trust(&self) -> u32 {
        self.latest().map_or(0, |r| r.consecutive_low_trust)
    }

    /// Append a record as the new most-recent entry, evicting the oldest
    /// record if the history is at capacity.
    pub fn push(&mut self, record: AttemptRecord) {
        self.records.push_front(record);
        self.records.truncate(self.capacity);
    }
}
