//! Caller record storage subject to retention

use crate::anonymization::retention::{self, RetentionStore};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Keyed record storage that tracks when each record was stored
///
/// Implementations must be safe to share across threads.
pub trait RecordStore: Send + Sync {
    /// Insert or replace `key`, stamping it with `stored_at` (epoch millis)
    fn put(&self, key: &str, payload: String, stored_at: i64);

    fn get(&self, key: &str) -> Option<String>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of key -> insertion timestamp
    fn timestamps(&self) -> RetentionStore;

    /// Drop every record older than `max_days` at `now_millis`; returns the count
    fn enforce_retention(&self, max_days: u32, now_millis: i64) -> usize;

    /// Remove everything; returns the count
    fn purge(&self) -> usize;
}

#[derive(Debug, Default)]
struct Entries {
    payloads: HashMap<String, String>,
    stored_at: RetentionStore,
}

/// In-memory [`RecordStore`]
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    entries: Mutex<Entries>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a key -> timestamp map with empty payloads
    pub fn from_timestamps(timestamps: RetentionStore) -> Self {
        let payloads = timestamps
            .keys()
            .map(|key| (key.clone(), String::new()))
            .collect();
        Self {
            entries: Mutex::new(Entries {
                payloads,
                stored_at: timestamps,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RecordStore for MemoryRecordStore {
    fn put(&self, key: &str, payload: String, stored_at: i64) {
        let mut entries = self.lock();
        entries.payloads.insert(key.to_string(), payload);
        entries.stored_at.insert(key.to_string(), stored_at);
    }

    fn get(&self, key: &str) -> Option<String> {
        self.lock().payloads.get(key).cloned()
    }

    fn len(&self) -> usize {
        self.lock().payloads.len()
    }

    fn timestamps(&self) -> RetentionStore {
        self.lock().stored_at.clone()
    }

    fn enforce_retention(&self, max_days: u32, now_millis: i64) -> usize {
        let mut entries = self.lock();
        let Entries {
            payloads,
            stored_at,
        } = &mut *entries;

        let removed = retention::enforce_retention_policy_at(stored_at, max_days, now_millis);
        payloads.retain(|key, _| stored_at.contains_key(key));
        removed
    }

    fn purge(&self) -> usize {
        let mut entries = self.lock();
        let removed = entries.payloads.len();
        entries.payloads.clear();
        entries.stored_at.clear();
        removed
    }
}
