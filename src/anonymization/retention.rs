//! Retention sweep over a caller-owned key -> insertion timestamp store

use crate::domain::{Clock, SystemClock};
use std::collections::HashMap;

/// Milliseconds in one retention day
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Key -> insertion timestamp (epoch millis), owned by the caller
pub type RetentionStore = HashMap<String, i64>;

/// Remove every entry older than `max_days` relative to the system clock
///
/// Returns the number of removed entries.
pub fn enforce_retention_policy(store: &mut RetentionStore, max_days: u32) -> usize {
    enforce_retention_policy_at(store, max_days, SystemClock.now_millis())
}

/// Remove every entry with `now_millis - timestamp > max_days * 86_400_000`
///
/// An entry exactly at the threshold is retained.
///
/// ```
/// use aegis::anonymization::retention::{enforce_retention_policy_at, RetentionStore, MILLIS_PER_DAY};
///
/// let now = 100 * MILLIS_PER_DAY;
/// let mut store = RetentionStore::from([
///     ("kept".to_string(), now - MILLIS_PER_DAY),
///     ("expired".to_string(), now - MILLIS_PER_DAY - 1),
/// ]);
/// assert_eq!(enforce_retention_policy_at(&mut store, 1, now), 1);
/// assert!(store.contains_key("kept"));
/// ```
pub fn enforce_retention_policy_at(
    store: &mut RetentionStore,
    max_days: u32,
    now_millis: i64,
) -> usize {
    let threshold = i64::from(max_days) * MILLIS_PER_DAY;
    let before = store.len();

    store.retain(|_, inserted_at| now_millis.saturating_sub(*inserted_at) <= threshold);

    let removed = before - store.len();
    tracing::debug!(max_days, removed, remaining = store.len(), "Retention sweep completed");
    removed
}
