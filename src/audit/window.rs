//! Per-event-type sliding windows and the detectors evaluated against them

use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

/// Recent timestamps of one event type, oldest first
#[derive(Debug, Default, Clone)]
pub struct SlidingWindow {
    timestamps: VecDeque<i64>,
}

impl SlidingWindow {
    /// Append `now` once and drop entries older than `now - horizon_ms`
    ///
    /// Timestamps must be appended in non-decreasing order.
    pub fn observe(&mut self, now: i64, horizon_ms: i64) {
        self.timestamps.push_back(now);
        let cutoff = now.saturating_sub(horizon_ms);
        while self.timestamps.front().is_some_and(|&t| t < cutoff) {
            self.timestamps.pop_front();
        }
    }

    /// Entries with a timestamp `>= lower_bound`
    pub fn count_since(&self, lower_bound: i64) -> usize {
        self.timestamps
            .iter()
            .rev()
            .take_while(|&&t| t >= lower_bound)
            .count()
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Observational alert raised by a detector; never blocks the event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditAlert {
    /// Too many same-type events inside the burst window
    SuspiciousBurst {
        event_type: String,
        count: usize,
        window_ms: i64,
    },

    /// More same-type events than allowed inside the rate-limit window
    RateLimitExceeded {
        event_type: String,
        count: usize,
        limit: usize,
        window_ms: i64,
    },
}

impl AuditAlert {
    pub fn event_type(&self) -> &str {
        match self {
            Self::SuspiciousBurst { event_type, .. } => event_type,
            Self::RateLimitExceeded { event_type, .. } => event_type,
        }
    }

    pub fn is_suspicious_burst(&self) -> bool {
        matches!(self, Self::SuspiciousBurst { .. })
    }

    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::RateLimitExceeded { .. })
    }
}

impl fmt::Display for AuditAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SuspiciousBurst {
                event_type,
                count,
                window_ms,
            } => write!(
                f,
                "Suspicious access: {count} {event_type} events within {window_ms} ms"
            ),
            Self::RateLimitExceeded {
                event_type,
                count,
                limit,
                window_ms,
            } => write!(
                f,
                "Rate limit exceeded: {count} {event_type} events within {window_ms} ms (limit {limit})"
            ),
        }
    }
}
