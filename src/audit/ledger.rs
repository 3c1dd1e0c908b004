//! Append-only audit ledger
//!
//! Every privacy-relevant action is recorded as an [`AccessEvent`]. Recording
//! also feeds a per-event-type [`SlidingWindow`]: the new timestamp is
//! appended once, and both detectors read the same resulting window.

use crate::audit::{
    config::AuditConfig,
    export::{self, ExportSummary, SignedLog},
    signing::LedgerSigner,
    window::{AuditAlert, SlidingWindow},
};
use crate::domain::{AccessEvent, Clock, Result, SystemClock};
use dashmap::DashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct EventLog {
    events: Vec<AccessEvent>,
    last_timestamp: i64,
}

/// Append-only event store with abuse detection and signed export
///
/// # Thread Safety
///
/// `AuditLedger` is `Send + Sync`. The event log sits behind a mutex that is
/// also held while the sliding window is updated, so log order, window
/// contents and [`purge`](Self::purge) never disagree. Share it with `Arc`.
///
/// # Examples
///
/// ```
/// use aegis::audit::{AuditConfig, AuditLedger};
///
/// let ledger = AuditLedger::new(AuditConfig::default()).unwrap();
/// ledger.record_event("AUTH", "PIN accepted");
/// assert_eq!(ledger.len(), 1);
/// assert!(ledger.access_logs()[0].contains("AUTH - PIN accepted"));
/// ```
pub struct AuditLedger {
    config: AuditConfig,
    clock: Arc<dyn Clock>,
    log: Mutex<EventLog>,
    windows: DashMap<String, SlidingWindow>,
    alerts_raised: AtomicU64,
    signer: LedgerSigner,
}

impl AuditLedger {
    /// Create a ledger reading time from the system clock
    pub fn new(config: AuditConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a ledger with an explicit time source
    pub fn with_clock(config: AuditConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            clock,
            log: Mutex::new(EventLog::default()),
            windows: DashMap::new(),
            alerts_raised: AtomicU64::new(0),
            signer: LedgerSigner::new(),
        })
    }

    /// Replace the signer, e.g. to reuse a key pair
    pub fn with_signer(mut self, signer: LedgerSigner) -> Self {
        self.signer = signer;
        self
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Append an event and evaluate both detectors
    ///
    /// Alerts are logged and returned; the event is recorded regardless.
    pub fn record_event(
        &self,
        event_type: impl Into<String>,
        details: impl Into<String>,
    ) -> Vec<AuditAlert> {
        let event_type = event_type.into();
        let mut log = self.lock_log();

        // Never let a clock step backwards reorder the ledger
        let timestamp = self.clock.now_millis().max(log.last_timestamp);
        log.last_timestamp = timestamp;
        log.events
            .push(AccessEvent::new(timestamp, event_type.clone(), details));

        let (burst_count, rate_count) = {
            let mut window = self.windows.entry(event_type.clone()).or_default();
            window.observe(timestamp, self.config.retention_horizon_ms());
            (
                window.count_since(timestamp - self.config.burst_window_ms),
                window.count_since(timestamp - self.config.rate_limit_window_ms),
            )
        };
        drop(log);

        let mut alerts = Vec::new();
        if burst_count >= self.config.burst_threshold {
            alerts.push(AuditAlert::SuspiciousBurst {
                event_type: event_type.clone(),
                count: burst_count,
                window_ms: self.config.burst_window_ms,
            });
        }
        if rate_count > self.config.rate_limit_max_events {
            alerts.push(AuditAlert::RateLimitExceeded {
                event_type: event_type.clone(),
                count: rate_count,
                limit: self.config.rate_limit_max_events,
                window_ms: self.config.rate_limit_window_ms,
            });
        }

        for alert in &alerts {
            tracing::warn!(event_type = %event_type, alert = %alert, "Audit alert");
        }
        self.alerts_raised
            .fetch_add(alerts.len() as u64, Ordering::Relaxed);

        tracing::debug!(event_type = %event_type, timestamp, "Audit event recorded");
        alerts
    }

    /// Snapshot of all events in append order
    pub fn events(&self) -> Vec<AccessEvent> {
        self.lock_log().events.clone()
    }

    /// Events rendered as `"[<time>] <TYPE> - <details>"` lines
    pub fn access_logs(&self) -> Vec<String> {
        self.lock_log()
            .events
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock_log().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Timestamps currently held in the window of `event_type`
    pub fn window_len(&self, event_type: &str) -> usize {
        self.windows.get(event_type).map_or(0, |w| w.len())
    }

    /// Alerts raised since the ledger was created
    pub fn alerts_raised(&self) -> u64 {
        self.alerts_raised.load(Ordering::Relaxed)
    }

    /// Clear the event log and all window state; returns the events removed
    ///
    /// Irreversible. The signing key pair is kept.
    pub fn purge(&self) -> usize {
        let mut log = self.lock_log();
        let removed = log.events.len();
        log.events.clear();
        self.windows.clear();
        drop(log);

        tracing::info!(removed, "Audit ledger purged");
        removed
    }

    pub fn signer(&self) -> &LedgerSigner {
        &self.signer
    }

    /// Public half of the signing key as SPKI PEM, generating the pair if needed
    pub fn public_key_pem(&self) -> Result<String> {
        self.signer.public_key_pem()
    }

    /// Write the public key PEM to `path`
    pub fn export_public_key(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let pem = self.public_key_pem()?;
        export::write_atomically(path, pem.as_bytes())?;
        tracing::info!(path = %path.display(), "Ledger public key exported");
        Ok(())
    }

    /// Sign the current ledger and write it to `destination`
    pub fn try_export_signed_log(&self, destination: impl AsRef<Path>) -> Result<ExportSummary> {
        let destination = destination.as_ref();
        let events = self.events();
        let signed = SignedLog::sign(&events, &self.signer)?;
        let document = signed.to_json()?;

        export::write_atomically(destination, document.as_bytes())?;

        tracing::info!(
            path = %destination.display(),
            events = events.len(),
            bytes = document.len(),
            "Signed audit log exported"
        );

        Ok(ExportSummary {
            path: destination.to_path_buf(),
            events: events.len(),
            bytes: document.len(),
            signature: signed.signature,
        })
    }

    /// Sign and write the ledger; `false` on any failure, without retrying
    pub fn export_signed_log(&self, destination: impl AsRef<Path>) -> bool {
        let destination = destination.as_ref();
        match self.try_export_signed_log(destination) {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    path = %destination.display(),
                    "Failed to export signed audit log"
                );
                false
            }
        }
    }

    fn lock_log(&self) -> MutexGuard<'_, EventLog> {
        // Appends are single pushes, so a poisoned log is still consistent
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for AuditLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditLedger")
            .field("config", &self.config)
            .field("events", &self.len())
            .field("alerts_raised", &self.alerts_raised())
            .field("signer_initialized", &self.signer.is_initialized())
            .finish()
    }
}
