//! Authenticated facade over the anonymization engine and the audit ledger

use crate::anonymization::{
    AnonymizationConfig, AnonymizationEngine, DataType, KAnonymityReport, MaskingPolicy,
};
use crate::audit::{AuditAlert, AuditConfig, AuditLedger, ExportSummary, SIGNATURE_ALGORITHM};
use crate::config::AegisConfig;
use crate::domain::{
    AegisError, AnonymizedData, Clock, NumericData, PersonalData, Result, SystemClock,
};
use crate::protection::gate::{AuthOutcome, AuthenticationGate};
use crate::protection::store::{MemoryRecordStore, RecordStore};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Audit event types written by the facade
pub mod event_types {
    pub const AUTH: &str = "AUTH";
    pub const AUTH_FAILURE: &str = "AUTH_FAILURE";
    pub const DATA_ACCESS: &str = "DATA_ACCESS";
    pub const DATA_PROTECTION: &str = "DATA_PROTECTION";
    pub const ANONYMIZATION: &str = "ANONYMIZATION";
    pub const MASKING: &str = "MASKING";
    pub const DIFFERENTIAL_PRIVACY: &str = "DIFFERENTIAL_PRIVACY";
    pub const DATA_STORE: &str = "DATA_STORE";
    pub const RETENTION: &str = "RETENTION";
}

/// Records released for display together with the suppression report
#[derive(Debug, Clone, Serialize)]
pub struct AnonymizedView {
    pub records: Vec<AnonymizedData>,
    pub report: KAnonymityReport,
}

/// What [`ProtectedSession::clear_all_data`] removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClearSummary {
    pub events_removed: usize,
    pub records_removed: usize,
}

/// Owns the engine, the ledger and the record store
///
/// Nothing is reachable without first passing an [`AuthenticationGate`]
/// through [`unlock`](Self::unlock).
pub struct DataProtectionManager {
    engine: AnonymizationEngine,
    ledger: Arc<AuditLedger>,
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
}

impl DataProtectionManager {
    pub fn new(anonymization: AnonymizationConfig, audit: AuditConfig) -> Result<Self> {
        Self::with_clock(anonymization, audit, Arc::new(SystemClock))
    }

    /// Build a manager whose ledger and store share `clock`
    pub fn with_clock(
        anonymization: AnonymizationConfig,
        audit: AuditConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let engine = AnonymizationEngine::new(anonymization)?;
        let ledger = Arc::new(AuditLedger::with_clock(audit, clock.clone())?);
        Ok(Self::with_parts(
            engine,
            ledger,
            Arc::new(MemoryRecordStore::new()),
            clock,
        ))
    }

    pub fn from_config(config: &AegisConfig) -> Result<Self> {
        Self::new(config.anonymization.clone(), config.audit.clone())
    }

    pub fn with_parts(
        engine: AnonymizationEngine,
        ledger: Arc<AuditLedger>,
        store: Arc<dyn RecordStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            engine,
            ledger,
            store,
            clock,
        }
    }

    /// Replace the record store
    pub fn with_store(mut self, store: Arc<dyn RecordStore>) -> Self {
        self.store = store;
        self
    }

    pub fn engine(&self) -> &AnonymizationEngine {
        &self.engine
    }

    pub fn ledger(&self) -> &Arc<AuditLedger> {
        &self.ledger
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Authenticate through `gate` and open a session
    ///
    /// # Errors
    ///
    /// [`AegisError::Authentication`] when the gate denies access. The denial
    /// is recorded as an `AUTH_FAILURE` event first.
    pub fn unlock(&self, gate: &dyn AuthenticationGate) -> Result<ProtectedSession<'_>> {
        match gate.authenticate() {
            AuthOutcome::Granted => {
                self.ledger.record_event(
                    event_types::AUTH,
                    format!("Access granted via {} gate", gate.name()),
                );
                tracing::info!(gate = gate.name(), "Protected session opened");
                Ok(ProtectedSession { manager: self })
            }
            AuthOutcome::Denied { reason } => {
                self.ledger.record_event(
                    event_types::AUTH_FAILURE,
                    format!("Access denied via {} gate: {reason}", gate.name()),
                );
                tracing::warn!(gate = gate.name(), reason = %reason, "Authentication denied");
                Err(AegisError::Authentication(reason))
            }
        }
    }
}

impl std::fmt::Debug for DataProtectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataProtectionManager")
            .field("engine", &self.engine)
            .field("ledger", &self.ledger)
            .field("records", &self.store.len())
            .finish()
    }
}

/// Operations available after authentication
///
/// Every operation writes its own audit event; the raw values passed in are
/// never copied into event details.
#[derive(Debug)]
pub struct ProtectedSession<'a> {
    manager: &'a DataProtectionManager,
}

impl ProtectedSession<'_> {
    fn ledger(&self) -> &AuditLedger {
        &self.manager.ledger
    }

    fn engine(&self) -> &AnonymizationEngine {
        &self.manager.engine
    }

    /// Record a caller-defined event
    pub fn record_event(
        &self,
        event_type: impl Into<String>,
        details: impl Into<String>,
    ) -> Vec<AuditAlert> {
        self.ledger().record_event(event_type, details)
    }

    /// Rendered ledger lines; the read itself is logged afterwards
    pub fn access_logs(&self) -> Vec<String> {
        let logs = self.ledger().access_logs();
        self.ledger().record_event(
            event_types::DATA_ACCESS,
            format!("Access logs viewed ({} entries)", logs.len()),
        );
        logs
    }

    /// Active protections as label -> description
    pub fn data_protection_info(&self) -> BTreeMap<String, String> {
        let anonymization = self.engine().config();
        let audit = self.ledger().config();

        let info = BTreeMap::from([
            (
                "k_anonymity".to_string(),
                format!("k={}, l={}", anonymization.k, anonymization.l_diversity),
            ),
            (
                "differential_privacy".to_string(),
                format!("Laplace mechanism, epsilon={}", anonymization.epsilon),
            ),
            (
                "masking".to_string(),
                format!(
                    "EMAIL, PHONE, NAME, DNI (mask '{}', prefix {})",
                    anonymization.masking.mask_char, anonymization.masking.visible_prefix
                ),
            ),
            (
                "retention".to_string(),
                format!("{} days", anonymization.retention_days),
            ),
            (
                "audit_detectors".to_string(),
                format!(
                    "burst >= {} in {} ms, rate > {} in {} ms",
                    audit.burst_threshold,
                    audit.burst_window_ms,
                    audit.rate_limit_max_events,
                    audit.rate_limit_window_ms
                ),
            ),
            (
                "audit_signature".to_string(),
                SIGNATURE_ALGORITHM.to_string(),
            ),
            (
                "records_stored".to_string(),
                self.manager.store.len().to_string(),
            ),
        ]);

        self.ledger().record_event(
            event_types::DATA_PROTECTION,
            "Data protection summary viewed",
        );
        info
    }

    /// k-anonymize `records` for display
    pub fn anonymize_for_display(
        &self,
        records: &[PersonalData],
        k: usize,
        l: usize,
    ) -> Result<AnonymizedView> {
        match self.engine().anonymize_with_report(records, k, l) {
            Ok((released, report)) => {
                self.ledger().record_event(
                    event_types::ANONYMIZATION,
                    format!(
                        "k={k} l={l}: {} of {} records released in {} groups",
                        report.records_released,
                        records.len(),
                        report.classes_released
                    ),
                );
                Ok(AnonymizedView {
                    records: released,
                    report,
                })
            }
            Err(e) => {
                self.ledger().record_event(
                    event_types::ANONYMIZATION,
                    format!("k={k} l={l}: rejected ({e})"),
                );
                Err(e)
            }
        }
    }

    /// Policy for `data_type` with the configured mask character and prefix
    pub fn default_policy(&self, data_type: DataType) -> MaskingPolicy {
        self.engine().default_policy(data_type)
    }

    /// Mask one value
    pub fn mask_field(&self, raw: &str, policy: &MaskingPolicy) -> Result<String> {
        let result = self.engine().mask_by_data_type(raw, policy);
        let outcome = if result.is_ok() { "masked" } else { "rejected" };
        self.ledger().record_event(
            event_types::MASKING,
            format!("{} value {outcome}", policy.data_type),
        );
        result
    }

    /// Noisy copy of `sample`; `None` uses the configured epsilon
    pub fn noisy_statistic(&self, sample: &NumericData, epsilon: Option<f64>) -> Result<NumericData> {
        let epsilon = epsilon.unwrap_or(self.engine().config().epsilon);
        let noisy = self.engine().apply_differential_privacy(sample, epsilon)?;
        self.ledger().record_event(
            event_types::DIFFERENTIAL_PRIVACY,
            format!("Noise applied to '{}' with epsilon={epsilon}", sample.label),
        );
        Ok(noisy)
    }

    /// Store a record stamped with the current time
    pub fn store_record(&self, key: &str, payload: impl Into<String>) {
        let now = self.manager.clock.now_millis();
        self.manager.store.put(key, payload.into(), now);
        self.ledger()
            .record_event(event_types::DATA_STORE, format!("Record '{key}' stored"));
    }

    /// Sweep the record store; `None` uses the configured retention period
    pub fn enforce_retention(&self, max_days: Option<u32>) -> usize {
        let max_days = max_days.unwrap_or(self.engine().config().retention_days);
        let now = self.manager.clock.now_millis();
        let removed = self.manager.store.enforce_retention(max_days, now);
        self.ledger().record_event(
            event_types::RETENTION,
            format!("{removed} records older than {max_days} days removed"),
        );
        removed
    }

    pub fn export_signed_log(&self, destination: impl AsRef<Path>) -> bool {
        self.ledger().export_signed_log(destination)
    }

    pub fn try_export_signed_log(&self, destination: impl AsRef<Path>) -> Result<ExportSummary> {
        self.ledger().try_export_signed_log(destination)
    }

    pub fn export_public_key(&self, path: impl AsRef<Path>) -> Result<()> {
        self.ledger().export_public_key(path)
    }

    /// Purge the ledger and the record store
    ///
    /// Nothing is recorded afterwards, so the ledger reads back empty.
    pub fn clear_all_data(&self) -> ClearSummary {
        let records_removed = self.manager.store.purge();
        let events_removed = self.ledger().purge();
        tracing::info!(events_removed, records_removed, "All protected data cleared");
        ClearSummary {
            events_removed,
            records_removed,
        }
    }
}
