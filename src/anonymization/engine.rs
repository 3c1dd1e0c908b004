//! Main anonymization engine
//!
//! This module provides the [`AnonymizationEngine`] that fronts the four
//! transformation families:
//! - **k-anonymity / l-diversity** grouping of personal records
//! - **Differential privacy** noise on numeric statistics
//! - **Masking** of single field values
//! - **Retention** sweeps over caller-owned timestamp stores
//!
//! The engine is stateless apart from its configuration and never writes to
//! the audit ledger; callers log around it.
//!
//! # Examples
//!
//! ```
//! use aegis::anonymization::{AnonymizationEngine, AnonymizationConfig};
//! use aegis::domain::PersonalData;
//!
//! # fn example() -> aegis::domain::Result<()> {
//! let engine = AnonymizationEngine::new(AnonymizationConfig::default())?;
//!
//! let records = vec![
//!     PersonalData::new(31, "F", "28013", "flu"),
//!     PersonalData::new(34, "F", "28044", "asthma"),
//!     PersonalData::new(39, "F", "28099", "flu"),
//! ];
//!
//! let released = engine.anonymize_with_k_anonymity(&records, 3)?;
//! assert_eq!(released.len(), 3);
//! assert_eq!(released[0].generalized_attributes["zip"], "280**");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use crate::anonymization::{
    config::AnonymizationConfig,
    kanonymity::{self, KAnonymityReport},
    masking,
    models::{DataType, MaskingPolicy},
    privacy,
    retention::{self, RetentionStore},
};
use crate::domain::{AnonymizedData, NumericData, PersonalData, Result};
use std::time::Instant;

/// Main anonymization engine
///
/// # Thread Safety
///
/// The engine holds only immutable configuration and is `Send + Sync`; share
/// it across threads by reference or `Arc`.
#[derive(Debug, Clone)]
pub struct AnonymizationEngine {
    config: AnonymizationConfig,
}

impl AnonymizationEngine {
    /// Create a new anonymization engine
    ///
    /// # Errors
    ///
    /// Returns [`AegisError::InvalidParameter`](crate::domain::AegisError::InvalidParameter)
    /// if the configured k, l, epsilon or retention period is out of range.
    pub fn new(config: AnonymizationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &AnonymizationConfig {
        &self.config
    }

    /// Group records into k-anonymous classes using the configured l-diversity
    ///
    /// Classes are suppressed whole when they have fewer than `k` members or
    /// fewer than `l` distinct sensitive values.
    pub fn anonymize_with_k_anonymity(
        &self,
        records: &[PersonalData],
        k: usize,
    ) -> Result<Vec<AnonymizedData>> {
        self.anonymize_with_diversity(records, k, self.config.l_diversity)
    }

    /// Group records with an explicit l-diversity threshold
    pub fn anonymize_with_diversity(
        &self,
        records: &[PersonalData],
        k: usize,
        l: usize,
    ) -> Result<Vec<AnonymizedData>> {
        self.anonymize_with_report(records, k, l)
            .map(|(released, _)| released)
    }

    /// Group records and return the suppression report alongside the output
    pub fn anonymize_with_report(
        &self,
        records: &[PersonalData],
        k: usize,
        l: usize,
    ) -> Result<(Vec<AnonymizedData>, KAnonymityReport)> {
        let start = Instant::now();
        let (released, report) = kanonymity::k_anonymize(records, k, l)?;

        tracing::debug!(
            k,
            l,
            input = records.len(),
            released = report.records_released,
            suppressed = report.records_suppressed,
            classes = report.classes_total,
            duration_us = start.elapsed().as_micros() as u64,
            "k-anonymity grouping completed"
        );

        Ok((released, report))
    }

    /// Add Laplace noise calibrated to `epsilon`
    pub fn apply_differential_privacy(
        &self,
        sample: &NumericData,
        epsilon: f64,
    ) -> Result<NumericData> {
        privacy::apply_differential_privacy(sample, epsilon)
    }

    /// Add Laplace noise calibrated to the configured epsilon
    pub fn apply_configured_privacy(&self, sample: &NumericData) -> Result<NumericData> {
        self.apply_differential_privacy(sample, self.config.epsilon)
    }

    /// Mask a single value
    pub fn mask_by_data_type(&self, raw: &str, policy: &MaskingPolicy) -> Result<String> {
        masking::mask_by_data_type(raw, policy)
    }

    /// Policy for `data_type` using the configured mask character and prefix
    pub fn default_policy(&self, data_type: DataType) -> MaskingPolicy {
        MaskingPolicy::new(data_type)
            .with_mask_char(self.config.masking.mask_char)
            .with_visible_prefix(self.config.masking.visible_prefix)
    }

    /// Remove entries older than `max_days` from a caller-owned store
    pub fn enforce_retention_policy(&self, store: &mut RetentionStore, max_days: u32) -> usize {
        retention::enforce_retention_policy(store, max_days)
    }

    /// Retention sweep using the configured retention period
    pub fn enforce_configured_retention(&self, store: &mut RetentionStore) -> usize {
        self.enforce_retention_policy(store, self.config.retention_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AegisError;

    #[test]
    fn test_engine_creation() {
        let engine = AnonymizationEngine::new(AnonymizationConfig::default());
        assert!(engine.is_ok());
    }

    #[test]
    fn test_engine_rejects_invalid_config() {
        let config = AnonymizationConfig {
            l_diversity: 0,
            ..Default::default()
        };
        assert!(matches!(
            AnonymizationEngine::new(config),
            Err(AegisError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_default_policy_uses_config() {
        let mut config = AnonymizationConfig::default();
        config.masking.mask_char = 'x';
        config.masking.visible_prefix = 1;
        let engine = AnonymizationEngine::new(config).unwrap();

        let policy = engine.default_policy(DataType::Email);
        assert_eq!(
            engine.mask_by_data_type("anna@mail.es", &policy).unwrap(),
            "axxx@mail.es"
        );
    }

    #[test]
    fn test_configured_l_diversity_applies() {
        let config = AnonymizationConfig {
            l_diversity: 1,
            ..Default::default()
        };
        let engine = AnonymizationEngine::new(config).unwrap();
        let records = vec![
            PersonalData::new(50, "M", "46001", "flu"),
            PersonalData::new(55, "M", "46002", "flu"),
        ];

        assert_eq!(engine.anonymize_with_k_anonymity(&records, 2).unwrap().len(), 2);
        assert!(engine
            .anonymize_with_diversity(&records, 2, 2)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_configured_privacy_preserves_label() {
        let engine = AnonymizationEngine::new(AnonymizationConfig::default()).unwrap();
        let noisy = engine
            .apply_configured_privacy(&NumericData::new("avg_age", 41.0))
            .unwrap();
        assert_eq!(noisy.label, "avg_age");
        assert!(noisy.value.is_finite());
    }
}
