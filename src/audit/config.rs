//! Audit ledger configuration

use crate::domain::{AegisError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Audit ledger configuration (`[audit]` section)
///
/// Defaults flag 3 same-type events inside 3 seconds as suspicious and more
/// than 5 same-type events inside a minute as rate limited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Trailing window of the suspicious-burst detector
    #[serde(default = "default_burst_window_ms")]
    pub burst_window_ms: i64,

    /// Events inside the burst window that raise an alert (inclusive)
    #[serde(default = "default_burst_threshold")]
    pub burst_threshold: usize,

    /// Trailing window of the rate-limit detector
    #[serde(default = "default_rate_limit_window_ms")]
    pub rate_limit_window_ms: i64,

    /// Events tolerated inside the rate-limit window; one more raises an alert
    #[serde(default = "default_rate_limit_max_events")]
    pub rate_limit_max_events: usize,

    /// Default destination of the signed export
    #[serde(default = "default_export_path")]
    pub export_path: PathBuf,

    /// Default destination of the ledger public key (PEM)
    #[serde(default = "default_public_key_path")]
    pub public_key_path: PathBuf,
}

fn default_burst_window_ms() -> i64 {
    3_000
}

fn default_burst_threshold() -> usize {
    3
}

fn default_rate_limit_window_ms() -> i64 {
    60_000
}

fn default_rate_limit_max_events() -> usize {
    5
}

fn default_export_path() -> PathBuf {
    PathBuf::from("./audit/signed_log.json")
}

fn default_public_key_path() -> PathBuf {
    PathBuf::from("./audit/ledger_public.pem")
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            burst_window_ms: default_burst_window_ms(),
            burst_threshold: default_burst_threshold(),
            rate_limit_window_ms: default_rate_limit_window_ms(),
            rate_limit_max_events: default_rate_limit_max_events(),
            export_path: default_export_path(),
            public_key_path: default_public_key_path(),
        }
    }
}

impl AuditConfig {
    /// Longest detector window; older window entries are pruned
    pub fn retention_horizon_ms(&self) -> i64 {
        self.burst_window_ms.max(self.rate_limit_window_ms)
    }

    /// Validate audit configuration
    pub fn validate(&self) -> Result<()> {
        if self.burst_window_ms <= 0 || self.rate_limit_window_ms <= 0 {
            return Err(AegisError::InvalidParameter(
                "audit detector windows must be > 0 ms".to_string(),
            ));
        }
        if self.burst_threshold == 0 {
            return Err(AegisError::InvalidParameter(
                "audit.burst_threshold must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("AEGIS_AUDIT_BURST_WINDOW_MS") {
            self.burst_window_ms = parse_env("AEGIS_AUDIT_BURST_WINDOW_MS", &val)?;
        }

        if let Ok(val) = std::env::var("AEGIS_AUDIT_BURST_THRESHOLD") {
            self.burst_threshold = parse_env("AEGIS_AUDIT_BURST_THRESHOLD", &val)?;
        }

        if let Ok(val) = std::env::var("AEGIS_AUDIT_RATE_LIMIT_WINDOW_MS") {
            self.rate_limit_window_ms = parse_env("AEGIS_AUDIT_RATE_LIMIT_WINDOW_MS", &val)?;
        }

        if let Ok(val) = std::env::var("AEGIS_AUDIT_RATE_LIMIT_MAX_EVENTS") {
            self.rate_limit_max_events = parse_env("AEGIS_AUDIT_RATE_LIMIT_MAX_EVENTS", &val)?;
        }

        if let Ok(val) = std::env::var("AEGIS_AUDIT_EXPORT_PATH") {
            self.export_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("AEGIS_AUDIT_PUBLIC_KEY_PATH") {
            self.public_key_path = PathBuf::from(val);
        }

        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| AegisError::Configuration(format!("Invalid {name} value: {value}")))
}
