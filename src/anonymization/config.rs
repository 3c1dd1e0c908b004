//! Anonymization configuration

use crate::anonymization::models::MaskingPolicy;
use crate::domain::{AegisError, Result};
use serde::{Deserialize, Serialize};

/// Anonymization engine configuration
///
/// Maps to the `[anonymization]` section of the configuration file. Every
/// field is optional; defaults preserve the policy the engine has always
/// applied (l = 2, epsilon = 1.0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnonymizationConfig {
    /// Minimum equivalence class size
    #[serde(default = "default_k")]
    pub k: usize,

    /// Minimum distinct sensitive values per equivalence class
    #[serde(default = "default_l_diversity")]
    pub l_diversity: usize,

    /// Privacy budget for the Laplace mechanism
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,

    /// Days a stored record is kept before the retention sweep removes it
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,

    /// Masking defaults applied when a caller does not supply its own policy
    #[serde(default)]
    pub masking: MaskingDefaults,
}

fn default_k() -> usize {
    3
}

fn default_l_diversity() -> usize {
    2
}

fn default_epsilon() -> f64 {
    1.0
}

fn default_retention_days() -> u32 {
    30
}

impl Default for AnonymizationConfig {
    fn default() -> Self {
        Self {
            k: default_k(),
            l_diversity: default_l_diversity(),
            epsilon: default_epsilon(),
            retention_days: default_retention_days(),
            masking: MaskingDefaults::default(),
        }
    }
}

/// `[anonymization.masking]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskingDefaults {
    #[serde(default = "default_mask_char")]
    pub mask_char: char,

    #[serde(default = "default_visible_prefix")]
    pub visible_prefix: usize,
}

fn default_mask_char() -> char {
    MaskingPolicy::DEFAULT_MASK_CHAR
}

fn default_visible_prefix() -> usize {
    MaskingPolicy::DEFAULT_VISIBLE_PREFIX
}

impl Default for MaskingDefaults {
    fn default() -> Self {
        Self {
            mask_char: default_mask_char(),
            visible_prefix: default_visible_prefix(),
        }
    }
}

impl AnonymizationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.k < 1 {
            return Err(AegisError::InvalidParameter(format!(
                "anonymization.k must be >= 1, got {}",
                self.k
            )));
        }
        if self.l_diversity < 1 {
            return Err(AegisError::InvalidParameter(format!(
                "anonymization.l_diversity must be >= 1, got {}",
                self.l_diversity
            )));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(AegisError::InvalidParameter(format!(
                "anonymization.epsilon must be a finite value > 0, got {}",
                self.epsilon
            )));
        }
        if self.retention_days == 0 {
            return Err(AegisError::InvalidParameter(
                "anonymization.retention_days must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("AEGIS_ANONYMIZATION_K") {
            self.k = parse_env("AEGIS_ANONYMIZATION_K", &val)?;
        }

        if let Ok(val) = std::env::var("AEGIS_ANONYMIZATION_L_DIVERSITY") {
            self.l_diversity = parse_env("AEGIS_ANONYMIZATION_L_DIVERSITY", &val)?;
        }

        if let Ok(val) = std::env::var("AEGIS_ANONYMIZATION_EPSILON") {
            self.epsilon = parse_env("AEGIS_ANONYMIZATION_EPSILON", &val)?;
        }

        if let Ok(val) = std::env::var("AEGIS_ANONYMIZATION_RETENTION_DAYS") {
            self.retention_days = parse_env("AEGIS_ANONYMIZATION_RETENTION_DAYS", &val)?;
        }

        if let Ok(val) = std::env::var("AEGIS_ANONYMIZATION_MASK_CHAR") {
            self.masking.mask_char = parse_env("AEGIS_ANONYMIZATION_MASK_CHAR", &val)?;
        }

        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| AegisError::Configuration(format!("Invalid {name} value: {value}")))
}
