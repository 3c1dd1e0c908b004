//! Configuration schema types
//!
//! Every section is optional; an empty file yields [`AegisConfig::default`].

use crate::anonymization::AnonymizationConfig;
use crate::audit::AuditConfig;
use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Main Aegis configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AegisConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Anonymization engine defaults
    #[serde(default)]
    pub anonymization: AnonymizationConfig,

    /// Audit ledger detectors and export destinations
    #[serde(default)]
    pub audit: AuditConfig,

    /// Authentication gate
    #[serde(default)]
    pub gate: GateConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AegisConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.anonymization.validate().map_err(|e| e.to_string())?;
        self.audit.validate().map_err(|e| e.to_string())?;
        self.gate.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Authentication gate configuration
///
/// Without a PIN every session is opened through the open gate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateConfig {
    /// Expected PIN, stored securely in memory and zeroized on drop
    #[serde(default)]
    pub pin: Option<SecretString>,
}

impl GateConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if let Some(pin) = &self.pin {
            if pin.expose_secret().is_empty() {
                return Err("gate.pin must not be empty when set".to_string());
            }
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    /// Console output only, no log files
    pub fn console_only() -> Self {
        Self {
            local_enabled: false,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path is required when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: AegisConfig = toml::from_str("").unwrap();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.anonymization.k, 3);
        assert_eq!(config.audit.burst_threshold, 3);
        assert!(config.gate.pin.is_none());
        assert!(config.logging.local_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_masking_section() {
        let config: AegisConfig = toml::from_str(
            r##"
[anonymization]
k = 5

[anonymization.masking]
mask_char = "#"
visible_prefix = 1
"##,
        )
        .unwrap();
        assert_eq!(config.anonymization.k, 5);
        assert_eq!(config.anonymization.l_diversity, 2);
        assert_eq!(config.anonymization.masking.mask_char, '#');
        assert_eq!(config.anonymization.masking.visible_prefix, 1);
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = AegisConfig::default();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().unwrap_err().contains("log_level"));
    }

    #[test]
    fn test_invalid_rotation() {
        let mut config = AegisConfig::default();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_pin_rejected() {
        let mut config = AegisConfig::default();
        config.gate.pin = Some(secret_string(String::new()));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_engine_parameters_validated() {
        let mut config = AegisConfig::default();
        config.anonymization.epsilon = 0.0;
        assert!(config.validate().unwrap_err().contains("epsilon"));
    }

    #[test]
    fn test_logging_section_has_no_size_limit_key() {
        // Rolling files rotate by time only; a leftover size key is ignored
        let config: AegisConfig = toml::from_str(
            "[logging]\nlocal_rotation = \"hourly\"\nlocal_max_size_mb = 50\n",
        )
        .unwrap();
        assert_eq!(config.logging.local_rotation, "hourly");

        let rendered = toml::to_string(&config.logging).unwrap();
        assert!(!rendered.contains("max_size"));
    }
}
