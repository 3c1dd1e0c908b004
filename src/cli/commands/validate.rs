//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Aegis configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading validates; overrides from AEGIS_* are included
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let anonymization = &config.anonymization;
        let audit = &config.audit;

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  k-anonymity: k={}, l={}",
            anonymization.k, anonymization.l_diversity
        );
        println!("  Epsilon: {}", anonymization.epsilon);
        println!("  Retention: {} days", anonymization.retention_days);
        println!(
            "  Masking: '{}' (visible prefix {})",
            anonymization.masking.mask_char, anonymization.masking.visible_prefix
        );
        println!(
            "  Burst Detector: >= {} events in {} ms",
            audit.burst_threshold, audit.burst_window_ms
        );
        println!(
            "  Rate Limit: > {} events in {} ms",
            audit.rate_limit_max_events, audit.rate_limit_window_ms
        );
        println!("  Export Path: {}", audit.export_path.display());
        println!("  Public Key Path: {}", audit.public_key_path.display());
        println!(
            "  Gate: {}",
            if config.gate.pin.is_some() {
                "PIN"
            } else {
                "open (no PIN configured)"
            }
        );
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                config.logging.local_path.as_str()
            } else {
                "disabled"
            }
        );
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_configuration_error() {
        let args = ValidateArgs {};
        assert_eq!(args.execute("does-not-exist.toml").unwrap(), 2);
    }
}
