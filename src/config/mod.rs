//! Configuration management for Aegis.
//!
//! # Overview
//!
//! Aegis uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every setting (an empty file is valid)
//! - `AEGIS_<SECTION>_<KEY>` environment overrides
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use aegis::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("aegis.toml")?;
//! println!("k = {}", config.anonymization.k);
//! println!("export to {}", config.audit.export_path.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`AnonymizationConfig`](crate::anonymization::AnonymizationConfig) - engine defaults
//! - [`AuditConfig`](crate::audit::AuditConfig) - detector windows and export paths
//! - [`GateConfig`] - authentication PIN
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [anonymization]
//! k = 3
//! l_diversity = 2
//! epsilon = 1.0
//! retention_days = 30
//!
//! [anonymization.masking]
//! mask_char = "*"
//! visible_prefix = 2
//!
//! [audit]
//! export_path = "./audit/signed_log.json"
//!
//! [gate]
//! pin = "${AEGIS_GATE_PIN}"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{AegisConfig, ApplicationConfig, GateConfig, LoggingConfig};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
