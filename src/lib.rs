// Aegis - Privacy-preserving record transformation and signed audit ledger
// Copyright (c) 2025 Aegis Contributors
// Licensed under the MIT License

//! # Aegis - privacy-preserving record transformation and signed audit ledger
//!
//! Aegis anonymizes personal records before they are displayed or exported,
//! and records every privacy-relevant action in a tamper-evident ledger.
//!
//! ## Overview
//!
//! This library provides:
//! - **Grouping** records into k-anonymous, l-diverse equivalence classes
//! - **Noise** on numeric statistics with the Laplace mechanism
//! - **Masking** of emails, phone numbers, names and identity numbers
//! - **Retention** sweeps over timestamped stores
//! - **Auditing** with burst and rate-limit detection and RSA-signed export
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`anonymization`] - Stateless anonymization engine
//! - [`audit`] - Audit ledger, detectors, signing and export
//! - [`protection`] - Authenticated facade over engine, ledger and record store
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aegis::config::load_config;
//! use aegis::domain::PersonalData;
//! use aegis::protection::{DataProtectionManager, OpenGate};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("aegis.toml")?;
//!     let manager = DataProtectionManager::from_config(&config)?;
//!     let session = manager.unlock(&OpenGate)?;
//!
//!     let records = vec![
//!         PersonalData::new(34, "F", "28013", "flu"),
//!         PersonalData::new(36, "F", "28044", "asthma"),
//!         PersonalData::new(38, "F", "28099", "flu"),
//!     ];
//!     let view = session.anonymize_for_display(&records, 3, 2)?;
//!     println!("Released {} records", view.records.len());
//!
//!     session.export_public_key(&config.audit.public_key_path)?;
//!     session.export_signed_log(&config.audit.export_path);
//!     Ok(())
//! }
//! ```
//!
//! ## Verifying an Export
//!
//! ```rust,no_run
//! use aegis::audit::verify_signed_log;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let document = std::fs::read_to_string("audit/signed_log.json")?;
//! let pem = std::fs::read_to_string("audit/ledger_public.pem")?;
//! for event in verify_signed_log(&document, &pem)? {
//!     println!("{event}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`domain::Result`] with [`domain::AegisError`]:
//!
//! ```rust
//! use aegis::anonymization::{masking::mask_by_data_type, DataType, MaskingPolicy};
//! use aegis::domain::AegisError;
//!
//! let err = mask_by_data_type("not-an-email", &MaskingPolicy::new(DataType::Email)).unwrap_err();
//! assert!(matches!(err, AegisError::InvalidFormat(_)));
//! ```

pub mod anonymization;
pub mod audit;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
pub mod protection;
