//! Tamper-evident audit ledger
//!
//! # Overview
//!
//! The ledger records every privacy-relevant action, watches each event type
//! for bursts and rate-limit violations, and exports the full log with a
//! detached RSA signature.
//!
//! - [`AuditLedger`]: append-only store with detectors and signed export
//! - [`SlidingWindow`] / [`AuditAlert`]: per-type windows and alert values
//! - [`LedgerSigner`] / [`LedgerVerifier`]: key lifecycle and verification
//! - [`SignedLog`] / [`verify_signed_log`]: export document format
//!
//! # Examples
//!
//! ```no_run
//! use aegis::audit::{AuditConfig, AuditLedger};
//!
//! let ledger = AuditLedger::new(AuditConfig::default())?;
//! ledger.record_event("AUTH", "PIN accepted");
//! ledger.export_public_key("audit/ledger_public.pem")?;
//! assert!(ledger.export_signed_log("audit/signed_log.json"));
//! # Ok::<(), aegis::domain::AegisError>(())
//! ```

pub mod config;
pub mod export;
pub mod ledger;
pub mod signing;
pub mod window;

pub use config::AuditConfig;
pub use export::{verify_signed_log, write_atomically, ExportSummary, SignedLog};
pub use ledger::AuditLedger;
pub use signing::{LedgerSigner, LedgerVerifier, SigningKeyPair, KEY_BITS, SIGNATURE_ALGORITHM};
pub use window::{AuditAlert, SlidingWindow};
