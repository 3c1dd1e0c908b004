//! Verify command implementation
//!
//! Checks a signed audit export against a published public key. No session
//! is opened; verification needs nothing but the two files.

use super::session::read_input;
use crate::audit::verify_signed_log;
use crate::domain::AegisError;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the verify command
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Signed audit log produced by an export
    #[arg(long)]
    pub log: PathBuf,

    /// PEM public key of the exporting ledger
    #[arg(long)]
    pub public_key: PathBuf,

    /// Print the verified events
    #[arg(long)]
    pub show_events: bool,
}

impl VerifyArgs {
    /// Execute the verify command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(log = %self.log.display(), "Verifying signed audit log");

        println!("🔍 Verifying signed audit log: {}", self.log.display());
        println!();

        let verified = read_input(&self.log).and_then(|document| {
            let pem = read_input(&self.public_key)?;
            verify_signed_log(&document, &pem)
        });

        match verified {
            Ok(events) => {
                println!("✅ Signature valid");
                println!("  Events: {}", events.len());
                if let (Some(first), Some(last)) = (events.first(), events.last()) {
                    println!("  First: {first}");
                    println!("  Last: {last}");
                }
                if self.show_events {
                    println!();
                    for event in &events {
                        println!("  {event}");
                    }
                }
                Ok(0)
            }
            Err(e @ AegisError::Signature(_)) => {
                println!("❌ Signature verification failed");
                println!("   The log was modified or signed with a different key");
                tracing::warn!(error = %e, log = %self.log.display(), "Audit log failed verification");
                Ok(e.exit_code())
            }
            Err(e) => {
                println!("❌ Could not verify audit log");
                println!("   Error: {e}");
                // A malformed document is invalid input, not a fatal error
                Ok(match e {
                    AegisError::Serialization(_) => 3,
                    other => other.exit_code(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditConfig, AuditLedger};
    use tempfile::tempdir;

    #[test]
    fn test_verify_exit_codes() {
        let dir = tempdir().unwrap();
        let log = dir.path().join("signed.json");
        let public_key = dir.path().join("key.pem");

        let ledger = AuditLedger::new(AuditConfig::default()).unwrap();
        ledger.record_event("AUTH", "Access granted via open gate");
        ledger.try_export_signed_log(&log).unwrap();
        ledger.export_public_key(&public_key).unwrap();

        let args = VerifyArgs {
            log: log.clone(),
            public_key: public_key.clone(),
            show_events: true,
        };
        assert_eq!(args.execute().unwrap(), 0);

        let document = std::fs::read_to_string(&log).unwrap();
        std::fs::write(&log, document.replace("open gate", "pin gate")).unwrap();
        assert_eq!(args.execute().unwrap(), 1);

        std::fs::write(&log, "not json").unwrap();
        assert_eq!(args.execute().unwrap(), 3);
    }
}
