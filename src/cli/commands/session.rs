//! Shared plumbing for commands that run behind the authentication gate

use crate::audit::AuditLedger;
use crate::config::{parse_config, secret_string_opt, AegisConfig};
use crate::domain::{AegisError, Result};
use crate::protection::{
    AuthenticationGate, DataProtectionManager, OpenGate, PinGate, ProtectedSession, RecordStore,
};
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Gate and audit options accepted by every data command
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// PIN checked against `gate.pin`
    #[arg(long, env = "AEGIS_PIN", hide_env_values = true)]
    pub pin: Option<String>,

    /// Write the session's signed audit log here (public key to PATH.pub.pem)
    #[arg(long, value_name = "PATH")]
    pub audit_out: Option<PathBuf>,
}

/// Load `config_path`, falling back to defaults when the file does not exist
pub fn load_or_default(config_path: &str) -> Result<AegisConfig> {
    if Path::new(config_path).exists() {
        crate::config::load_config(config_path)
    } else {
        tracing::debug!(config_path = %config_path, "Configuration file not found, using defaults");
        parse_config("")
    }
}

/// Gate for `config`, with `supplied_pin` as the caller's credential
pub fn build_gate(config: &AegisConfig, supplied_pin: Option<String>) -> Box<dyn AuthenticationGate> {
    match &config.gate.pin {
        Some(expected) => Box::new(PinGate::new(expected.clone(), secret_string_opt(supplied_pin))),
        None => {
            tracing::warn!("No gate.pin configured; sessions are not authenticated");
            Box::new(OpenGate)
        }
    }
}

/// Where the public key accompanying `audit_out` is written
pub fn public_key_path_for(audit_out: &Path) -> PathBuf {
    let mut path = audit_out.as_os_str().to_owned();
    path.push(".pub.pem");
    PathBuf::from(path)
}

fn export_audit(ledger: &AuditLedger, audit_out: &Path) -> Result<()> {
    let summary = ledger.try_export_signed_log(audit_out)?;
    let key_path = public_key_path_for(audit_out);
    ledger.export_public_key(&key_path)?;

    // stdout is reserved for command output
    eprintln!(
        "🔏 Signed audit log: {} ({} events, key {})",
        summary.path.display(),
        summary.events,
        key_path.display()
    );
    Ok(())
}

fn report_error(error: &AegisError) -> i32 {
    println!("❌ {error}");
    error.exit_code()
}

/// Open a protected session, run `operation`, then export the ledger if asked
///
/// `store` replaces the in-memory record store, e.g. with one loaded from disk.
/// Failures are printed and mapped to the CLI exit code convention.
pub fn run_protected<F>(
    config_path: &str,
    args: &SessionArgs,
    store: Option<Arc<dyn RecordStore>>,
    operation: F,
) -> anyhow::Result<i32>
where
    F: FnOnce(&ProtectedSession<'_>, &AegisConfig) -> Result<i32>,
{
    let config = match load_or_default(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("❌ Failed to load configuration file");
            println!("   Error: {e}");
            return Ok(2);
        }
    };

    let manager = match open_manager(&config, store) {
        Ok(manager) => manager,
        Err(e) => return Ok(report_error(&e)),
    };

    let gate = build_gate(&config, args.pin.clone());
    let code = match manager.unlock(gate.as_ref()) {
        Ok(session) => operation(&session, &config).unwrap_or_else(|e| report_error(&e)),
        Err(e) => report_error(&e),
    };

    if let Some(audit_out) = &args.audit_out {
        if let Err(e) = export_audit(manager.ledger(), audit_out) {
            crate::log_error_with_context!(&e, "Failed to export session audit log");
            let export_code = report_error(&e);
            return Ok(if code == 0 { export_code } else { code });
        }
    }

    Ok(code)
}

fn open_manager(
    config: &AegisConfig,
    store: Option<Arc<dyn RecordStore>>,
) -> Result<DataProtectionManager> {
    let manager = DataProtectionManager::from_config(config)?;
    Ok(match store {
        Some(store) => manager.with_store(store),
        None => manager,
    })
}

/// Read a UTF-8 input file; unreadable input is an invalid-input error
pub fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        AegisError::InvalidParameter(format!("Cannot read input file {}: {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    #[test]
    fn test_public_key_path_for() {
        assert_eq!(
            public_key_path_for(Path::new("out/signed.json")),
            PathBuf::from("out/signed.json.pub.pem")
        );
    }

    #[test]
    fn test_gate_selection() {
        let mut config = AegisConfig::default();
        assert_eq!(build_gate(&config, None).name(), "open");

        config.gate.pin = Some(secret_string("1111".to_string()));
        let gate = build_gate(&config, Some("1111".to_string()));
        assert_eq!(gate.name(), "pin");
        assert!(gate.authenticate().is_granted());
        assert!(!build_gate(&config, None).authenticate().is_granted());
    }

    #[test]
    fn test_read_input_missing_file_is_invalid_input() {
        let err = read_input(Path::new("/definitely/not/here.json")).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
