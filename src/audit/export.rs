//! Signed ledger export format
//!
//! ```text
//! {"logs":[{"timestamp":..,"eventType":"..","details":".."},...],"signature":"<base64>"}
//! ```
//!
//! The signature covers the exact bytes of the `logs` array as written to the
//! file. Both writing and verification go through [`RawValue`] so those bytes
//! are never re-serialized.

use crate::audit::signing::{LedgerSigner, LedgerVerifier};
use crate::domain::{AccessEvent, AegisError, Result};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct SignedLogRef<'a> {
    logs: &'a RawValue,
    signature: &'a str,
}

#[derive(Deserialize)]
struct SignedLogOwned {
    logs: Box<RawValue>,
    signature: String,
}

/// Serialized ledger with its detached signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedLog {
    /// Exact bytes that were signed
    pub logs_json: String,
    /// Base64 detached signature over `logs_json`
    pub signature: String,
}

impl SignedLog {
    /// Serialize `events` in order and sign the resulting bytes
    pub fn sign(events: &[AccessEvent], signer: &LedgerSigner) -> Result<Self> {
        let logs_json = serde_json::to_string(events)?;
        let signature = signer.sign_base64(logs_json.as_bytes())?;
        Ok(Self {
            logs_json,
            signature,
        })
    }

    /// Envelope document written to disk
    pub fn to_json(&self) -> Result<String> {
        let logs = RawValue::from_string(self.logs_json.clone())?;
        Ok(serde_json::to_string(&SignedLogRef {
            logs: &logs,
            signature: &self.signature,
        })?)
    }

    /// Parse an envelope, keeping the `logs` bytes verbatim
    pub fn from_json(document: &str) -> Result<Self> {
        let parsed: SignedLogOwned = serde_json::from_str(document)?;
        Ok(Self {
            logs_json: parsed.logs.get().to_string(),
            signature: parsed.signature,
        })
    }

    /// Verify the signature and decode the events
    pub fn verify(&self, verifier: &LedgerVerifier) -> Result<Vec<AccessEvent>> {
        verifier.verify_base64(self.logs_json.as_bytes(), &self.signature)?;
        Ok(serde_json::from_str(&self.logs_json)?)
    }
}

/// Result of a successful export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub events: usize,
    pub bytes: usize,
    pub signature: String,
}

/// Verify an export document against a PEM public key
///
/// # Errors
///
/// - [`AegisError::Serialization`] if the document is not a signed log
/// - [`AegisError::InvalidFormat`] if the PEM cannot be parsed
/// - [`AegisError::Signature`] if the signature does not match the logs bytes
///
/// # Examples
///
/// ```no_run
/// use aegis::audit::verify_signed_log;
///
/// # fn example() -> aegis::domain::Result<()> {
/// let document = std::fs::read_to_string("audit/signed_log.json")?;
/// let pem = std::fs::read_to_string("audit/ledger_public.pem")?;
/// let events = verify_signed_log(&document, &pem)?;
/// println!("{} verified events", events.len());
/// # Ok(())
/// # }
/// ```
pub fn verify_signed_log(document: &str, public_key_pem: &str) -> Result<Vec<AccessEvent>> {
    let verifier = LedgerVerifier::from_public_key_pem(public_key_pem)?;
    SignedLog::from_json(document)?.verify(&verifier)
}

/// Write `contents` to `path` via a temp file in the same directory
///
/// The temp file is removed on every failure path, so `path` is either left
/// untouched or replaced whole.
pub fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| {
        AegisError::Io(format!("Failed to create directory {}: {e}", dir.display()))
    })?;

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    file.persist(path)
        .map_err(|e| AegisError::Io(format!("Failed to replace {}: {}", path.display(), e.error)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_envelope_keeps_logs_bytes() {
        let signed = SignedLog {
            logs_json: r#"[{"timestamp":1,"eventType":"AUTH","details":"ok"}]"#.to_string(),
            signature: "c2ln".to_string(),
        };
        let document = signed.to_json().unwrap();
        assert_eq!(
            document,
            r#"{"logs":[{"timestamp":1,"eventType":"AUTH","details":"ok"}],"signature":"c2ln"}"#
        );
        assert_eq!(SignedLog::from_json(&document).unwrap(), signed);
    }

    #[test]
    fn test_sign_and_verify_roundtrip() {
        let signer = LedgerSigner::new();
        let events = vec![AccessEvent::new(10, "AUTH", "granted")];
        let signed = SignedLog::sign(&events, &signer).unwrap();

        let verifier = signer.key_pair().unwrap().verifier();
        assert_eq!(signed.verify(&verifier).unwrap(), events);
    }

    #[test]
    fn test_write_atomically_replaces_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");

        write_atomically(&path, b"first").unwrap();
        write_atomically(&path, b"second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");

        // No temp files left behind
        let entries = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_write_atomically_into_directory_fails() {
        let dir = tempdir().unwrap();
        assert!(write_atomically(dir.path(), b"data").is_err());
    }
}
