//! Authentication gates
//!
//! The facade never prompts for credentials itself. A gate is handed to
//! [`DataProtectionManager::unlock`](super::DataProtectionManager::unlock) and
//! decides whether the caller may proceed.

use crate::config::SecretString;
use secrecy::ExposeSecret;
use sha2::{Digest, Sha256};

/// Result of an authentication attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Granted,
    Denied { reason: String },
}

impl AuthOutcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Something that can authenticate the current caller
pub trait AuthenticationGate: Send + Sync {
    fn authenticate(&self) -> AuthOutcome;

    /// Short name used in audit details
    fn name(&self) -> &'static str;
}

/// Compares a supplied PIN against the configured one
///
/// Both values are hashed with SHA-256 before comparison, so the comparison
/// runs over fixed-length digests regardless of PIN length.
#[derive(Debug)]
pub struct PinGate {
    expected: SecretString,
    supplied: Option<SecretString>,
}

impl PinGate {
    pub fn new(expected: SecretString, supplied: Option<SecretString>) -> Self {
        Self { expected, supplied }
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

impl AuthenticationGate for PinGate {
    fn authenticate(&self) -> AuthOutcome {
        let Some(supplied) = &self.supplied else {
            return AuthOutcome::Denied {
                reason: "no PIN supplied".to_string(),
            };
        };

        let expected = digest(self.expected.expose_secret().as_ref());
        let given = digest(supplied.expose_secret().as_ref());

        // Fold over every byte instead of short-circuiting on the first mismatch
        let diff = expected
            .iter()
            .zip(given.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b));

        if diff == 0 {
            AuthOutcome::Granted
        } else {
            AuthOutcome::Denied {
                reason: "PIN mismatch".to_string(),
            }
        }
    }

    fn name(&self) -> &'static str {
        "pin"
    }
}

/// Grants every request; used when no PIN is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenGate;

impl AuthenticationGate for OpenGate {
    fn authenticate(&self) -> AuthOutcome {
        AuthOutcome::Granted
    }

    fn name(&self) -> &'static str {
        "open"
    }
}
