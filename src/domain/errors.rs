//! Domain error types
//!
//! This module defines the error hierarchy for Aegis. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Aegis error type
///
/// This is the primary error type used throughout the library. Masking and
/// differential-privacy failures surface as [`AegisError::InvalidFormat`] and
/// [`AegisError::InvalidParameter`] so callers can recover from them.
#[derive(Debug, Error)]
pub enum AegisError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input value does not have the shape required by its declared type
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Numeric parameter outside its valid domain (epsilon <= 0, k < 1, l < 1)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Key generation or signing failed
    #[error("Signing error: {0}")]
    Signing(String),

    /// Signature did not verify against the signed bytes
    #[error("Signature verification failed: {0}")]
    Signature(String),

    /// Authentication gate denied access
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl AegisError {
    /// Process exit code used by the CLI for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) => 2,
            Self::InvalidFormat(_) | Self::InvalidParameter(_) => 3,
            Self::Signature(_) | Self::Authentication(_) => 1,
            _ => 5,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for AegisError {
    fn from(err: std::io::Error) -> Self {
        AegisError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for AegisError {
    fn from(err: serde_json::Error) -> Self {
        AegisError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for AegisError {
    fn from(err: toml::de::Error) -> Self {
        AegisError::Configuration(format!("TOML parse error: {err}"))
    }
}
