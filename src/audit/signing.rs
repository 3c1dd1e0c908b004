//! Ledger signing key lifecycle
//!
//! The ledger signs exports with RSASSA-PKCS1-v1_5 over SHA-256 using an
//! RSA-2048 key pair. The pair is generated on the first signing request,
//! exactly once even under concurrent callers, and lives only in process
//! memory. The public half is exported as SPKI PEM so signatures can be
//! verified elsewhere with [`LedgerVerifier`].

use crate::domain::{AegisError, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey, LineEnding};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use std::fmt;
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::Instant;

/// Modulus size of the ledger key
pub const KEY_BITS: usize = 2048;

/// Name reported for the signature scheme
pub const SIGNATURE_ALGORITHM: &str = "RSA-2048 PKCS#1 v1.5 / SHA-256";

/// In-memory RSA key pair
pub struct SigningKeyPair {
    signing_key: SigningKey<Sha256>,
    public_key: RsaPublicKey,
}

impl SigningKeyPair {
    /// Generate a fresh RSA-2048 key pair from the OS RNG
    pub fn generate() -> Result<Self> {
        let start = Instant::now();
        let private_key = RsaPrivateKey::new(&mut rand::rngs::OsRng, KEY_BITS)
            .map_err(|e| AegisError::Signing(format!("Failed to generate RSA key pair: {e}")))?;
        let public_key = private_key.to_public_key();

        tracing::info!(
            bits = KEY_BITS,
            duration_ms = start.elapsed().as_millis() as u64,
            "Generated ledger signing key pair"
        );

        Ok(Self {
            signing_key: SigningKey::<Sha256>::new(private_key),
            public_key,
        })
    }

    /// Detached signature over `data`
    pub fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        let signature = self
            .signing_key
            .try_sign(data)
            .map_err(|e| AegisError::Signing(format!("Failed to sign data: {e}")))?;
        Ok(signature.to_vec())
    }

    /// Detached signature over `data`, base64 encoded
    pub fn sign_base64(&self, data: &[u8]) -> Result<String> {
        Ok(BASE64.encode(self.sign(data)?))
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    /// Public key as SPKI PEM (`-----BEGIN PUBLIC KEY-----`)
    pub fn public_key_pem(&self) -> Result<String> {
        self.public_key
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| AegisError::Signing(format!("Failed to encode public key: {e}")))
    }

    /// Verifier for signatures produced by this pair
    pub fn verifier(&self) -> LedgerVerifier {
        LedgerVerifier::new(self.public_key.clone())
    }
}

impl fmt::Debug for SigningKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKeyPair")
            .field("bits", &KEY_BITS)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// Lazily initialized, process-lifetime signing key
#[derive(Debug, Default)]
pub struct LedgerSigner {
    key_pair: OnceLock<SigningKeyPair>,
    init_lock: Mutex<()>,
}

impl LedgerSigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing key pair
    pub fn with_key_pair(key_pair: SigningKeyPair) -> Self {
        let signer = Self::default();
        // A freshly created cell is always empty
        let _ = signer.key_pair.set(key_pair);
        signer
    }

    /// Whether the key pair has been generated yet
    pub fn is_initialized(&self) -> bool {
        self.key_pair.get().is_some()
    }

    /// Key pair, generating it on first use
    ///
    /// Concurrent first calls serialize on an init lock so only one key pair
    /// is ever generated; later calls read the cell without locking.
    pub fn key_pair(&self) -> Result<&SigningKeyPair> {
        if let Some(key_pair) = self.key_pair.get() {
            return Ok(key_pair);
        }

        let _guard = self
            .init_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(key_pair) = self.key_pair.get() {
            return Ok(key_pair);
        }

        let generated = SigningKeyPair::generate()?;
        Ok(self.key_pair.get_or_init(|| generated))
    }

    pub fn sign_base64(&self, data: &[u8]) -> Result<String> {
        self.key_pair()?.sign_base64(data)
    }

    pub fn public_key_pem(&self) -> Result<String> {
        self.key_pair()?.public_key_pem()
    }
}

/// Verifies ledger signatures with a published public key
#[derive(Debug, Clone)]
pub struct LedgerVerifier {
    public_key: RsaPublicKey,
}

impl LedgerVerifier {
    pub fn new(public_key: RsaPublicKey) -> Self {
        Self { public_key }
    }

    /// Load a verifier from SPKI PEM text
    pub fn from_public_key_pem(pem: &str) -> Result<Self> {
        let public_key = RsaPublicKey::from_public_key_pem(pem)
            .map_err(|e| AegisError::InvalidFormat(format!("Invalid public key PEM: {e}")))?;
        Ok(Self::new(public_key))
    }

    /// Check a base64 detached signature over `data`
    ///
    /// # Errors
    ///
    /// [`AegisError::Signature`] if the signature is malformed or does not
    /// match `data`.
    pub fn verify_base64(&self, data: &[u8], signature_b64: &str) -> Result<()> {
        let bytes = BASE64
            .decode(signature_b64.trim())
            .map_err(|e| AegisError::Signature(format!("Signature is not valid base64: {e}")))?;
        let signature = Signature::try_from(bytes.as_slice())
            .map_err(|e| AegisError::Signature(format!("Malformed signature: {e}")))?;

        VerifyingKey::<Sha256>::new(self.public_key.clone())
            .verify(data, &signature)
            .map_err(|_| AegisError::Signature("signature does not match signed data".to_string()))
    }
}
