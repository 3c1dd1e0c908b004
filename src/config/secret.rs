//! Gate PIN handling using the secrecy crate
//!
//! The configured PIN and any PIN supplied on the command line are held as
//! [`SecretString`]: zeroed on drop, redacted in `Debug`, and only readable
//! through `expose_secret()`.
//!
//! # Example
//!
//! ```rust
//! use aegis::config::{SecretString, SecretValue};
//! use secrecy::{ExposeSecret, Secret};
//!
//! let pin: SecretString = Secret::new(SecretValue::from("4321".to_string()));
//! assert_eq!(pin.expose_secret().as_ref(), "4321");
//! assert!(!format!("{pin:?}").contains("4321"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl From<SecretValue> for String {
    fn from(mut s: SecretValue) -> Self {
        std::mem::take(&mut s.0)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// A [`SecretValue`] inside a `Secret` container
pub type SecretString = Secret<SecretValue>;

/// Wrap a `String` as a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

/// Wrap an optional `String`, e.g. a PIN passed on the command line
///
/// ```rust
/// use aegis::config::secret_string_opt;
///
/// assert!(secret_string_opt(Some("4321".to_string())).is_some());
/// assert!(secret_string_opt(None).is_none());
/// ```
#[inline]
pub fn secret_string_opt(value: Option<String>) -> Option<SecretString> {
    value.map(|s| Secret::new(SecretValue::from(s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_pin_secret_creation() {
        let secret = secret_string("4321".to_string());
        assert_eq!(secret.expose_secret(), "4321");
    }

    #[test]
    fn test_secret_string_opt_some() {
        let secret = secret_string_opt(Some("4321".to_string()));
        assert!(secret.is_some());
        assert_eq!(secret.unwrap().expose_secret(), "4321");
    }

    #[test]
    fn test_secret_string_opt_none() {
        let secret = secret_string_opt(None);
        assert!(secret.is_none());
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("98765".to_string());
        let debug_output = format!("{secret:?}");

        // Should not contain the actual secret
        assert!(!debug_output.contains("98765"));
        // Should contain redaction indicator
        assert!(debug_output.contains("REDACTED") || debug_output.contains("Secret"));
    }

    #[test]
    fn test_pin_from_toml() {
        #[derive(serde::Deserialize)]
        struct Gate {
            pin: SecretString,
        }

        let gate: Gate = toml::from_str("pin = \"2468\"").unwrap();
        assert_eq!(gate.pin.expose_secret(), "2468");
        assert_eq!(gate.pin.expose_secret().len(), 4);
    }

    #[test]
    fn test_into_string_takes_value() {
        let value = SecretValue::from("1357".to_string());
        let plain: String = value.into();
        assert_eq!(plain, "1357");
    }
}
