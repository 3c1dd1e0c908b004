//! Masking policy data model

use crate::domain::AegisError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of value a masking policy applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    /// Email address, masked in the local part
    Email,
    /// Telephone number, last 4 characters visible
    Phone,
    /// Personal name, reduced to an initial
    Name,
    /// National identity document number, first and last 2 characters visible
    Dni,
}

impl DataType {
    /// Get human-readable label for the data type
    pub fn label(&self) -> &'static str {
        match self {
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::Name => "NAME",
            Self::Dni => "DNI",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DataType {
    type Err = AegisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "name" => Ok(Self::Name),
            "dni" => Ok(Self::Dni),
            _ => Err(AegisError::InvalidParameter(format!(
                "Unknown data type '{s}'. Must be one of: email, phone, name, dni"
            ))),
        }
    }
}

/// Declarative rule describing how one field value is obscured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskingPolicy {
    pub data_type: DataType,

    #[serde(default = "default_mask_char")]
    pub mask_char: char,

    /// Characters of an email local part left visible
    #[serde(default = "default_visible_prefix")]
    pub visible_prefix: usize,
}

fn default_mask_char() -> char {
    MaskingPolicy::DEFAULT_MASK_CHAR
}

fn default_visible_prefix() -> usize {
    MaskingPolicy::DEFAULT_VISIBLE_PREFIX
}

impl MaskingPolicy {
    pub const DEFAULT_MASK_CHAR: char = '*';
    pub const DEFAULT_VISIBLE_PREFIX: usize = 2;

    /// Policy for `data_type` with the default mask character and prefix
    pub fn new(data_type: DataType) -> Self {
        Self {
            data_type,
            mask_char: Self::DEFAULT_MASK_CHAR,
            visible_prefix: Self::DEFAULT_VISIBLE_PREFIX,
        }
    }

    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    pub fn with_visible_prefix(mut self, visible_prefix: usize) -> Self {
        self.visible_prefix = visible_prefix;
        self
    }
}
