//! Anonymization data models

pub mod masking_policy;

pub use masking_policy::{DataType, MaskingPolicy};
