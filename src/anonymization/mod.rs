//! Anonymization module for Aegis
//!
//! This module provides privacy-preserving transformations of personal
//! records before they are displayed or exported.
//!
//! # Architecture
//!
//! - **Grouping**: k-anonymity with l-diversity suppression ([`kanonymity`])
//! - **Noise**: Laplace-mechanism differential privacy ([`privacy`])
//! - **Masking**: per-data-type field masking ([`masking`], [`models`])
//! - **Retention**: expiry sweep over timestamp stores ([`retention`])
//!
//! # Usage
//!
//! ```rust
//! use aegis::anonymization::{AnonymizationEngine, AnonymizationConfig};
//! use aegis::anonymization::models::DataType;
//!
//! let engine = AnonymizationEngine::new(AnonymizationConfig::default()).unwrap();
//! let policy = engine.default_policy(DataType::Dni);
//! assert_eq!(engine.mask_by_data_type("12345678Z", &policy).unwrap(), "12*****8Z");
//! ```

pub mod config;
pub mod engine;
pub mod kanonymity;
pub mod masking;
pub mod models;
pub mod privacy;
pub mod retention;

// Re-export main types
pub use config::{AnonymizationConfig, MaskingDefaults};
pub use engine::AnonymizationEngine;
pub use kanonymity::{GeneralizedKey, KAnonymityReport};
pub use models::{DataType, MaskingPolicy};
pub use retention::RetentionStore;
