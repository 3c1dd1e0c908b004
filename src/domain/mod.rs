//! Domain models and types for Aegis.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Records** ([`PersonalData`], [`AnonymizedData`], [`NumericData`], [`AccessEvent`])
//! - **Time source** ([`Clock`], [`SystemClock`], [`ManualClock`])
//! - **Error types** ([`AegisError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible library operations return [`Result<T, AegisError>`]:
//!
//! ```rust
//! use aegis::domain::{AegisError, Result};
//!
//! fn check_epsilon(epsilon: f64) -> Result<f64> {
//!     if epsilon > 0.0 {
//!         Ok(epsilon)
//!     } else {
//!         Err(AegisError::InvalidParameter(format!("epsilon must be > 0, got {epsilon}")))
//!     }
//! }
//!
//! assert!(check_epsilon(0.0).is_err());
//! ```

pub mod clock;
pub mod errors;
pub mod records;
pub mod result;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::AegisError;
pub use records::{AccessEvent, AnonymizedData, NumericData, PersonalData};
pub use result::Result;
