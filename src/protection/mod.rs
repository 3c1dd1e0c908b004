//! Caller facade
//!
//! [`DataProtectionManager`] ties the anonymization engine, the audit ledger
//! and a [`RecordStore`] together behind an [`AuthenticationGate`].
//!
//! ```
//! use aegis::anonymization::AnonymizationConfig;
//! use aegis::audit::AuditConfig;
//! use aegis::protection::{DataProtectionManager, OpenGate};
//!
//! let manager = DataProtectionManager::new(AnonymizationConfig::default(), AuditConfig::default())?;
//! let session = manager.unlock(&OpenGate)?;
//! session.store_record("patient-7", r#"{"age":41}"#);
//!
//! let logs = session.access_logs();
//! assert_eq!(logs.len(), 2); // AUTH, DATA_STORE
//! # Ok::<(), aegis::domain::AegisError>(())
//! ```

pub mod gate;
pub mod manager;
pub mod store;

pub use gate::{AuthOutcome, AuthenticationGate, OpenGate, PinGate};
pub use manager::{
    event_types, AnonymizedView, ClearSummary, DataProtectionManager, ProtectedSession,
};
pub use store::{MemoryRecordStore, RecordStore};
