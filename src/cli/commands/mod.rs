//! CLI command implementations
//!
//! Data commands (`anonymize`, `mask`, `noise`, `retention`) run inside a
//! protected session; `init`, `validate-config` and `verify` do not.

pub mod anonymize;
pub mod init;
pub mod mask;
pub mod noise;
pub mod retention;
pub mod session;
pub mod validate;
pub mod verify;
