//! Logging and observability
//!
//! Structured logging with:
//! - Console output on stderr
//! - JSON-formatted log files with rotation
//! - `RUST_LOG` or configured level filtering
//!
//! # Example
//!
//! ```no_run
//! use aegis::logging::init_logging;
//! use aegis::config::LoggingConfig;
//!
//! let _guard = init_logging("info", &LoggingConfig::console_only()).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the completion of a CLI operation
///
/// # Example
///
/// ```no_run
/// use aegis::log_operation_complete;
/// use std::time::Duration;
///
/// log_operation_complete!("anonymize", 42, Duration::from_millis(8));
/// ```
#[macro_export]
macro_rules! log_operation_complete {
    ($operation:expr, $count:expr, $duration:expr) => {
        tracing::info!(
            operation = $operation,
            count = $count,
            duration_ms = $duration.as_millis() as u64,
            "Operation completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use aegis::log_error_with_context;
/// use aegis::domain::AegisError;
///
/// let error = AegisError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
