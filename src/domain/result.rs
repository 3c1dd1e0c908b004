//! Result type alias for Aegis

use super::errors::AegisError;

/// Result type alias for Aegis operations
///
/// # Examples
///
/// ```
/// use aegis::domain::result::Result;
/// use aegis::domain::errors::AegisError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(AegisError::InvalidParameter("k must be >= 1".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, AegisError>;
