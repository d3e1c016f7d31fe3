//! Result type alias for unidb
//!
//! This module provides a convenient Result type alias that uses UnidbError
//! as the error type.

use super::errors::UnidbError;

/// Result type alias for unidb operations
///
/// # Examples
///
/// ```
/// use unidb::domain::result::Result;
/// use unidb::domain::errors::UnidbError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(UnidbError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, UnidbError>;
