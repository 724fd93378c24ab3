//! Result type alias for Shutter
//!
//! This module provides a convenient Result type alias that uses ShutterError
//! as the error type.

use super::errors::ShutterError;

/// Result type alias for Shutter operations
///
/// # Examples
///
/// ```
/// use shutter::domain::result::Result;
/// use shutter::domain::errors::ShutterError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ShutterError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ShutterError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ShutterError;

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(ShutterError::Validation("test error".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
