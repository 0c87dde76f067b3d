//! Result type alias for linkout operations

use super::errors::LinkoutError;

/// Result type alias using `LinkoutError` as the error type.
///
/// Use this throughout the codebase for fallible operations.
pub type Result<T> = std::result::Result<T, LinkoutError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::LinkoutError;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(LinkoutError::Ftp("test error".to_string()));
        assert!(result.is_err());
    }
}
