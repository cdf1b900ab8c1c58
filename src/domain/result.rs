//! Result type alias for figma-exporter

use super::errors::ExporterError;

/// Result type alias for figma-exporter operations
///
/// # Examples
///
/// ```
/// use figma_exporter::domain::result::Result;
/// use figma_exporter::domain::errors::ExporterError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ExporterError::Configuration("depth must be >= 1".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ExporterError>;

#[cfg(test)]
mod tests {
    use super::*;

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
        let result: Result<i32> = Err(ExporterError::Protocol("test".to_string()));
        assert!(result.is_err());
    }
}
