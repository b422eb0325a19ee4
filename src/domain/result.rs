//! Result type alias for the archiver

use super::errors::ArchiveError;

/// Result type alias for archiver operations
///
/// # Examples
///
/// ```
/// use cwlogs_archive::domain::result::Result;
/// use cwlogs_archive::domain::errors::ArchiveError;
///
/// fn failing_function() -> Result<()> {
///     Err(ArchiveError::Configuration("S3 bucket is required".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ArchiveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i64> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
