//! Error types for ndhist

use thiserror::Error;

/// ndhist error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid binning or histogram definition
    #[error("Validation error: {0}")]
    Validation(String),

    /// Rank or array length mismatch
    #[error("Shape error: {0}")]
    Shape(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_message() {
        let err = Error::Validation("edges must be strictly ascending".into());
        assert_eq!(err.to_string(), "Validation error: edges must be strictly ascending");

        let err = Error::Shape("expected 2 axes, got 3".into());
        assert!(err.to_string().starts_with("Shape error"));
    }

    #[test]
    fn test_io_conversion() {
        fn open() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }
        assert!(matches!(open(), Err(Error::Io(_))));
    }
}
