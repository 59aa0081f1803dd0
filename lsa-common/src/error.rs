//! Common error types for LSA

use thiserror::Error;

/// Common result type for LSA operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the LSA crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Answer or score outside its allowed range, or a catalog reference
    /// that does not resolve
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backing store unreachable or rejected the write
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// True when the error comes from storage rather than from the input.
    ///
    /// Callers use this to degrade to "scored but not saved".
    pub fn is_persistence_failure(&self) -> bool {
        match self {
            #[cfg(feature = "sqlx")]
            Error::Database(_) => true,
            Error::Persistence(_) | Error::Io(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_failure_classification() {
        assert!(Error::Persistence("down".into()).is_persistence_failure());
        assert!(Error::Io(std::io::Error::other("disk")).is_persistence_failure());
        assert!(!Error::Validation("bad".into()).is_persistence_failure());
        assert!(!Error::NotFound("assessment 7".into()).is_persistence_failure());
    }

    #[test]
    fn test_display_messages() {
        let err = Error::NotFound("Assessment 42".to_string());
        assert_eq!(err.to_string(), "Not found: Assessment 42");

        let err = Error::Validation("answer out of range".to_string());
        assert_eq!(err.to_string(), "Validation error: answer out of range");
    }
}
