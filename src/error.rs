//! Error types for the phishguard library.
//!
//! All fallible operations in this crate return [`Result`], whose error type
//! is the [`PhishguardError`] enum defined here.

use std::io;

use thiserror::Error;

/// The main error type for phishguard operations.
///
/// Uses the `thiserror` crate for automatic `Error` trait implementation and
/// provides convenient constructor methods for the string-carrying variants.
#[derive(Error, Debug)]
pub enum PhishguardError {
    /// I/O errors (file operations, network, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Dataset-related errors (missing columns, unparsable cells)
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Training-related errors (bad configuration, fit failures)
    #[error("Training error: {0}")]
    Training(String),

    /// Model artifact errors (missing, corrupt, or incompatible blobs)
    #[error("Model error: {0}")]
    Model(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with PhishguardError.
pub type Result<T> = std::result::Result<T, PhishguardError>;

impl PhishguardError {
    /// Create a new dataset error.
    pub fn dataset<S: Into<String>>(msg: S) -> Self {
        PhishguardError::Dataset(msg.into())
    }

    /// Create a new training error.
    pub fn training<S: Into<String>>(msg: S) -> Self {
        PhishguardError::Training(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        PhishguardError::Model(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        PhishguardError::InvalidOperation(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        PhishguardError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        PhishguardError::Other(format!("Internal error: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PhishguardError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = PhishguardError::dataset("Test dataset error");
        assert_eq!(error.to_string(), "Dataset error: Test dataset error");

        let error = PhishguardError::training("Test training error");
        assert_eq!(error.to_string(), "Training error: Test training error");

        let error = PhishguardError::model("Test model error");
        assert_eq!(error.to_string(), "Model error: Test model error");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = PhishguardError::from(io_error);

        match error {
            PhishguardError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }
}
