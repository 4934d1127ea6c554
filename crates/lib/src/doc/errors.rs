//! Error types for document operations.
//!
//! The core mutators and accessors on [`crate::doc::Doc`] are deliberately
//! fail-silent: misuse yields an absent result or a no-op, never an error.
//! `DocError` backs the convenience conversion layer on top of that contract
//! (typed [`TryFrom`] conversions and the JSON accessors), where a structured
//! reason is worth reporting.

use thiserror::Error;

/// Structured error types for document operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DocError {
    /// A value was requested as a type it does not hold
    #[error("type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// A dictionary key was not present
    #[error("element not found: {key}")]
    ElementNotFound { key: String },

    /// An index was outside the container's bounds
    #[error("index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Serialization of an embedded JSON value failed
    #[error("serialization failed: {reason}")]
    SerializationFailed { reason: String },

    /// Deserialization of an embedded JSON value failed
    #[error("deserialization failed: {reason}")]
    DeserializationFailed { reason: String },
}

impl DocError {
    /// Check if this error is a type mismatch
    pub fn is_type_error(&self) -> bool {
        matches!(self, DocError::TypeMismatch { .. })
    }

    /// Check if this error indicates a missing element
    pub fn is_not_found(&self) -> bool {
        matches!(self, DocError::ElementNotFound { .. })
    }

    /// Check if this error is related to embedded JSON handling
    pub fn is_serialization_error(&self) -> bool {
        matches!(
            self,
            DocError::SerializationFailed { .. } | DocError::DeserializationFailed { .. }
        )
    }

    /// Get the key if this is a key-related error
    pub fn key(&self) -> Option<&str> {
        match self {
            DocError::ElementNotFound { key } => Some(key),
            _ => None,
        }
    }
}

// Conversion from DocError to the main Error type
impl From<DocError> for crate::Error {
    fn from(err: DocError) -> Self {
        crate::Error::Doc(err)
    }
}
