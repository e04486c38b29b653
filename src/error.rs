//! Error types for the document model

use std::io;
use thiserror::Error;

/// Main error type for document operations
#[derive(Debug, Error)]
pub enum DxfError {
    /// IO error occurred while writing tags
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A named object or handle does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// A named object already exists
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// The caller passed an invalid argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An internal consistency invariant was violated
    ///
    /// The operation that raised this must be aborted; the document may
    /// require repair before further use.
    #[error("invariant violation: {0}")]
    Invariant(String),
}

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, DxfError>;

impl DxfError {
    /// Not-found error for a handle
    pub fn handle_not_found(handle: crate::types::Handle) -> Self {
        DxfError::NotFound(format!("handle {}", handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Handle;

    #[test]
    fn test_error_display() {
        let err = DxfError::NotFound("Layout1".to_string());
        assert_eq!(err.to_string(), "not found: Layout1");

        let err = DxfError::InvalidArgument("rotation out of range".to_string());
        assert!(err.to_string().contains("invalid argument"));
    }

    #[test]
    fn test_handle_not_found() {
        let err = DxfError::handle_not_found(Handle::new(0x2F));
        assert_eq!(err.to_string(), "not found: handle 0x2F");
    }

    #[test]
    fn test_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::Other, "disk full");
        let err: DxfError = io_err.into();
        assert!(matches!(err, DxfError::Io(_)));
    }
}
