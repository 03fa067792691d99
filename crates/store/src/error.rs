//! Storage error type

use componentai_core::ComponentError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("Storage IO error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Key cannot be used as a storage name
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    /// A value could not be encoded for storage
    #[error("Failed to encode value for '{key}': {message}")]
    Encode { key: String, message: String },
}

/// Result type alias using StoreError
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for ComponentError {
    fn from(err: StoreError) -> Self {
        ComponentError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converts_into_component_error() {
        let err: ComponentError = StoreError::InvalidKey("a/b".into()).into();
        assert!(err.is_io());
        assert_eq!(err.to_string(), "Storage error: Invalid storage key 'a/b'");
    }
}
