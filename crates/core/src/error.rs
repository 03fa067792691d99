//! Error types for ComponentAI
//!
//! Two families live here. [`GenerationError`] is what a user sees when a
//! generation attempt does not produce a record; it is deliberately small.
//! [`ComponentError`] covers everything else the application can trip over:
//! storage, configuration, clipboard and export failures.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Generation Errors
// ============================================================================

/// Why a generation attempt failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The description was empty or whitespace only; nothing was sent
    #[error("Please describe your component first")]
    EmptyPrompt,

    /// Another generation is still outstanding for this session
    #[error("A generation is already in progress")]
    Busy,

    /// The remote call or its response handling failed
    #[error("Failed to generate code: {0}")]
    Failed(FailureCause),
}

/// Underlying cause of a [`GenerationError::Failed`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureCause {
    /// Connection, TLS or body decoding problem
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("service returned {status}: {message}")]
    Service { status: u16, message: String },

    /// The request exceeded its deadline
    #[error("request timed out")]
    Timeout,

    /// The request was cancelled before it completed
    #[error("request cancelled")]
    Cancelled,

    /// The service answered but produced no text
    #[error("response contained no text")]
    EmptyResponse,

    /// No API key was configured
    #[error("no API key configured (set {0})")]
    MissingApiKey(String),
}

impl GenerationError {
    /// Create a transport failure
    pub fn transport(msg: impl Into<String>) -> Self {
        GenerationError::Failed(FailureCause::Transport(msg.into()))
    }

    /// Create a service failure
    pub fn service(status: u16, msg: impl Into<String>) -> Self {
        GenerationError::Failed(FailureCause::Service {
            status,
            message: msg.into(),
        })
    }

    /// Check if this error was caused by the deadline expiring
    pub fn is_timeout(&self) -> bool {
        matches!(self, GenerationError::Failed(FailureCause::Timeout))
    }

    /// Check if this error was caused by cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, GenerationError::Failed(FailureCause::Cancelled))
    }

    /// The short notice shown to the user for this error
    pub fn notice(&self) -> &'static str {
        match self {
            GenerationError::EmptyPrompt => "Please describe your component first",
            GenerationError::Busy => "A generation is already in progress",
            GenerationError::Failed(_) => "Failed to generate code",
        }
    }
}

impl From<FailureCause> for GenerationError {
    fn from(cause: FailureCause) -> Self {
        GenerationError::Failed(cause)
    }
}

// ============================================================================
// Application Errors
// ============================================================================

/// The main error type for ComponentAI
#[derive(Debug, Error)]
pub enum ComponentError {
    // ========================================================================
    // Input Errors
    // ========================================================================
    /// Framework machine value not recognised
    #[error("Unknown framework '{0}'")]
    UnknownFramework(String),

    /// No generated code to act on
    #[error("There is no generated code yet")]
    NoCode,

    /// History index out of range
    #[error("No history entry at index {0}")]
    HistoryIndex(usize),

    // ========================================================================
    // Generation Errors
    // ========================================================================
    /// Generation failed
    #[error(transparent)]
    Generation(#[from] GenerationError),

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be parsed
    #[error("Failed to parse config '{path}': {message}")]
    ConfigParse { path: PathBuf, message: String },

    // ========================================================================
    // Desktop Integration Errors
    // ========================================================================
    /// Clipboard unavailable or rejected the write
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Operation cancelled by user
    #[error("Operation cancelled")]
    Cancelled,

    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl ComponentError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        ComponentError::Storage(msg.into())
    }

    /// Create a clipboard error
    pub fn clipboard(msg: impl Into<String>) -> Self {
        ComponentError::Clipboard(msg.into())
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        ComponentError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            ComponentError::Io(_)
                | ComponentError::FileRead { .. }
                | ComponentError::FileWrite { .. }
                | ComponentError::Storage(_)
        )
    }

    /// Check if this error came from a generation attempt
    pub fn is_generation(&self) -> bool {
        matches!(self, ComponentError::Generation(_))
    }
}

/// Result type alias using ComponentError
pub type ComponentResult<T> = Result<T, ComponentError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> ComponentResult<T>;
}

impl<T, E: Into<ComponentError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> ComponentResult<T> {
        self.map_err(|e| {
            let err: ComponentError = e.into();
            ComponentError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_prompt_message() {
        let err = GenerationError::EmptyPrompt;
        assert_eq!(err.to_string(), "Please describe your component first");
        assert_eq!(err.notice(), "Please describe your component first");
    }

    #[test]
    fn test_failure_notice_is_generic() {
        let err = GenerationError::service(503, "overloaded");
        assert_eq!(err.notice(), "Failed to generate code");
        assert_eq!(
            err.to_string(),
            "Failed to generate code: service returned 503: overloaded"
        );
    }

    #[test]
    fn test_timeout_classification() {
        let err: GenerationError = FailureCause::Timeout.into();
        assert!(err.is_timeout());
        assert!(!err.is_cancelled());
        assert!(GenerationError::Failed(FailureCause::Cancelled).is_cancelled());
    }

    #[test]
    fn test_error_with_context() {
        let err = ComponentError::with_context("Saving history", "Permission denied");
        assert_eq!(err.to_string(), "Saving history: Permission denied");
    }

    #[test]
    fn test_io_error_classification() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ComponentError = io_err.into();
        assert!(err.is_io());
        assert!(!err.is_generation());
    }

    #[test]
    fn test_generation_error_wraps() {
        let err: ComponentError = GenerationError::Busy.into();
        assert!(err.is_generation());
        assert_eq!(err.to_string(), "A generation is already in progress");
    }

    #[test]
    fn test_result_ext() {
        let res: Result<(), std::io::Error> = Err(std::io::Error::other("disk full"));
        let err = res.with_context("Writing export").unwrap_err();
        assert_eq!(err.to_string(), "Writing export: IO error: disk full");
    }
}
