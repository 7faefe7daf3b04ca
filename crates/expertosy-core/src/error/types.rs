//! Core error types and traits for Expertosy

use thiserror::Error;

/// Result type alias for Expertosy operations
pub type ExpertosyResult<T> = Result<T, ExpertosyError>;

/// Unified error trait implemented by every Expertosy error.
///
/// - error_code(): Unique code for programmatic error identification
/// - message(): Human-readable error message
/// - context(): Optional additional context
/// - is_retryable(): Whether repeating the same request may succeed
pub trait UnifiedError: std::error::Error + Send + Sync {
    /// Get the error code for programmatic handling
    fn error_code(&self) -> &str;

    /// Get the human-readable error message
    fn message(&self) -> &str;

    /// Get optional context about the error
    fn context(&self) -> Option<&str> {
        None
    }

    /// Check if this error is retryable
    fn is_retryable(&self) -> bool {
        false
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context<C: std::fmt::Display>(self, context: C) -> ExpertosyResult<T>;

    /// Add context lazily (only evaluated on error)
    fn with_context<C: std::fmt::Display, F: FnOnce() -> C>(self, f: F) -> ExpertosyResult<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn context<C: std::fmt::Display>(self, context: C) -> ExpertosyResult<T> {
        self.map_err(|e| ExpertosyError::other(format!("{}: {}", context, e)))
    }

    fn with_context<C: std::fmt::Display, F: FnOnce() -> C>(self, f: F) -> ExpertosyResult<T> {
        self.map_err(|e| ExpertosyError::other(format!("{}: {}", f(), e)))
    }
}

/// Main error type for Expertosy
///
/// The first three variants are the failure taxonomy of the recommendation
/// flow: the backend could not be reached, it answered with an unexpected
/// shape, or its questionnaire text yielded no questions. All of them are
/// caught at the wizard boundary and shown to the user.
#[derive(Error, Debug, Clone)]
pub enum ExpertosyError {
    /// The recommendation backend could not be reached
    #[error("Network error: {message}")]
    Network {
        message: String,
        url: Option<String>,
        context: Option<String>,
    },

    /// The backend answered with JSON that does not match the expected shape
    #[error("Invalid response from {operation}: {message}")]
    InvalidResponseShape {
        operation: String,
        message: String,
    },

    /// No questions could be extracted from questionnaire text
    #[error("Could not read the questionnaire: {message}")]
    ParseFailure {
        message: String,
        context: Option<String>,
    },

    /// The backend answered with a non-success status
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        url: Option<String>,
        status_code: Option<u16>,
        context: Option<String>,
    },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
        context: Option<String>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        context: Option<String>,
    },

    /// Invalid input errors
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
        context: Option<String>,
    },

    /// A wizard or flow operation was attempted in a state that does not allow it
    #[error("Invalid transition: cannot {action} while {state}")]
    InvalidTransition { action: String, state: String },

    /// The owner of the flow went away while a request was in flight
    #[error("Operation was cancelled")]
    Cancelled,

    /// Generic error with context
    #[error("Error: {message}")]
    Other {
        message: String,
        context: Option<String>,
    },
}
