//! Error types for Expertosy
//!
//! All errors implement the `UnifiedError` trait which provides consistent fields:
//! - error_code: A unique identifier for programmatic error handling
//! - message: Human-readable error message
//! - context: Optional additional context about where/why the error occurred

mod constructors;
mod conversions;
mod types;
mod unified_error;
mod user_messages;

pub use types::{ExpertosyError, ExpertosyResult, ResultExt, UnifiedError};
pub use user_messages::{ErrorCategory, UserFriendlyError};
