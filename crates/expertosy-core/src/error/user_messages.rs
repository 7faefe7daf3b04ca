//! User-friendly error messages and classification
//!
//! Every failure that reaches the wizard boundary is turned into one of these
//! before it is shown. Nothing here retries; the suggestions only tell the
//! user which of the manual recovery paths (try again, start over) applies.

use super::types::{ExpertosyError, UnifiedError};

/// Error category for user-facing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Configuration issues
    Configuration,
    /// Backend could not be reached
    Network,
    /// Backend answered, but not with what we expected
    Backend,
    /// Questionnaire text could not be understood
    Questionnaire,
    /// Invalid user input
    UserInput,
    /// Local file system problems
    FileSystem,
    /// User-initiated cancellation
    Cancellation,
    /// Internal errors
    Internal,
}

impl ErrorCategory {
    /// Get a user-friendly category name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Configuration => "Configuration Error",
            Self::Network => "Network Error",
            Self::Backend => "Service Error",
            Self::Questionnaire => "Questionnaire Error",
            Self::UserInput => "Invalid Input",
            Self::FileSystem => "File System Error",
            Self::Cancellation => "Cancelled",
            Self::Internal => "Internal Error",
        }
    }
}

/// User-friendly error information
#[derive(Debug, Clone)]
pub struct UserFriendlyError {
    /// The error category
    pub category: ErrorCategory,
    /// User-friendly title/summary
    pub title: String,
    /// Detailed user-friendly message
    pub message: String,
    /// Suggested actions to resolve the error
    pub suggestions: Vec<String>,
    /// Whether trying the same step again may succeed
    pub is_recoverable: bool,
    /// Original technical error code
    pub error_code: String,
}

impl UserFriendlyError {
    /// Create a new user-friendly error
    pub fn new(
        category: ErrorCategory,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            title: title.into(),
            message: message.into(),
            suggestions: Vec::new(),
            is_recoverable: true,
            error_code: String::new(),
        }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Set whether the error is recoverable
    pub fn recoverable(mut self, is_recoverable: bool) -> Self {
        self.is_recoverable = is_recoverable;
        self
    }

    /// Set the technical error code
    pub fn with_error_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = code.into();
        self
    }

    /// Format the error for display
    pub fn format_display(&self) -> String {
        let mut output = format!(
            "{}: {}\n\n{}",
            self.category.display_name(),
            self.title,
            self.message
        );

        if !self.suggestions.is_empty() {
            output.push_str("\n\nSuggested actions:");
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("\n  {}. {}", i + 1, suggestion));
            }
        }

        output
    }
}

fn classify_http_status(status_code: Option<u16>) -> (&'static str, &'static str) {
    match status_code {
        Some(400) => (
            "The service rejected the request",
            "Rephrase your search and start over",
        ),
        Some(404) => (
            "The service endpoint was not found",
            "Check the API URL in your configuration",
        ),
        Some(429) => ("The service is busy", "Wait a moment and try again"),
        Some(code) if code >= 500 => (
            "The service had an internal problem",
            "Try again in a few seconds",
        ),
        _ => ("The service request failed", "Try again"),
    }
}

impl From<&ExpertosyError> for UserFriendlyError {
    fn from(error: &ExpertosyError) -> Self {
        let code = error.error_code().to_string();
        let friendly = match error {
            ExpertosyError::Network { message, .. } => UserFriendlyError::new(
                ErrorCategory::Network,
                "Could not reach the recommendation service",
                message.clone(),
            )
            .with_suggestion("Check your internet connection")
            .with_suggestion("Verify the API URL with 'expertosy config show'")
            .with_suggestion("Try again"),

            ExpertosyError::InvalidResponseShape { operation, message } => UserFriendlyError::new(
                ErrorCategory::Backend,
                "Received an invalid response from the server",
                format!("{}: {}", operation, message),
            )
            .with_suggestion("Try again"),

            ExpertosyError::ParseFailure { message, .. } => UserFriendlyError::new(
                ErrorCategory::Questionnaire,
                "Could not build a questionnaire",
                message.clone(),
            )
            .with_suggestion("Try again to get a freshly generated questionnaire")
            .with_suggestion("Start a new search with a more specific query"),

            ExpertosyError::Http {
                message,
                status_code,
                ..
            } => {
                let (title, suggestion) = classify_http_status(*status_code);
                UserFriendlyError::new(ErrorCategory::Backend, title, message.clone())
                    .with_suggestion(suggestion)
                    .recoverable(error.is_retryable())
            }

            ExpertosyError::Config { message, .. } => UserFriendlyError::new(
                ErrorCategory::Configuration,
                "Configuration problem",
                message.clone(),
            )
            .with_suggestion("Run 'expertosy config validate' to inspect the configuration")
            .with_suggestion("Run 'expertosy config init' to generate a default configuration")
            .recoverable(false),

            ExpertosyError::Io { message, path, .. } => UserFriendlyError::new(
                ErrorCategory::FileSystem,
                if path.is_some() {
                    "File operation failed"
                } else {
                    "I/O error"
                },
                message.clone(),
            )
            .with_suggestion("Check file permissions")
            .recoverable(false),

            ExpertosyError::Json { message, .. } => UserFriendlyError::new(
                ErrorCategory::Internal,
                "Data format error",
                message.clone(),
            )
            .recoverable(false),

            ExpertosyError::InvalidInput { message, field, .. } => UserFriendlyError::new(
                ErrorCategory::UserInput,
                match field {
                    Some(f) => format!("Invalid value for '{}'", f),
                    None => "Invalid input".to_string(),
                },
                message.clone(),
            )
            .with_suggestion("Check the input and try again")
            .recoverable(false),

            ExpertosyError::InvalidTransition { .. } => UserFriendlyError::new(
                ErrorCategory::Internal,
                "That action is not available right now",
                error.to_string(),
            )
            .with_suggestion("Start a new search")
            .recoverable(false),

            ExpertosyError::Cancelled => UserFriendlyError::new(
                ErrorCategory::Cancellation,
                "Operation cancelled",
                "The operation was cancelled by user request",
            )
            .recoverable(false),

            ExpertosyError::Other { message, .. } => UserFriendlyError::new(
                ErrorCategory::Internal,
                "Unexpected error",
                message.clone(),
            )
            .with_suggestion("Start a new search")
            .recoverable(false),
        };

        friendly.with_error_code(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_is_recoverable() {
        let err = ExpertosyError::network("connection refused");
        let friendly = UserFriendlyError::from(&err);
        assert_eq!(friendly.category, ErrorCategory::Network);
        assert!(friendly.is_recoverable);
        assert_eq!(friendly.error_code, "EXPERTOSY_NETWORK");
        assert!(!friendly.suggestions.is_empty());
    }

    #[test]
    fn test_parse_failure_suggests_new_search() {
        let err = ExpertosyError::parse_failure("no questions");
        let friendly = UserFriendlyError::from(&err);
        assert_eq!(friendly.category, ErrorCategory::Questionnaire);
        assert!(friendly.suggestions.iter().any(|s| s.contains("new search")));
    }

    #[test]
    fn test_client_http_error_not_recoverable() {
        let err = ExpertosyError::http_with_status("Search query is required", 400);
        let friendly = UserFriendlyError::from(&err);
        assert!(!friendly.is_recoverable);
        assert_eq!(friendly.title, "The service rejected the request");
    }

    #[test]
    fn test_format_display_lists_suggestions() {
        let friendly = UserFriendlyError::new(ErrorCategory::Network, "Offline", "no route")
            .with_suggestion("Reconnect");
        let text = friendly.format_display();
        assert!(text.starts_with("Network Error: Offline"));
        assert!(text.contains("1. Reconnect"));
    }
}
