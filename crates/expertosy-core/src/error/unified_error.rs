//! UnifiedError trait implementation for ExpertosyError

use super::types::{ExpertosyError, UnifiedError};

impl UnifiedError for ExpertosyError {
    fn error_code(&self) -> &str {
        match self {
            Self::Network { .. } => "EXPERTOSY_NETWORK",
            Self::InvalidResponseShape { .. } => "EXPERTOSY_INVALID_RESPONSE",
            Self::ParseFailure { .. } => "EXPERTOSY_PARSE",
            Self::Http { .. } => "EXPERTOSY_HTTP",
            Self::Config { .. } => "EXPERTOSY_CONFIG",
            Self::Io { .. } => "EXPERTOSY_IO",
            Self::Json { .. } => "EXPERTOSY_JSON",
            Self::InvalidInput { .. } => "EXPERTOSY_INVALID_INPUT",
            Self::InvalidTransition { .. } => "EXPERTOSY_INVALID_TRANSITION",
            Self::Cancelled => "EXPERTOSY_CANCELLED",
            Self::Other { .. } => "EXPERTOSY_OTHER",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Network { message, .. } => message,
            Self::InvalidResponseShape { message, .. } => message,
            Self::ParseFailure { message, .. } => message,
            Self::Http { message, .. } => message,
            Self::Config { message, .. } => message,
            Self::Io { message, .. } => message,
            Self::Json { message, .. } => message,
            Self::InvalidInput { message, .. } => message,
            Self::InvalidTransition { action, .. } => action,
            Self::Cancelled => "Operation was cancelled",
            Self::Other { message, .. } => message,
        }
    }

    fn context(&self) -> Option<&str> {
        match self {
            Self::Network { context, .. } => context.as_deref(),
            Self::ParseFailure { context, .. } => context.as_deref(),
            Self::Http { context, .. } => context.as_deref(),
            Self::Config { context, .. } => context.as_deref(),
            Self::Io { context, .. } => context.as_deref(),
            Self::Json { context, .. } => context.as_deref(),
            Self::InvalidInput { context, .. } => context.as_deref(),
            Self::Other { context, .. } => context.as_deref(),
            Self::InvalidResponseShape { .. } | Self::InvalidTransition { .. } | Self::Cancelled => {
                None
            }
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } | Self::InvalidResponseShape { .. } | Self::ParseFailure { .. } => {
                true
            }
            Self::Http { status_code, .. } => match status_code {
                Some(code) => *code >= 500 || *code == 429 || *code == 408,
                None => true,
            },
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_distinct_per_taxonomy() {
        assert_eq!(
            ExpertosyError::network("down").error_code(),
            "EXPERTOSY_NETWORK"
        );
        assert_eq!(
            ExpertosyError::invalid_response("generate-factors", "missing factors").error_code(),
            "EXPERTOSY_INVALID_RESPONSE"
        );
        assert_eq!(
            ExpertosyError::parse_failure("no questions").error_code(),
            "EXPERTOSY_PARSE"
        );
    }

    #[test]
    fn test_retryable_http_statuses() {
        assert!(ExpertosyError::http_with_status("boom", 500).is_retryable());
        assert!(ExpertosyError::http_with_status("slow down", 429).is_retryable());
        assert!(!ExpertosyError::http_with_status("bad request", 400).is_retryable());
        assert!(!ExpertosyError::Cancelled.is_retryable());
    }

    #[test]
    fn test_with_context_sets_context() {
        let err = ExpertosyError::network("refused").with_context("generate-factors");
        assert_eq!(err.context(), Some("generate-factors"));

        let err = ExpertosyError::Cancelled.with_context("ignored");
        assert_eq!(err.context(), None);
    }
}
