//! Constructor methods for ExpertosyError

use super::types::ExpertosyError;

impl ExpertosyError {
    /// Create a new network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            url: None,
            context: None,
        }
    }

    /// Create a network error for a specific URL
    pub fn network_with_url(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            url: Some(url.into()),
            context: None,
        }
    }

    /// Create an invalid response shape error for a backend operation
    pub fn invalid_response(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidResponseShape {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a new parse failure
    pub fn parse_failure(message: impl Into<String>) -> Self {
        Self::ParseFailure {
            message: message.into(),
            context: None,
        }
    }

    /// Create a parse failure with context
    pub fn parse_failure_with_context(
        message: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self::ParseFailure {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create a new HTTP error
    pub fn http(message: impl Into<String>) -> Self {
        Self::Http {
            message: message.into(),
            url: None,
            status_code: None,
            context: None,
        }
    }

    /// Create an HTTP error with status code
    pub fn http_with_status(message: impl Into<String>, status_code: u16) -> Self {
        Self::Http {
            message: message.into(),
            url: None,
            status_code: Some(status_code),
            context: None,
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: None,
        }
    }

    /// Create a configuration error with context
    pub fn config_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create a new IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
            context: None,
        }
    }

    /// Create an IO error with path
    pub fn io_with_path(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.into()),
            context: None,
        }
    }

    /// Create a new JSON error
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json {
            message: message.into(),
            context: None,
        }
    }

    /// Create a new invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: None,
            context: None,
        }
    }

    /// Create an invalid input error for a named field
    pub fn invalid_input_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: Some(field.into()),
            context: None,
        }
    }

    /// Create an invalid transition error
    pub fn invalid_transition(action: impl Into<String>, state: impl Into<String>) -> Self {
        Self::InvalidTransition {
            action: action.into(),
            state: state.into(),
        }
    }

    /// Create a generic error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
            context: None,
        }
    }

    /// Attach context to errors that carry a context field
    pub fn with_context(mut self, new_context: impl Into<String>) -> Self {
        match &mut self {
            Self::Network { context, .. }
            | Self::ParseFailure { context, .. }
            | Self::Http { context, .. }
            | Self::Config { context, .. }
            | Self::Io { context, .. }
            | Self::Json { context, .. }
            | Self::InvalidInput { context, .. }
            | Self::Other { context, .. } => *context = Some(new_context.into()),
            Self::InvalidResponseShape { .. }
            | Self::InvalidTransition { .. }
            | Self::Cancelled => {}
        }
        self
    }

    /// Whether this error belongs to the recommendation flow taxonomy
    /// (network, response shape, parse) rather than local misuse
    pub fn is_flow_failure(&self) -> bool {
        matches!(
            self,
            Self::Network { .. }
                | Self::InvalidResponseShape { .. }
                | Self::ParseFailure { .. }
                | Self::Http { .. }
        )
    }
}
