//! From trait implementations for ExpertosyError conversions

use super::types::ExpertosyError;
use crate::questionnaire::ParseError;

impl From<anyhow::Error> for ExpertosyError {
    fn from(error: anyhow::Error) -> Self {
        Self::other(error.to_string())
    }
}

impl From<std::io::Error> for ExpertosyError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for ExpertosyError {
    fn from(error: serde_json::Error) -> Self {
        Self::json(error.to_string())
    }
}

impl From<reqwest::Error> for ExpertosyError {
    fn from(error: reqwest::Error) -> Self {
        let url = error.url().map(|u| u.to_string());

        if let Some(status) = error.status() {
            return Self::Http {
                message: error.to_string(),
                url,
                status_code: Some(status.as_u16()),
                context: None,
            };
        }

        if error.is_decode() {
            return Self::InvalidResponseShape {
                operation: url.unwrap_or_else(|| "backend".to_string()),
                message: error.to_string(),
            };
        }

        Self::Network {
            message: error.to_string(),
            url,
            context: if error.is_timeout() {
                Some("Request timed out".to_string())
            } else if error.is_connect() {
                Some("Could not connect to the backend".to_string())
            } else {
                None
            },
        }
    }
}

impl From<ParseError> for ExpertosyError {
    fn from(error: ParseError) -> Self {
        Self::ParseFailure {
            message: error.to_string(),
            context: None,
        }
    }
}
