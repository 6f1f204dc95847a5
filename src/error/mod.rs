//! Error types for recette.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Upper bound on how much of a service error body is kept in messages.
pub const BODY_SNIPPET_LIMIT: usize = 512;

/// Primary error type for all recette operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecetteError {
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("{status}: {body}")]
    Service { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Copyable discriminant of [`RecetteError`], carried in failed states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    MissingCredential,
    Network,
    Service,
    MalformedResponse,
    Decode,
    Configuration,
    Io,
}

impl RecetteError {
    /// Create a service error, keeping only a snippet of the body.
    pub fn service(status: u16, body: impl AsRef<str>) -> Self {
        Self::Service {
            status,
            body: snippet(body.as_ref(), BODY_SNIPPET_LIMIT),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredential(_) => ErrorKind::MissingCredential,
            Self::Network(_) => ErrorKind::Network,
            Self::Service { .. } => ErrorKind::Service,
            Self::MalformedResponse(_) => ErrorKind::MalformedResponse,
            Self::Decode(_) => ErrorKind::Decode,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Whether a caller could reasonably try the same request again.
    ///
    /// The orchestrator never retries on its own; this is for callers that
    /// want to offer a "try again" affordance.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Service { status, .. } => *status == 429 || (500..=599).contains(status),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for RecetteError {
    fn from(err: reqwest::Error) -> Self {
        let detail = if err.is_timeout() {
            "request timed out"
        } else if err.is_connect() {
            "connection failed"
        } else if err.is_body() || err.is_decode() {
            "failed to read response body"
        } else {
            "request failed"
        };
        Self::Network(format!("{detail}: {err}"))
    }
}

impl From<std::io::Error> for RecetteError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Truncate `text` to at most `limit` bytes on a char boundary.
pub(crate) fn snippet(text: &str, limit: usize) -> String {
    if text.len() <= limit {
        return text.to_string();
    }
    let mut end = limit;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, RecetteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_message_is_status_then_body() {
        let err = RecetteError::service(401, r#"{"error":"invalid key"}"#);
        assert_eq!(err.to_string(), r#"401: {"error":"invalid key"}"#);
        assert_eq!(err.kind(), ErrorKind::Service);
    }

    #[test]
    fn service_body_is_truncated_on_char_boundary() {
        let body = "é".repeat(BODY_SNIPPET_LIMIT);
        let err = RecetteError::service(500, &body);
        let RecetteError::Service { body: kept, .. } = err else {
            panic!("expected service error");
        };
        assert!(kept.ends_with("..."));
        assert!(kept.len() <= BODY_SNIPPET_LIMIT + 3);
    }

    #[test]
    fn retryable_classification() {
        assert!(RecetteError::Network("reset".into()).is_retryable());
        assert!(RecetteError::service(503, "busy").is_retryable());
        assert!(RecetteError::service(429, "slow down").is_retryable());
        assert!(!RecetteError::service(401, "nope").is_retryable());
        assert!(!RecetteError::malformed("missing `choices`").is_retryable());
        assert!(!RecetteError::MissingCredential("OPENAI_API_KEY".into()).is_retryable());
    }

    #[test]
    fn error_kind_displays_snake_case() {
        assert_eq!(ErrorKind::MalformedResponse.to_string(), "malformed_response");
        assert_eq!("missing_credential".parse::<ErrorKind>().unwrap(), ErrorKind::MissingCredential);
    }
}
