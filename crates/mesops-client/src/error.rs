//! Client error types.

use std::time::Duration;

use mesops_proto::UnionError;
use thiserror::Error;

use crate::recordio::RecordIoError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to a master or agent.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a status outside 2xx. Never retried.
    #[error("request failed: status_code: {status} msg: {message}")]
    Http { status: u16, message: String },

    /// Connection, TLS, timeout or body transfer failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Every attempt failed with a retryable error.
    #[error("exceeded {retries} retries: {source}")]
    RetriesExhausted {
        retries: u32,
        #[source]
        source: Box<ClientError>,
    },

    /// The call's cancellation token fired.
    #[error("call cancelled")]
    Cancelled,

    /// The call's deadline passed.
    #[error("call timed out after {0:?}")]
    TimedOut(Duration),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Protobuf decoding error.
    #[error("protobuf error: {0}")]
    Decode(#[from] prost::DecodeError),

    /// A message whose type and payload disagree.
    #[error("malformed message: {0}")]
    Malformed(#[from] UnionError),

    /// Invalid RecordIO framing on a stream.
    #[error("RecordIO error: {0}")]
    Frame(#[from] RecordIoError),

    /// The server answered a call with a response of another type.
    #[error("unexpected response: expected {expected}, got {actual}")]
    UnexpectedResponse {
        expected: &'static str,
        actual: &'static str,
    },

    /// The server answered with an empty body where a payload was expected.
    #[error("empty response: expected {0}")]
    EmptyResponse(&'static str),

    /// Invalid server URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Invalid client configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The background task running the call panicked.
    #[error("call task failed: {0}")]
    Task(String),
}

impl ClientError {
    /// Create an HTTP status error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether another attempt may succeed. Only transport failures qualify.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Io(_))
    }

    /// The HTTP status, if the server answered with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::RetriesExhausted { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Whether the error comes from cancellation or a deadline.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled | Self::TimedOut(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let errors = vec![
            (
                ClientError::http(400, "bad call"),
                "request failed: status_code: 400 msg: bad call",
            ),
            (ClientError::Cancelled, "call cancelled"),
            (
                ClientError::TimedOut(Duration::from_millis(250)),
                "call timed out after 250ms",
            ),
            (
                ClientError::UnexpectedResponse {
                    expected: "GET_HEALTH",
                    actual: "GET_FLAGS",
                },
                "unexpected response: expected GET_HEALTH, got GET_FLAGS",
            ),
            (
                ClientError::EmptyResponse("GET_STATE"),
                "empty response: expected GET_STATE",
            ),
            (
                ClientError::config("no url"),
                "invalid configuration: no url",
            ),
        ];

        for (error, expected) in errors {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_retries_exhausted_display_wraps_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = ClientError::RetriesExhausted {
            retries: 3,
            source: Box::new(ClientError::Io(io)),
        };
        assert_eq!(err.to_string(), "exceeded 3 retries: IO error: refused");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_retryable_classification() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        assert!(ClientError::Io(io).is_retryable());
        assert!(!ClientError::http(503, "unavailable").is_retryable());
        assert!(!ClientError::Cancelled.is_retryable());
        assert!(!ClientError::EmptyResponse("GET_HEALTH").is_retryable());
    }

    #[test]
    fn test_status() {
        let err = ClientError::RetriesExhausted {
            retries: 1,
            source: Box::new(ClientError::http(500, "boom")),
        };
        assert_eq!(err.status(), Some(500));
        assert_eq!(ClientError::Cancelled.status(), None);
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: ClientError = json_err.into();
        assert!(err.to_string().contains("JSON error"));
        assert!(!err.is_retryable());
    }
}
