// ── Core error types ──
//
// User-facing errors from lazyfetch-core. Consumers never see raw
// transport errors: everything is normalized to a message suitable for
// the alert sink before it leaves the engine.

use thiserror::Error;

/// A response body did not match the shape the parser expected.
#[derive(Debug, Error)]
#[error("Response did not match the expected shape: {message}")]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Unified failure type for a single fetch invocation.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (network, non-success status, bad JSON).
    #[error(transparent)]
    Api(#[from] lazyfetch_api::Error),

    /// The body was JSON but the parser rejected its shape.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl FetchError {
    /// Human-readable message dispatched to the alert sink.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(lazyfetch_api::Error::Transport(e)) => {
                format!("Could not reach the server: {e}")
            }
            Self::Api(lazyfetch_api::Error::Status { status, message }) => {
                format!("The server responded with HTTP {status}: {message}")
            }
            Self::Api(lazyfetch_api::Error::Decode { message, .. }) => {
                format!("The server response was not valid JSON: {message}")
            }
            Self::Api(lazyfetch_api::Error::InvalidUrl(e)) => {
                format!("Invalid request URL: {e}")
            }
            Self::Api(lazyfetch_api::Error::Tls(msg)) => format!("TLS error: {msg}"),
            Self::Api(lazyfetch_api::Error::Cancelled) => "Request cancelled".into(),
            Self::Parse(e) => e.to_string(),
        }
    }

    /// Returns `true` if this failure is a caller-driven cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Api(lazyfetch_api::Error::Cancelled))
    }
}
