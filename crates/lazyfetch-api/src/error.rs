use thiserror::Error;

/// Top-level error type for the `lazyfetch-api` crate.
///
/// The three failure classes the fetch engine distinguishes are all
/// here: the request never completed (`Transport`), the server answered
/// with a non-success status (`Status`), or the body was not JSON
/// (`Decode`). `lazyfetch-core` adds shape-mismatch parse failures on
/// top and maps everything into user-facing messages.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport error (connection refused, DNS failure, browser-level
    /// timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status returned by the server.
    #[error("Server returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body could not be parsed as JSON.
    #[error("Response body is not valid JSON: {message}")]
    Decode { message: String, body: String },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// The request was cancelled through its cancellation token.
    #[error("Request cancelled")]
    Cancelled,
}

impl Error {
    /// Returns `true` if this is a transient error a caller might retry.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// Returns `true` if the request was cancelled rather than failed.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
