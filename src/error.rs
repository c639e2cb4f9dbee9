use serde_json::Value;
use std::fmt;

/// Failure reported by the Snake Query API or its transport.
///
/// Constructed at the point a failure is detected and propagated
/// unchanged; the client never retries.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Human-readable description of the failure.
    pub message: String,
    /// HTTP status, or the server-reported `code`, when one exists.
    /// Plain connectivity failures carry no status.
    pub status: Option<u16>,
    /// The parsed (or synthesized fallback) response body, when the
    /// failure happened after a response was received.
    pub response: Option<Value>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "[status {}] {}", status, self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ApiError {}

/// Errors returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid arguments, rejected before any network activity.
    #[error("{0}")]
    InvalidArgument(String),

    /// Failure from the API or the transport.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Configuration error (key resolution, HTTP client construction).
    #[error("configuration error: {0}")]
    Config(#[from] anyhow::Error),
}

impl Error {
    /// HTTP status or server-reported code, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(e) => e.status,
            _ => None,
        }
    }

    /// Response body attached to the failure, if any.
    pub fn response(&self) -> Option<&Value> {
        match self {
            Error::Api(e) => e.response.as_ref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
