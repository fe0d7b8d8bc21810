//! Fetch error types.

use thiserror::Error;

use crate::response::is_server_error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for fetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// An attempt did not settle before its deadline.
    #[error("Request timed out after {timeout_ms} ms")]
    Timeout {
        /// The per-attempt timeout that elapsed.
        timeout_ms: u64,
    },

    /// The server answered with an unsuccessful status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// Response status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// Binary mode got a response that is not octet-stream or an image.
    #[error("Unexpected content type: {0}")]
    UnexpectedContentType(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(#[from] HttpError),

    /// Every attempt failed with a retryable error.
    #[error("Request failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Number of attempts made.
        attempts: u32,
        /// The error from the final attempt.
        #[source]
        last: Box<FetchError>,
    },

    /// The base URL or endpoint could not be turned into a URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The request descriptor is unusable (zero attempts, zero timeout).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl FetchError {
    /// Returns true if another attempt may succeed.
    ///
    /// Server errors (5xx), timeouts, transport failures and decode failures
    /// are retryable. Any other HTTP status is final.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. }
            | Self::Transport(_)
            | Self::Decode(_)
            | Self::UnexpectedContentType(_) => true,
            Self::Http { status, .. } => is_server_error(*status),
            Self::RetriesExhausted { .. } | Self::InvalidUrl(_) | Self::InvalidRequest(_) => {
                false
            }
        }
    }

    /// Returns the error from the final attempt, unwrapping
    /// [`FetchError::RetriesExhausted`].
    pub fn last_error(&self) -> &FetchError {
        match self {
            Self::RetriesExhausted { last, .. } => last.last_error(),
            other => other,
        }
    }

    /// Returns true if the (final) attempt timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self.last_error(), Self::Timeout { .. })
    }

    /// Returns the HTTP status of the (final) attempt, if it got one.
    pub fn status(&self) -> Option<u16> {
        match self.last_error() {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ============================================================================
// HTTP Error
// ============================================================================

/// Transport-level error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Connection failed outside of reqwest (custom transports).
    #[error("Connection error: {0}")]
    Connection(String),

    /// A header name or value was rejected.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}
