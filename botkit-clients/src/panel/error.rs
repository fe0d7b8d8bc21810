//! Panel-specific errors.

use botkit_fetch::FetchError;
use thiserror::Error;

/// Panel-specific errors.
#[derive(Debug, Error)]
pub enum PanelError {
    /// No panel URL configured.
    #[error("Panel base URL not configured")]
    MissingBaseUrl,

    /// No API key in the configured environment variable.
    #[error("No panel API key found in ${0}")]
    MissingApiKey(String),

    /// The key was rejected (401/403).
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The user or server does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The panel rejected the payload (422).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Any other fetch failure.
    #[error(transparent)]
    Fetch(FetchError),
}

impl From<FetchError> for PanelError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Http { status: 401 | 403, body } => PanelError::AuthenticationFailed(body),
            FetchError::Http { status: 404, body } => PanelError::NotFound(body),
            FetchError::Http { status: 422, body } => PanelError::Validation(body),
            other => PanelError::Fetch(other),
        }
    }
}
