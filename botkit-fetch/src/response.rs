//! Raw responses and body decoding.

use serde::de::DeserializeOwned;

use crate::error::FetchError;

/// A response as read off the wire, body fully buffered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Value of the `Content-Type` header, if any.
    pub content_type: Option<String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Creates a response.
    pub fn new(status: u16, content_type: Option<&str>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: content_type.map(str::to_owned),
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// Returns the body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Returns the lowercased media type without parameters
    /// (`image/png; q=1` becomes `image/png`).
    pub fn media_type(&self) -> Option<String> {
        self.content_type.as_deref().map(|value| {
            value
                .split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase()
        })
    }

    /// Converts an unsuccessful response into [`FetchError::Http`].
    pub fn into_http_error(self) -> FetchError {
        FetchError::Http {
            status: self.status,
            body: self.text(),
        }
    }
}

/// Returns true for 5xx statuses, the ones worth another attempt.
pub(crate) fn is_server_error(status: u16) -> bool {
    (500..=599).contains(&status)
}

/// Deserializes a JSON body.
pub fn decode_json<T: DeserializeOwned>(response: RawResponse) -> Result<T, FetchError> {
    Ok(serde_json::from_slice(&response.body)?)
}

/// Accepts only `application/octet-stream` and `image/*` bodies.
pub fn decode_binary(response: RawResponse) -> Result<Vec<u8>, FetchError> {
    match response.media_type() {
        Some(media) if is_binary_media(&media) => Ok(response.body),
        Some(media) => Err(FetchError::UnexpectedContentType(media)),
        None => Err(FetchError::UnexpectedContentType("<missing>".to_string())),
    }
}

/// Discards the body.
#[allow(clippy::needless_pass_by_value, clippy::unnecessary_wraps)]
pub fn decode_empty(_response: RawResponse) -> Result<(), FetchError> {
    Ok(())
}

fn is_binary_media(media: &str) -> bool {
    media == "application/octet-stream" || media.starts_with("image/")
}
