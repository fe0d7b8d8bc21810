//! The seam between the retry loop and the network.

use async_trait::async_trait;

use crate::error::HttpError;
use crate::request::OutboundRequest;
use crate::response::RawResponse;

/// Sends one request and buffers the full response.
///
/// A transport makes exactly one attempt; retries and deadlines belong to
/// the [`Fetcher`](crate::Fetcher). The returned future must be safe to drop
/// at any `.await` point, since a timed-out attempt is cancelled that way.
///
/// ## Implementing a Transport
///
/// ```ignore
/// struct AlwaysTeapot;
///
/// #[async_trait]
/// impl Transport for AlwaysTeapot {
///     async fn send(&self, _request: &OutboundRequest) -> Result<RawResponse, HttpError> {
///         Ok(RawResponse::new(418, Some("text/plain"), "short and stout"))
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and reads the whole body.
    ///
    /// Non-2xx statuses are returned as responses, not errors.
    async fn send(&self, request: &OutboundRequest) -> Result<RawResponse, HttpError>;
}
