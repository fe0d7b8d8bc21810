//! reqwest-backed transport with tracing.
//!
//! This module provides the production [`Transport`]:
//! - Request/response tracing
//! - Header validation before anything is sent
//! - Full body buffering so the caller's deadline covers the download

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::{debug, instrument};

use crate::error::HttpError;
use crate::request::OutboundRequest;
use crate::response::RawResponse;
use crate::transport::Transport;

/// User agent string for botkit.
pub const USER_AGENT: &str = concat!("botkit/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP transport wrapper with tracing.
///
/// No client-level timeout is configured; the fetcher puts a deadline on
/// every attempt instead.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    /// Creates a client with the default user agent.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_user_agent(USER_AGENT)
    }

    /// Creates a client with a custom user agent.
    pub fn with_user_agent(user_agent: &str) -> Result<Self, HttpError> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { inner: client })
    }

    /// Wraps a preconfigured reqwest client (proxies, TLS roots, pools).
    pub fn from_client(client: Client) -> Self {
        Self { inner: client }
    }

    /// Returns the inner reqwest client for advanced operations.
    pub fn inner(&self) -> &Client {
        &self.inner
    }
}

#[async_trait]
impl Transport for HttpClient {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: &OutboundRequest) -> Result<RawResponse, HttpError> {
        let mut builder = self
            .inner
            .request(request.method.into(), request.url.clone());

        for (name, value) in &request.headers {
            let name = header::HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| HttpError::InvalidHeader(format!("{name}: {e}")))?;
            let value = header::HeaderValue::from_str(value)
                .map_err(|e| HttpError::InvalidHeader(format!("{name}: {e}")))?;
            builder = builder.header(name, value);
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.to_bytes());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        debug!(status, content_type = ?content_type, "Response received");

        let body = response.bytes().await?.to_vec();
        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
