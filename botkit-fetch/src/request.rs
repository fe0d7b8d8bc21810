//! Request descriptors.
//!
//! A [`FetchRequest`] describes one logical call: endpoint, query, method,
//! body and optional retry/timeout overrides. The [`Fetcher`](crate::Fetcher)
//! resolves it against its base URL into an [`OutboundRequest`], which is
//! what a [`Transport`](crate::Transport) actually sends on every attempt.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;

use crate::error::FetchError;

// ============================================================================
// HTTP Method
// ============================================================================

/// HTTP methods the fetcher issues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    #[default]
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

// ============================================================================
// Request Body
// ============================================================================

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Serialized as JSON, sent as `application/json`.
    Json(serde_json::Value),
    /// Sent as `text/plain`.
    Text(String),
    /// Sent as `application/octet-stream`.
    Binary(Vec<u8>),
}

impl RequestBody {
    /// Content type announced for this body.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Json(_) => "application/json",
            Self::Text(_) => "text/plain; charset=utf-8",
            Self::Binary(_) => "application/octet-stream",
        }
    }

    /// Returns the encoded bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Json(value) => value.to_string().into_bytes(),
            Self::Text(text) => text.as_bytes().to_vec(),
            Self::Binary(bytes) => bytes.clone(),
        }
    }
}

// ============================================================================
// Fetch Request
// ============================================================================

/// One logical request, retried as a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    /// Path joined onto the fetcher's base URL.
    pub endpoint: String,
    /// Query parameters, in order.
    pub query: Vec<(String, String)>,
    /// HTTP method.
    pub method: HttpMethod,
    /// Optional payload.
    pub body: Option<RequestBody>,
    /// Extra headers for this request only.
    pub headers: Vec<(String, String)>,
    /// Overrides the fetcher's attempt count.
    pub retry_count: Option<u32>,
    /// Overrides the fetcher's per-attempt timeout.
    pub timeout: Option<Duration>,
}

impl FetchRequest {
    /// Creates a request for `endpoint` with the given method.
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            query: Vec::new(),
            method,
            body: None,
            headers: Vec::new(),
            retry_count: None,
            timeout: None,
        }
    }

    /// Creates a GET request.
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, endpoint)
    }

    /// Creates a POST request.
    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, endpoint)
    }

    /// Creates a PATCH request.
    pub fn patch(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, endpoint)
    }

    /// Creates a PUT request.
    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, endpoint)
    }

    /// Creates a DELETE request.
    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, endpoint)
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Appends several query parameters.
    #[must_use]
    pub fn query_pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Adds a header for this request.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets a JSON body.
    #[must_use]
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// Serializes `body` and sets it as the JSON body.
    pub fn try_json<B: Serialize + ?Sized>(self, body: &B) -> Result<Self, FetchError> {
        Ok(self.json(serde_json::to_value(body)?))
    }

    /// Sets a text body.
    #[must_use]
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Text(body.into()));
        self
    }

    /// Sets a raw binary body.
    #[must_use]
    pub fn binary(mut self, body: Vec<u8>) -> Self {
        self.body = Some(RequestBody::Binary(body));
        self
    }

    /// Overrides the number of attempts.
    #[must_use]
    pub fn retries(mut self, retry_count: u32) -> Self {
        self.retry_count = Some(retry_count);
        self
    }

    /// Overrides the per-attempt timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

// ============================================================================
// Outbound Request
// ============================================================================

/// A fully resolved request, as handed to a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute URL including the query string.
    pub url: Url,
    /// Headers, in insertion order.
    pub headers: Vec<(String, String)>,
    /// Optional payload.
    pub body: Option<RequestBody>,
}

impl OutboundRequest {
    /// Returns the first header with `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
