//! Retrying fetcher.
//!
//! Every call runs the same loop:
//!
//! ```text
//! attempt 1..=retry_count
//!   timeout(send + read body)
//!     2xx       -> decode -> Ok | decode error (retryable)
//!     5xx       -> retryable
//!     other     -> FetchError::Http, stop
//!     elapsed   -> FetchError::Timeout (retryable)
//!     transport -> retryable
//! out of attempts -> FetchError::RetriesExhausted { last }
//! ```
//!
//! Attempts are strictly sequential. The deadline is a
//! [`tokio::time::timeout`] around the attempt future, so a late response
//! is cancelled by dropping it and the timer never outlives its attempt.

use botkit_core::FetchConfig;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, instrument, warn};
use url::Url;

use crate::error::FetchError;
use crate::host::http::HttpClient;
use crate::request::{FetchRequest, OutboundRequest};
use crate::response::{decode_binary, decode_empty, decode_json, RawResponse};
use crate::retry::RetryPolicy;
use crate::transport::Transport;

const ACCEPT_JSON: &str = "application/json";
const ACCEPT_BINARY: &str = "application/octet-stream, image/*";
const ACCEPT_ANY: &str = "*/*";

/// HTTP fetcher with bounded retries and per-attempt timeouts.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct Fetcher {
    transport: Arc<dyn Transport>,
    base_url: Url,
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
    policy: RetryPolicy,
}

impl Fetcher {
    /// Creates a fetcher for `base_url` using the reqwest transport.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Self::with_transport(base_url, Arc::new(HttpClient::new()?))
    }

    /// Creates a fetcher from the `fetch` configuration section.
    pub fn from_config(base_url: &str, config: &FetchConfig) -> Result<Self, FetchError> {
        let transport = HttpClient::with_user_agent(&config.user_agent)?;
        let fetcher = Self::with_transport(base_url, Arc::new(transport))?
            .with_policy(RetryPolicy::from(config));
        fetcher.policy.validate()?;
        Ok(fetcher)
    }

    /// Creates a fetcher that sends through `transport`.
    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(format!(
                "{base_url}: cannot be used as a base"
            )));
        }

        Ok(Self {
            transport,
            base_url,
            headers: Vec::new(),
            query: Vec::new(),
            policy: RetryPolicy::default(),
        })
    }

    /// Sets the default retry policy for requests that do not override it.
    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Adds a header sent with every request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Adds a query parameter sent with every request, ahead of the
    /// request's own parameters.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the default retry policy.
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Fetches `request` and deserializes the JSON body into `T`.
    pub async fn fetch_json<T: DeserializeOwned>(&self, request: FetchRequest) -> Result<T, FetchError> {
        self.execute(&request, ACCEPT_JSON, decode_json::<T>).await
    }

    /// Fetches `request` and returns the raw body.
    ///
    /// Only `application/octet-stream` and `image/*` responses are accepted;
    /// anything else fails the attempt.
    pub async fn fetch_binary(&self, request: FetchRequest) -> Result<Vec<u8>, FetchError> {
        self.execute(&request, ACCEPT_BINARY, decode_binary).await
    }

    /// Fetches `request`, accepting any 2xx and discarding the body.
    pub async fn fetch_empty(&self, request: FetchRequest) -> Result<(), FetchError> {
        self.execute(&request, ACCEPT_ANY, decode_empty).await
    }

    /// Resolves `request` against the base URL and default headers.
    pub fn prepare(&self, request: &FetchRequest, accept: &str) -> Result<OutboundRequest, FetchError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| FetchError::InvalidUrl(self.base_url.to_string()))?;
            segments.pop_if_empty();
            for segment in request.endpoint.split('/').filter(|s| !s.is_empty()) {
                segments.push(segment);
            }
        }

        if !self.query.is_empty() || !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in self.query.iter().chain(&request.query) {
                pairs.append_pair(key, value);
            }
        }

        let mut headers = vec![("Accept".to_string(), accept.to_string())];
        if let Some(body) = &request.body {
            headers.push(("Content-Type".to_string(), body.content_type().to_string()));
        }
        headers.extend(self.headers.iter().cloned());
        headers.extend(request.headers.iter().cloned());

        Ok(OutboundRequest {
            method: request.method,
            url,
            headers,
            body: request.body.clone(),
        })
    }

    fn policy_for(&self, request: &FetchRequest) -> RetryPolicy {
        let mut policy = self.policy;
        if let Some(retry_count) = request.retry_count {
            policy.max_attempts = retry_count;
        }
        if let Some(timeout) = request.timeout {
            policy.timeout = timeout;
        }
        policy
    }

    #[instrument(
        name = "fetch",
        skip(self, request, accept, decode),
        fields(method = %request.method, endpoint = %request.endpoint)
    )]
    async fn execute<T, D>(&self, request: &FetchRequest, accept: &str, decode: D) -> Result<T, FetchError>
    where
        D: Fn(RawResponse) -> Result<T, FetchError>,
    {
        let policy = self.policy_for(request);
        policy.validate()?;
        let outbound = self.prepare(request, accept)?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            let started = Instant::now();
            debug!(attempt, max_attempts = policy.max_attempts, url = %outbound.url, "Sending request");

            let failure = match self.attempt(&outbound, &policy).await {
                Ok(response) if response.is_success() => match decode(response) {
                    Ok(value) => {
                        debug!(attempt, elapsed_ms = elapsed_ms(started), "Request succeeded");
                        return Ok(value);
                    }
                    Err(e) => e,
                },
                Ok(response) => response.into_http_error(),
                Err(e) => e,
            };

            if !failure.is_retryable() {
                warn!(attempt, error = %failure, "Request failed, not retrying");
                return Err(failure);
            }

            if !policy.has_attempts_left(attempt) {
                error!(attempts = attempt, error = %failure, "Request failed, retries exhausted");
                return Err(FetchError::RetriesExhausted {
                    attempts: attempt,
                    last: Box::new(failure),
                });
            }

            match &failure {
                FetchError::Timeout { timeout_ms } => {
                    warn!(attempt, timeout_ms, "Request timed out, retrying");
                }
                FetchError::Http { status, .. } => {
                    warn!(attempt, status, "Server error, retrying");
                }
                other => warn!(attempt, error = %other, "Request failed, retrying"),
            }

            if !policy.backoff.is_zero() {
                tokio::time::sleep(policy.backoff).await;
            }
        }
    }

    async fn attempt(&self, request: &OutboundRequest, policy: &RetryPolicy) -> Result<RawResponse, FetchError> {
        match tokio::time::timeout(policy.timeout, self.transport.send(request)).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(FetchError::Timeout {
                timeout_ms: policy.timeout_ms(),
            }),
        }
    }
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("base_url", &self.base_url.as_str())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

// ============================================================================
// Tests
// ============================================================================
