// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # botkit Fetch
//!
//! Resilient HTTP fetching for the botkit clients.
//!
//! - [`Fetcher`] - retrying JSON/binary fetch with per-attempt timeouts
//! - [`FetchRequest`] - request descriptor (endpoint, query, method, body)
//! - [`RetryPolicy`] - attempt count, timeout and backoff
//! - [`Transport`] - the network seam; [`HttpClient`] is the reqwest one
//! - [`FetchError`] - timeout, HTTP, decode and exhausted-retry failures
//!
//! ## Example
//!
//! ```ignore
//! use botkit_fetch::{Fetcher, FetchRequest};
//!
//! let fetcher = Fetcher::new("https://api.example.com/api")?;
//!
//! let results: serde_json::Value = fetcher
//!     .fetch_json(FetchRequest::get("search/youtube").query("query", "lofi"))
//!     .await?;
//!
//! let png = fetcher
//!     .fetch_binary(FetchRequest::get("tools/ssweb").query("url", "https://example.com").retries(1))
//!     .await?;
//! ```

pub mod client;
pub mod error;
pub mod host;
pub mod request;
pub mod response;
pub mod retry;
pub mod transport;

pub use client::Fetcher;
pub use error::{FetchError, HttpError};
pub use host::http::HttpClient;
pub use request::{FetchRequest, HttpMethod, OutboundRequest, RequestBody};
pub use response::RawResponse;
pub use retry::{RetryPolicy, DEFAULT_RETRY_COUNT, DEFAULT_TIMEOUT};
pub use transport::Transport;
