//! Production transports.
//!
//! - [`http`] - reqwest client with tracing

pub mod http;

pub use http::HttpClient;
