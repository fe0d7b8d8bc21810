//! Scraper aggregator client.
//!
//! Every endpoint is a single retrying GET with a handful of query
//! parameters and an optional `apikey` appended to all calls.

mod api;
mod error;
mod types;

pub use api::ScraperClient;
pub use error::ScraperError;
pub use types::{LyricsResult, MediaResult, SearchResults};
