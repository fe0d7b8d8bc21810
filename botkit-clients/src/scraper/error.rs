//! Scraper-specific errors.

use botkit_fetch::FetchError;
use thiserror::Error;

/// Scraper-specific errors.
#[derive(Debug, Error)]
pub enum ScraperError {
    /// The underlying fetch failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A required argument was empty.
    #[error("Missing {0}")]
    EmptyInput(&'static str),

    /// A media link could not be parsed.
    #[error("Invalid link: {0}")]
    InvalidLink(String),
}

impl ScraperError {
    /// Returns true if every attempt ended in a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Fetch(e) if e.is_timeout())
    }
}
