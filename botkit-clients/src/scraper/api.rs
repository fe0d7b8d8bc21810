//! Scraper aggregator API client.

use botkit_core::{FetchConfig, ScraperConfig};
use botkit_fetch::{FetchRequest, Fetcher};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use super::error::ScraperError;
use super::types::{LyricsResult, MediaResult, SearchResults};

// ============================================================================
// Constants
// ============================================================================

const YOUTUBE_SEARCH: &str = "search/youtube";
const PINTEREST_SEARCH: &str = "search/pinterest";
const LYRICS_SEARCH: &str = "search/lyrics";
const TIKTOK_DOWNLOAD: &str = "download/tiktok";
const INSTAGRAM_DOWNLOAD: &str = "download/instagram";
const SCREENSHOT: &str = "tools/ssweb";
const TEXT_TO_IMAGE: &str = "ai/text2img";

/// Image generation is slow upstream.
const IMAGE_TIMEOUT: Duration = Duration::from_secs(60);

// ============================================================================
// API Client
// ============================================================================

/// Scraper aggregator client.
#[derive(Debug, Clone)]
pub struct ScraperClient {
    fetcher: Fetcher,
}

impl ScraperClient {
    /// Creates a client for `base_url` with the default fetch policy.
    pub fn new(base_url: &str, api_key: Option<&str>) -> Result<Self, ScraperError> {
        Ok(Self::with_fetcher(Fetcher::new(base_url)?, api_key))
    }

    /// Creates a client from the `scraper` and `fetch` configuration sections.
    pub fn from_config(scraper: &ScraperConfig, fetch: &FetchConfig) -> Result<Self, ScraperError> {
        let fetcher = Fetcher::from_config(&scraper.base_url, fetch)?;
        Ok(Self::with_fetcher(fetcher, scraper.api_key.as_deref()))
    }

    /// Wraps an existing fetcher, appending `apikey` to every call if set.
    pub fn with_fetcher(fetcher: Fetcher, api_key: Option<&str>) -> Self {
        let fetcher = match api_key.filter(|k| !k.is_empty()) {
            Some(key) => fetcher.with_query("apikey", key),
            None => fetcher,
        };
        Self { fetcher }
    }

    /// Returns the underlying fetcher.
    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    // ------------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------------

    /// Searches YouTube.
    #[instrument(skip(self))]
    pub async fn search_youtube(&self, query: &str) -> Result<SearchResults, ScraperError> {
        let query = non_empty(query, "search query")?;
        self.call(YOUTUBE_SEARCH, &[("query", query)]).await
    }

    /// Searches Pinterest.
    #[instrument(skip(self))]
    pub async fn search_pinterest(&self, query: &str) -> Result<SearchResults, ScraperError> {
        let query = non_empty(query, "search query")?;
        self.call(PINTEREST_SEARCH, &[("query", query)]).await
    }

    /// Looks up song lyrics by title.
    #[instrument(skip(self))]
    pub async fn search_lyrics(&self, title: &str) -> Result<LyricsResult, ScraperError> {
        let title = non_empty(title, "song title")?;
        self.call(LYRICS_SEARCH, &[("query", title)]).await
    }

    // ------------------------------------------------------------------------
    // Downloads
    // ------------------------------------------------------------------------

    /// Resolves download links for a TikTok post.
    #[instrument(skip(self))]
    pub async fn download_tiktok(&self, link: &str) -> Result<MediaResult, ScraperError> {
        let link = media_link(link)?;
        self.call(TIKTOK_DOWNLOAD, &[("url", link.as_str())]).await
    }

    /// Resolves download links for an Instagram post or reel.
    #[instrument(skip(self))]
    pub async fn download_instagram(&self, link: &str) -> Result<MediaResult, ScraperError> {
        let link = media_link(link)?;
        self.call(INSTAGRAM_DOWNLOAD, &[("url", link.as_str())]).await
    }

    // ------------------------------------------------------------------------
    // Images
    // ------------------------------------------------------------------------

    /// Renders a screenshot of a web page.
    #[instrument(skip(self))]
    pub async fn screenshot(&self, link: &str) -> Result<Vec<u8>, ScraperError> {
        let link = media_link(link)?;
        self.call_binary(SCREENSHOT, &[("url", link.as_str())]).await
    }

    /// Generates an image from a text prompt. Attempted once.
    #[instrument(skip(self))]
    pub async fn text_to_image(&self, prompt: &str) -> Result<Vec<u8>, ScraperError> {
        let prompt = non_empty(prompt, "prompt")?;
        let request = FetchRequest::get(TEXT_TO_IMAGE)
            .query("prompt", prompt)
            .retries(1)
            .timeout(IMAGE_TIMEOUT);
        Ok(self.fetcher.fetch_binary(request).await?)
    }

    // ------------------------------------------------------------------------
    // Generic
    // ------------------------------------------------------------------------

    /// Calls any JSON endpoint with the given query parameters.
    pub async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ScraperError> {
        debug!(endpoint, "Calling scraper endpoint");
        let request = FetchRequest::get(endpoint).query_pairs(params.iter().copied());
        Ok(self.fetcher.fetch_json(request).await?)
    }

    /// Calls any binary endpoint with the given query parameters.
    pub async fn call_binary(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<u8>, ScraperError> {
        debug!(endpoint, "Calling scraper endpoint (binary)");
        let request = FetchRequest::get(endpoint).query_pairs(params.iter().copied());
        Ok(self.fetcher.fetch_binary(request).await?)
    }
}

fn non_empty<'a>(value: &'a str, what: &'static str) -> Result<&'a str, ScraperError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ScraperError::EmptyInput(what))
    } else {
        Ok(value)
    }
}

fn media_link(link: &str) -> Result<Url, ScraperError> {
    let link = non_empty(link, "link")?;
    let url = Url::parse(link).map_err(|e| ScraperError::InvalidLink(format!("{link}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ScraperError::InvalidLink(format!("{link}: unsupported scheme {other}"))),
    }
}

// ============================================================================
// Tests
// ============================================================================
