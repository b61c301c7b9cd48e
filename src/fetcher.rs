//! Single-shot page fetcher with browser-like headers
//!
//! One GET per call, 30-second timeout, no retries: retry policy belongs to
//! the callers that need it (the single-listing summarizer retries, the
//! pagination driver does not).

use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::{error, info};

use crate::error::{ScrapeError, ScrapeResult};

/// Desktop Chrome user agent; listing sites serve the embedded data payload
/// only to clients that look like a real browser
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Per-request timeout in seconds
pub const FETCH_TIMEOUT_SECS: u64 = 30;

/// HTTP page fetcher sharing one connection pool across all requests
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// Build a fetcher with the fixed header set and timeout
    pub fn new() -> ScrapeResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }

    /// Fetch one page, returning its markup.
    ///
    /// Non-2xx statuses are failures here: the body of a block page or error
    /// page never contains the embedded payload, so callers treat any error
    /// as "no content".
    pub async fn fetch(&self, url: &str) -> ScrapeResult<String> {
        info!("Fetching HTML from: {url}");
        let response = self.client.get(url).send().await.map_err(|e| {
            error!("Error fetching the URL {url}: {e}");
            ScrapeError::from(e)
        })?;
        let status = response.status();
        if !status.is_success() {
            error!("HTTP error fetching {url}: {status}. The server might be blocking requests.");
            return Err(ScrapeError::HttpStatus(status));
        }
        Ok(response.text().await?)
    }
}
