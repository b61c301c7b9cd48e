//! Error types for the scraping pipeline
//!
//! Every variant here is recovered at a component boundary: transport and
//! payload failures turn into empty results or sentinel-filled records,
//! never into a fault that escapes a tool invocation.

use thiserror::Error;

/// Result type alias for scraping operations
pub type ScrapeResult<T> = Result<T, ScrapeError>;

/// Error types for page fetching and payload extraction
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Network-level failure (DNS, connect, timeout)
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("Server returned HTTP {0}")]
    HttpStatus(reqwest::StatusCode),

    /// The embedded data script element is absent or empty
    #[error("Embedded data payload not found in page")]
    PayloadMissing,

    /// The embedded script's text is not valid JSON
    #[error("Embedded payload is not valid JSON: {0}")]
    PayloadJson(#[from] serde_json::Error),
}

impl ScrapeError {
    /// Check if the error came from the transport layer rather than
    /// from the page content itself
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, ScrapeError::Http(_) | ScrapeError::HttpStatus(_))
    }
}
