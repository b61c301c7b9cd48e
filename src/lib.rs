//! stayscrape: travel-listing scraping exposed as MCP tools
//!
//! The pipeline extracts structured listing data from JSON payloads embedded
//! in server-rendered HTML. The upstream payload has no schema contract, so
//! every field access assumes absence, wrong type, or structural drift and
//! degrades to a sentinel instead of failing the invocation.
//!
//! Data flow: pagination driver → page fetcher → payload locator → listing
//! extractor → concurrent detail enrichment → deduplication → serialized
//! output. The single-listing summarizer is an independent path sharing only
//! the fetcher and the payload locator.

pub mod error;
pub mod fetcher;
pub mod listings;
pub mod mcp;
pub mod pagination;
pub mod payload;
pub mod query;
pub mod site;
pub mod summary;

pub use error::{ScrapeError, ScrapeResult};
pub use fetcher::PageFetcher;
pub use listings::{ListingDetails, ListingRecord, extract_search_results, fetch_listing_details};
pub use pagination::scrape_search;
pub use payload::locate_payload;
pub use query::SearchQuery;
pub use site::Site;
pub use summary::summarize_listing;

// MCP tool surface
pub use mcp::{SearchListingsArgs, StayScrapeServer, SummarizeListingArgs};
