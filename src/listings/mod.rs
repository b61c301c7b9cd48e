//! Listing data model, search-results extraction, and detail enrichment

pub mod details;
pub mod extract;
pub mod record;

pub use details::{enrich_records, extract_listing_details, fetch_listing_details};
pub use extract::extract_search_results;
pub use record::{ListingDetails, ListingRecord};
