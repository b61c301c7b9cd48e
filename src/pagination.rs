//! Pagination driver for search scraping
//!
//! Orchestrates the fetch/extract/enrich cycle across result pages. The
//! server issues an opaque `nextPageCursor` per page; each cursor is a fresh
//! absolute pointer into the result set, so the next-page URL is always the
//! original first-page URL with only the `cursor` parameter swapped.

use serde_json::Value;
use std::collections::HashMap;
use tracing::{error, info, warn};
use url::Url;

use crate::fetcher::PageFetcher;
use crate::listings::{ListingRecord, enrich_records, extract_search_results};
use crate::payload::locate_payload;
use crate::query::SearchQuery;
use crate::site::Site;

/// Run the full search scrape: up to `query.max_pages` pages, detail
/// enrichment per page, and id-level deduplication at the end.
///
/// Termination, in order of precedence: page ceiling reached, no records on
/// a page (a blocked or exhausted result set), fetch or payload failure, or
/// a pagination block without a cursor.
pub async fn scrape_search(
    fetcher: &PageFetcher,
    site: &Site,
    query: &SearchQuery,
) -> Vec<ListingRecord> {
    let initial_url = site.search_url(query);
    let mut current_url = Some(initial_url.clone());
    let mut all_records = Vec::new();
    let mut page_count = 0usize;

    while let Some(url) = current_url.take() {
        if page_count >= query.max_pages {
            break;
        }
        page_count += 1;
        info!("Scraping page {page_count}: {url}");

        let markup = match fetcher.fetch(url.as_str()).await {
            Ok(markup) => markup,
            Err(e) => {
                error!("Failed to retrieve HTML for page {page_count}: {e}. Stopping scrape.");
                break;
            }
        };
        let payload = match locate_payload(&markup) {
            Ok(payload) => payload,
            Err(e) => {
                error!("No payload on page {page_count}: {e}. Stopping scrape.");
                break;
            }
        };

        let (mut records, pagination) = extract_search_results(&payload, query, site);
        if records.is_empty() {
            // Empty on page 1 signals a block or invalid query; later it
            // empirically means end-of-results. Either way, stop here.
            warn!("No rooms found on page {page_count}.");
            break;
        }
        enrich_records(fetcher, site, &mut records).await;
        info!("Extracted {} rooms from page {page_count}", records.len());
        all_records.extend(records);

        match pagination.get("nextPageCursor").and_then(Value::as_str) {
            Some(cursor) => {
                current_url = Some(with_cursor(&initial_url, cursor));
                info!("Next page cursor found. Updating URL for page {}", page_count + 1);
            }
            None => {
                info!("No 'nextPageCursor' found. Reached the last page.");
            }
        }
    }

    info!("Scraping complete. Total rooms extracted: {}", all_records.len());
    let unique = dedupe_last_wins(all_records);
    info!("Total unique rooms after deduplication: {}", unique.len());
    unique
}

/// Rebuild the original first-page URL with the `cursor` query parameter
/// set to `cursor`, leaving every other parameter untouched
pub fn with_cursor(initial_url: &Url, cursor: &str) -> Url {
    let preserved: Vec<(String, String)> = initial_url
        .query_pairs()
        .filter(|(key, _)| key != "cursor")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let mut next = initial_url.clone();
    {
        let mut pairs = next.query_pairs_mut();
        pairs.clear();
        pairs.extend_pairs(preserved);
        pairs.append_pair("cursor", cursor);
    }
    next
}

/// Deduplicate by listing id, keeping first-seen position but last-seen
/// values; records without a real id are dropped from the output
pub fn dedupe_last_wins(records: Vec<ListingRecord>) -> Vec<ListingRecord> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<ListingRecord> = Vec::with_capacity(records.len());
    for record in records {
        let Some(id) = record.listing_id.clone() else {
            continue;
        };
        match positions.get(&id) {
            Some(&index) => unique[index] = record,
            None => {
                positions.insert(id, unique.len());
                unique.push(record);
            }
        }
    }
    unique
}
