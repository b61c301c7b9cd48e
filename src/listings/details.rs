//! Detail-page enrichment for individual listings
//!
//! The search payload never carries room counts, amenities, or the
//! neighborhood name; those live in each listing's own detail page under
//! `...stayProductDetail.sections.sectionData`. Enrichment runs as one
//! concurrent batch per search page, and a single listing's failure is
//! logged and swallowed rather than aborting its siblings.

use futures::future::join_all;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{error, info};

use crate::fetcher::PageFetcher;
use crate::payload::{client_root, locate_payload, pluck, pluck_array, pluck_str};
use crate::site::Site;

use super::record::{ListingDetails, ListingRecord, SENTINEL};

/// Fetch and extract one listing's detail fields.
///
/// Never fails the caller: any error along the way is logged and yields an
/// all-default [`ListingDetails`], which the merge rule treats as "nothing
/// learned".
pub async fn fetch_listing_details(
    fetcher: &PageFetcher,
    site: &Site,
    listing_id: &str,
) -> ListingDetails {
    let url = site.room_url(listing_id);
    info!("Scraping details for listing {listing_id}");
    let markup = match fetcher.fetch(&url).await {
        Ok(markup) => markup,
        Err(e) => {
            error!("Failed to fetch details for listing {listing_id}: {e}");
            return ListingDetails::default();
        }
    };
    let payload = match locate_payload(&markup) {
        Ok(payload) => payload,
        Err(e) => {
            error!("No usable payload for listing {listing_id}: {e}");
            return ListingDetails::default();
        }
    };
    extract_listing_details(&payload)
}

/// Walk a detail-page payload and pull out the section-tagged fields.
///
/// Sections are matched by their `sectionType` tag; a missing section leaves
/// the corresponding field at its default.
pub fn extract_listing_details(payload: &Value) -> ListingDetails {
    let mut details = ListingDetails::default();

    let Some(root) = client_root(payload) else {
        error!("Unexpected JSON structure in listing detail payload");
        return details;
    };
    let Some(sections) = pluck(root, &["data", "presentation", "stayProductDetail", "sections"])
    else {
        error!("'stayProductDetail.sections' missing in listing detail payload");
        return details;
    };
    let Some(section_data) = pluck_array(sections, &["sectionData"]) else {
        error!("'sectionData' missing in listing detail payload");
        return details;
    };

    for section in section_data {
        match pluck_str(section, &["sectionType"]) {
            Some("HIGHLIGHTS") => {
                if let Some(items) = pluck_array(section, &["sectionItems"]) {
                    classify_highlights(items, &mut details);
                }
            }
            Some("AMENITIES") => {
                if let Some(items) = pluck_array(section, &["sectionItems"]) {
                    details.amenities = items
                        .iter()
                        .map(|item| pluck_str(item, &["title"]).unwrap_or(SENTINEL).to_owned())
                        .collect();
                }
            }
            Some("LOCATION") => {
                details.location = pluck_str(section, &["title"]).map(str::to_owned);
            }
            _ => {}
        }
    }
    details
}

/// Classify highlight items into beds/bedrooms/bathrooms by title keyword.
///
/// The `bedroom` check runs before the generic `bed` check so a title like
/// "2 bedrooms" never lands in the beds slot.
fn classify_highlights(items: &[Value], details: &mut ListingDetails) {
    for item in items {
        let title = pluck_str(item, &["title"]).unwrap_or_default().to_lowercase();
        let subtitle = pluck_str(item, &["subtitle"]).map(str::to_owned);
        if title.contains("bedroom") {
            details.bedrooms = subtitle;
        } else if title.contains("bed") {
            details.beds = subtitle;
        } else if title.contains("bath") {
            details.bathrooms = subtitle;
        }
    }
}

/// Enrich every record on one search page that has a real listing id.
///
/// All detail fetches for the page are issued concurrently and joined as a
/// batch; each outcome merges only into its own record, matched by id.
pub async fn enrich_records(fetcher: &PageFetcher, site: &Site, records: &mut [ListingRecord]) {
    let ids: Vec<String> = records
        .iter()
        .filter_map(|record| record.listing_id.clone())
        .collect();
    if ids.is_empty() {
        return;
    }
    info!("Fetching details for {} listings", ids.len());

    let batch = join_all(
        ids.iter()
            .map(|id| fetch_listing_details(fetcher, site, id)),
    )
    .await;

    let by_id: HashMap<&String, ListingDetails> = ids.iter().zip(batch).collect();
    for record in records.iter_mut() {
        if let Some(id) = &record.listing_id {
            if let Some(details) = by_id.get(id) {
                record.apply_details(details);
            }
        }
    }
}
