//! Search-results extraction from the embedded payload
//!
//! Walks `niobeMinimalClientData[0][1].data.presentation.staysSearch.results`
//! and turns each entry into a [`ListingRecord`]. Nothing here aborts on bad
//! data: a missing hop on the shared path yields an empty result set with a
//! hop-specific log line, and a malformed entry degrades field-by-field to
//! sentinels while its siblings continue.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::{error, warn};

use crate::payload::{client_root, pluck_array, pluck_bool, pluck_f64, pluck_i64, pluck_str};
use crate::query::SearchQuery;
use crate::site::Site;

use super::record::ListingRecord;

static BED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+\s*bed(s)?)").expect("BED_RE: hardcoded regex is valid")
});

static GUEST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+\s*guest(s)?)").expect("GUEST_RE: hardcoded regex is valid")
});

/// Tag marking a private-room listing in the structured-content sub-lists
const PRIVATE_ROOM_TAG: &str = "LISTING_PRIVATE_ROOM_SUITE_HIGHLIGHT";

/// Extract listing records and the raw pagination block from a parsed
/// search-page payload.
///
/// Returns the accumulated records plus `results.paginationInfo` as-is; the
/// pagination driver reads `nextPageCursor` out of it, nothing here
/// interprets the cursor. Each hop of the shared navigation path logs a
/// distinct message on failure so upstream schema drift is diagnosable from
/// the log alone.
pub fn extract_search_results(
    payload: &Value,
    query: &SearchQuery,
    site: &Site,
) -> (Vec<ListingRecord>, Value) {
    let Some(relevant) = client_root(payload) else {
        error!("'niobeMinimalClientData' is missing or has unexpected structure.");
        return (Vec::new(), Value::Null);
    };
    let Some(data) = relevant.get("data") else {
        error!("'data' key missing in JSON payload.");
        return (Vec::new(), Value::Null);
    };
    let Some(presentation) = data.get("presentation") else {
        error!("'presentation' key missing in JSON payload.");
        return (Vec::new(), Value::Null);
    };
    let Some(stays_search) = presentation.get("staysSearch") else {
        error!("'staysSearch' key missing in JSON payload.");
        return (Vec::new(), Value::Null);
    };
    let Some(results) = stays_search.get("results") else {
        error!("'results' key missing in JSON payload.");
        return (Vec::new(), Value::Null);
    };

    let pagination_info = results.get("paginationInfo").cloned().unwrap_or(Value::Null);
    let Some(search_results) = results.get("searchResults").and_then(Value::as_array) else {
        warn!("No 'searchResults' found in JSON payload.");
        return (Vec::new(), pagination_info);
    };

    let mut records = Vec::with_capacity(search_results.len());
    for (index, entry) in search_results.iter().enumerate() {
        if !entry.is_object() {
            warn!("Listing at index {index} is not an object, skipping.");
            continue;
        }
        records.push(extract_record(entry, index, query, site));
    }
    (records, pagination_info)
}

/// Decode the compound listing token: base64 of `<prefix>:<realid>`, where
/// only the substring after the last `:` is externally meaningful
pub fn decode_listing_id(encoded: &str) -> Option<String> {
    let bytes = BASE64.decode(encoded).ok()?;
    let decoded = String::from_utf8(bytes).ok()?;
    decoded.rsplit(':').next().map(str::to_owned)
}

fn extract_record(entry: &Value, index: usize, query: &SearchQuery, site: &Site) -> ListingRecord {
    let mut record = ListingRecord::default();

    if let Some(encoded) = pluck_str(entry, &["demandStayListing", "id"]) {
        match decode_listing_id(encoded) {
            Some(id) => {
                record.url = Some(site.listing_url(&id, query));
                record.listing_id = Some(id);
            }
            None => {
                error!("Error decoding listing ID {encoded} at index {index}");
            }
        }
    }

    record.title = pluck_str(
        entry,
        &[
            "demandStayListing",
            "description",
            "name",
            "localizedStringWithTranslationPreference",
        ],
    )
    .map(str::to_owned);

    record.price = pluck_str(
        entry,
        &["structuredDisplayPrice", "primaryLine", "accessibilityLabel"],
    )
    .map(str::to_owned);
    record.price_qualifier =
        pluck_str(entry, &["structuredDisplayPrice", "primaryLine", "qualifier"]).map(str::to_owned);

    record.average_rating = pluck_str(entry, &["avgRatingA11yLabel"]).map(str::to_owned);
    record.rating_count = pluck_i64(entry, &["passportData", "ratingCount"])
        .and_then(|n| u64::try_from(n).ok())
        .unwrap_or(0);

    record.host_name = pluck_str(entry, &["passportData", "name"]).map(str::to_owned);
    record.host_is_verified = pluck_bool(entry, &["passportData", "isVerified"]).unwrap_or(false);
    record.host_is_superhost = pluck_bool(entry, &["passportData", "isSuperhost"]).unwrap_or(false);
    record.host_years = pluck_i64(entry, &["passportData", "timeAsHost", "years"]).unwrap_or(0);
    record.host_months = pluck_i64(entry, &["passportData", "timeAsHost", "months"]).unwrap_or(0);

    record.latitude = pluck_f64(
        entry,
        &["demandStayListing", "location", "coordinate", "latitude"],
    );
    record.longitude = pluck_f64(
        entry,
        &["demandStayListing", "location", "coordinate", "longitude"],
    );

    // Beds and guest capacity only appear as free text in the secondary
    // description lines. First match wins for each field.
    if let Some(lines) = pluck_array(entry, &["structuredContent", "secondaryLine"]) {
        for item in lines {
            let body = pluck_str(item, &["body"]).unwrap_or_default();
            if record.beds.is_none() {
                if let Some(found) = BED_RE.find(body) {
                    record.beds = Some(found.as_str().to_owned());
                }
            }
            if record.guests.is_none() {
                if let Some(found) = GUEST_RE.find(body) {
                    record.guests = Some(found.as_str().to_owned());
                }
            }
        }
    }

    if let Some(pictures) = entry.get("contextualPictures").and_then(Value::as_array) {
        record.image_urls = pictures
            .iter()
            .filter_map(|img| pluck_str(img, &["picture"]))
            .map(str::to_owned)
            .collect();
    }

    if let Some(badges) = entry.get("badges").and_then(Value::as_array) {
        record.badges = badges
            .iter()
            .filter_map(|badge| pluck_str(badge, &["id"]))
            .map(str::to_owned)
            .collect();
    }

    let structured = entry.get("structuredContent");
    let tagged_private_room = ["distance", "mapCategoryInfo"].into_iter().any(|list| {
        structured
            .and_then(|s| pluck_array(s, &[list]))
            .is_some_and(|items| {
                items
                    .iter()
                    .any(|item| pluck_str(item, &["type"]) == Some(PRIVATE_ROOM_TAG))
            })
    });
    if tagged_private_room {
        record.listing_type = Some("Private Room".to_owned());
    }

    record
}
