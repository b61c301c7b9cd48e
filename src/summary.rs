//! Single-listing summarizer
//!
//! Independent of the search path, sharing only the fetcher and the payload
//! locator. Given one detail-page URL, fetches with bounded retry, walks
//! `...stayProductDetailPage.sections.sections`, and renders the tagged
//! section containers into one multi-section text block. Failures are
//! user-facing sentences, never errors.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{error, info, warn};
use url::Url;

use crate::fetcher::PageFetcher;
use crate::listings::record::SENTINEL;
use crate::payload::{client_root, locate_payload, pluck_array};

static ROOM_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/rooms/(\d+)").expect("ROOM_ID_RE: hardcoded regex is valid"));

/// Pause between fetch attempts
const RETRY_PAUSE: Duration = Duration::from_secs(1);

/// Literal rejection for URLs that don't contain a `/rooms/<digits>` path
pub const INVALID_URL_MESSAGE: &str = "Invalid listing URL provided.";

/// Display-only stay context parsed from the listing URL's query string
#[derive(Debug, Default)]
struct StayContext {
    check_in: Option<String>,
    check_out: Option<String>,
    guests: Option<String>,
    adults: Option<String>,
}

impl StayContext {
    fn from_url(url: &str) -> Self {
        let Ok(parsed) = Url::parse(url) else {
            return Self::default();
        };
        let mut ctx = Self::default();
        for (key, value) in parsed.query_pairs() {
            let value = value.into_owned();
            match key.as_ref() {
                "check_in" => ctx.check_in = Some(value),
                "check_out" => ctx.check_out = Some(value),
                "guests" => ctx.guests = Some(value),
                "adults" => ctx.adults = Some(value),
                _ => {}
            }
        }
        ctx
    }
}

/// Extract the numeric listing id from a detail-page URL
pub fn listing_id_from_url(url: &str) -> Option<&str> {
    ROOM_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Scrape one listing page and render a structured text summary.
///
/// Up to `max_retries` fetch attempts with a short fixed pause between them;
/// first success wins. Every failure path resolves to a plain-text sentence.
pub async fn summarize_listing(fetcher: &PageFetcher, url: &str, max_retries: u32) -> String {
    info!("Fetching details for listing URL: {url}");

    let Some(listing_id) = listing_id_from_url(url) else {
        error!("Invalid listing URL: {url}");
        return INVALID_URL_MESSAGE.to_string();
    };
    let context = StayContext::from_url(url);

    let mut markup = None;
    for attempt in 1..=max_retries.max(1) {
        match fetcher.fetch(url).await {
            Ok(content) => {
                markup = Some(content);
                break;
            }
            Err(e) => {
                warn!("Retry {attempt}/{max_retries} for listing {listing_id}: {e}");
                if attempt < max_retries {
                    tokio::time::sleep(RETRY_PAUSE).await;
                }
            }
        }
    }
    let Some(markup) = markup else {
        error!("Failed to fetch HTML for listing {listing_id} after {max_retries} attempts");
        return format!("Failed to fetch details for listing {listing_id} after {max_retries} retries.");
    };

    let payload = match locate_payload(&markup) {
        Ok(payload) => payload,
        Err(e) => {
            error!("No usable payload for listing {listing_id}: {e}");
            return format!("No data found for listing {listing_id}.");
        }
    };
    let Some(root) = client_root(&payload) else {
        error!("'niobeMinimalClientData' is missing or has unexpected structure.");
        return format!("No valid data found for listing {listing_id}.");
    };

    render_summary(root, &context)
}

/// Map the tagged section containers into the six labeled output slots and
/// format the final text block.
///
/// Containers are processed in array order; when two share a tag, the last
/// write wins.
fn render_summary(root: &Value, context: &StayContext) -> String {
    let sections = pluck_array(
        root,
        &["data", "presentation", "stayProductDetailPage", "sections", "sections"],
    )
    .map(Vec::as_slice)
    .unwrap_or_default();

    let mut description = None;
    let mut location = None;
    let mut host = None;
    let mut rating_and_reviews = None;
    let mut house_rules = None;
    let mut prices = None;
    let mut images = None;

    for container in sections {
        let section = container.get("section");
        match container.get("sectionComponentType").and_then(Value::as_str) {
            Some("PDP_DESCRIPTION_MODAL") => description = section,
            Some("LOCATION_PDP") => location = section,
            Some("MEET_YOUR_HOST") => host = section,
            Some("REVIEWS_DEFAULT") => rating_and_reviews = section,
            Some("POLICIES_DEFAULT") => house_rules = section,
            Some("BOOK_IT_SIDEBAR") | Some("BOOK_IT_FLOATING_FOOTER") => prices = section,
            Some("HERO_DEFAULT") => images = section,
            _ => {}
        }
    }

    let slot = |value: Option<&Value>| -> String {
        match value {
            Some(v) => serde_json::to_string_pretty(v).unwrap_or_else(|_| SENTINEL.to_string()),
            None => SENTINEL.to_string(),
        }
    };
    fn ctx(value: &Option<String>) -> &str {
        value.as_deref().unwrap_or(SENTINEL)
    }

    format!(
        "# Requested Stay\n\
         check-in: {}\ncheck-out: {}\nguests: {}\nadults: {}\n\n\
         # Description\n{}\n\n\
         # Location\n{}\n\n\
         # Host\n{}\n\n\
         # Rating and Reviews\n{}\n\n\
         # House Rules\n{}\n\n\
         # Prices Info\n{}\n\n\
         # Image Info\n{}\n",
        ctx(&context.check_in),
        ctx(&context.check_out),
        ctx(&context.guests),
        ctx(&context.adults),
        slot(description),
        slot(location),
        slot(host),
        slot(rating_and_reviews),
        slot(house_rules),
        slot(prices),
        slot(images),
    )
}
