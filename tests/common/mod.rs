//! Fixture builders for the stayscrape integration tests
//!
//! Builds the same page shapes the production site serves: an HTML document
//! with the deferred-state script element, wrapping a
//! `niobeMinimalClientData` payload.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Value, json};

/// Wrap a payload in a page carrying the deferred-state script element
#[allow(dead_code)]
pub fn page_html(payload: &Value) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>listings</title></head>
<body>
<div id="root"></div>
<script id="data-deferred-state-0" type="application/json">{payload}</script>
</body>
</html>"#
    )
}

/// Encode a plain listing id as the site's compound token
#[allow(dead_code)]
pub fn encode_id(id: &str) -> String {
    BASE64.encode(format!("StayListing:{id}"))
}

/// One search-results entry with the given id and title
#[allow(dead_code)]
pub fn search_entry(id: &str, title: &str) -> Value {
    json!({
        "demandStayListing": {
            "id": encode_id(id),
            "description": {
                "name": {"localizedStringWithTranslationPreference": title}
            },
            "location": {"coordinate": {"latitude": 22.3, "longitude": 114.2}}
        },
        "structuredDisplayPrice": {
            "primaryLine": {"accessibilityLabel": "$80 CAD per night", "qualifier": "per night"}
        },
        "avgRatingA11yLabel": "4.5",
        "passportData": {"ratingCount": 10, "name": "Host", "isVerified": true},
        "structuredContent": {"secondaryLine": [{"body": "2 guests"}]},
        "contextualPictures": [{"picture": "https://img.example/a.jpg"}],
        "badges": []
    })
}

/// Full search-page payload: entries plus an optional next-page cursor
#[allow(dead_code)]
pub fn search_payload(entries: Vec<Value>, cursor: Option<&str>) -> Value {
    let pagination = match cursor {
        Some(c) => json!({"nextPageCursor": c}),
        None => json!({}),
    };
    json!({
        "niobeMinimalClientData": [[
            "req",
            {"data": {"presentation": {"staysSearch": {"results": {
                "searchResults": entries,
                "paginationInfo": pagination
            }}}}}
        ]]
    })
}

/// Detail-page payload with the HIGHLIGHTS/AMENITIES/LOCATION sections used
/// by the detail enricher
#[allow(dead_code)]
pub fn detail_payload(highlights: Value, amenities: Value, location: Option<&str>) -> Value {
    let mut sections = vec![
        json!({"sectionType": "HIGHLIGHTS", "sectionItems": highlights}),
        json!({"sectionType": "AMENITIES", "sectionItems": amenities}),
    ];
    if let Some(loc) = location {
        sections.push(json!({"sectionType": "LOCATION", "title": loc}));
    }
    json!({
        "niobeMinimalClientData": [[
            "req",
            {"data": {"presentation": {"stayProductDetail": {"sections": {
                "sectionData": sections
            }}}}}
        ]]
    })
}

/// Product-detail-page payload for the summarizer's section containers
#[allow(dead_code)]
pub fn pdp_payload(sections: Value) -> Value {
    json!({
        "niobeMinimalClientData": [[
            "req",
            {"data": {"presentation": {"stayProductDetailPage": {"sections": {
                "sections": sections
            }}}}}
        ]]
    })
}
