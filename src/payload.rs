//! Embedded-payload location and defensive JSON navigation
//!
//! Server-rendered pages bootstrap their client state from a JSON document
//! inlined in a `<script>` element with a fixed id. This module is the single
//! seam between markup and everything downstream: every other component only
//! ever sees parsed `serde_json::Value` trees.
//!
//! The payload has no schema contract, so navigation never uses blind chained
//! accessors. `pluck` and its typed leaf readers make every hop's absence
//! independently observable to the caller.

use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::LazyLock;
use tracing::error;

use crate::error::{ScrapeError, ScrapeResult};

/// Id of the script element carrying the deferred-state JSON payload
pub const DATA_SCRIPT_ID: &str = "data-deferred-state-0";

static DATA_SCRIPT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("script#data-deferred-state-0")
        .expect("DATA_SCRIPT_SELECTOR: hardcoded selector is valid")
});

/// Locate the embedded JSON payload inside a page's markup.
///
/// Fails when the script element is absent, has no text, or its text is not
/// valid JSON. Each failure is logged with enough context to diagnose
/// upstream schema drift.
pub fn locate_payload(markup: &str) -> ScrapeResult<Value> {
    let document = Html::parse_document(markup);
    let Some(element) = document.select(&DATA_SCRIPT_SELECTOR).next() else {
        error!("Script tag '{DATA_SCRIPT_ID}' not found.");
        return Err(ScrapeError::PayloadMissing);
    };
    let text: String = element.text().collect();
    if text.trim().is_empty() {
        error!("Script tag '{DATA_SCRIPT_ID}' is empty.");
        return Err(ScrapeError::PayloadMissing);
    }
    serde_json::from_str(&text).map_err(|e| {
        error!("Failed to parse JSON from script tag: {e}");
        ScrapeError::from(e)
    })
}

/// Walk a chain of object keys, returning `None` at the first missing hop
pub fn pluck<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = root;
    for key in path {
        current = current.get(key)?;
    }
    Some(current)
}

/// String leaf at the end of a key path
pub fn pluck_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    pluck(root, path)?.as_str()
}

/// Integer leaf at the end of a key path
pub fn pluck_i64(root: &Value, path: &[&str]) -> Option<i64> {
    pluck(root, path)?.as_i64()
}

/// Float leaf at the end of a key path
pub fn pluck_f64(root: &Value, path: &[&str]) -> Option<f64> {
    pluck(root, path)?.as_f64()
}

/// Boolean leaf at the end of a key path
pub fn pluck_bool(root: &Value, path: &[&str]) -> Option<bool> {
    pluck(root, path)?.as_bool()
}

/// Array leaf at the end of a key path
pub fn pluck_array<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Vec<Value>> {
    pluck(root, path)?.as_array()
}

/// Resolve the `niobeMinimalClientData[0][1]` slot every navigation path
/// shares. The payload wraps its real content in a list of two-element
/// request/response pairs; slot `[0][1]` is the first response body.
pub fn client_root(payload: &Value) -> Option<&Value> {
    let pair = payload.get("niobeMinimalClientData")?.get(0)?;
    let root = pair.get(1)?;
    root.is_object().then_some(root)
}
