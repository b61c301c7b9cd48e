//! Site endpoints and request-URL construction
//!
//! All URLs the pipeline issues are built here, from a single base that can
//! be repointed at a mock server in integration tests. The search URL shape
//! mirrors what the site's own search form submits, so the first page renders
//! the same embedded payload a browser would receive.

use url::Url;

use crate::query::SearchQuery;

/// Production host for search and room pages
pub const DEFAULT_BASE_URL: &str = "https://www.airbnb.ca";

/// Endpoint bases for the target listing site
#[derive(Debug, Clone)]
pub struct Site {
    base: Url,
}

impl Default for Site {
    fn default() -> Self {
        // Hardcoded URL is valid
        Self::new(Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL parses"))
    }
}

impl Site {
    /// Create a site rooted at `base` (scheme + host, no path)
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    /// Build the first search-results URL for a validated query.
    ///
    /// Every parameter the query carries is attached here; subsequent pages
    /// reuse this exact URL with only a `cursor` parameter added.
    pub fn search_url(&self, query: &SearchQuery) -> Url {
        let path = format!("s/{}/homes", urlencoding::encode(&query.place));
        // The base is always an http(s) URL, which accepts path segments.
        let mut url = self.base.join(&path).expect("search path joins onto base");
        url.query_pairs_mut()
            .append_pair("refinement_paths[]", "/homes")
            .append_pair("date_picker_type", "calendar")
            .append_pair("checkin", &query.checkin)
            .append_pair("checkout", &query.checkout)
            .append_pair("adults", &query.adults.to_string())
            .append_pair("children", &query.children.to_string())
            .append_pair("infants", &query.infants.to_string())
            .append_pair("pets", &query.pets.to_string())
            .append_pair("source", "structured_search_input_header")
            .append_pair("price_max", &query.price_max.to_string());
        url
    }

    /// Bare detail-page URL for one listing id, used by the detail enricher
    pub fn room_url(&self, listing_id: &str) -> String {
        format!("{}/rooms/{}", self.base.as_str().trim_end_matches('/'), listing_id)
    }

    /// Canonical re-fetchable listing URL carrying the search context,
    /// attached to every emitted record
    pub fn listing_url(&self, listing_id: &str, query: &SearchQuery) -> String {
        format!(
            "{}?check_in={}&check_out={}&guests={}&adults={}",
            self.room_url(listing_id),
            query.checkin,
            query.checkout,
            query.guests(),
            query.adults
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SearchQuery;

    fn query() -> SearchQuery {
        SearchQuery {
            place: "Hong Kong".to_string(),
            checkin: "2099-08-01".to_string(),
            checkout: "2099-08-06".to_string(),
            adults: 2,
            children: 1,
            infants: 0,
            pets: 0,
            price_max: 500,
            max_pages: 3,
        }
    }

    #[test]
    fn search_url_carries_all_parameters() {
        let url = Site::default().search_url(&query());
        assert!(url.path().starts_with("/s/Hong%20Kong/homes"));
        let q = url.query().unwrap();
        assert!(q.contains("refinement_paths%5B%5D=%2Fhomes"));
        assert!(q.contains("checkin=2099-08-01"));
        assert!(q.contains("checkout=2099-08-06"));
        assert!(q.contains("adults=2"));
        assert!(q.contains("children=1"));
        assert!(q.contains("price_max=500"));
        assert!(!q.contains("cursor"));
    }

    #[test]
    fn listing_url_reattaches_search_context() {
        let url = Site::default().listing_url("12345", &query());
        assert_eq!(
            url,
            "https://www.airbnb.ca/rooms/12345?check_in=2099-08-01&check_out=2099-08-06&guests=3&adults=2"
        );
    }
}
