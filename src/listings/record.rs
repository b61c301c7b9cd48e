//! Listing record and detail types
//!
//! Internally, absence is `None` and nothing else; the literal "N/A" the
//! output format promises is rendered only at the serialization boundary.
//! This keeps "field is unknown" distinguishable from "field's value happens
//! to be the text N/A" everywhere except in the final JSON.

use serde::{Serialize, Serializer};

/// Placeholder rendered for absent string fields in serialized output
pub const SENTINEL: &str = "N/A";

fn na_str<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_str(v),
        None => serializer.serialize_str(SENTINEL),
    }
}

fn na_f64<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_f64(*v),
        None => serializer.serialize_str(SENTINEL),
    }
}

/// One row per distinct listing surfaced in search results.
///
/// Every field is independently optional: absence is normal, not
/// exceptional. Serialized JSON always contains every declared field, with
/// `None` rendered as the "N/A" sentinel (coordinates stay numeric when
/// present).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListingRecord {
    /// Stable external identifier, decoded from the payload's compound token
    #[serde(serialize_with = "na_str")]
    pub listing_id: Option<String>,
    /// Re-fetchable detail URL carrying the original search context
    #[serde(serialize_with = "na_str")]
    pub url: Option<String>,
    #[serde(serialize_with = "na_str")]
    pub title: Option<String>,
    #[serde(serialize_with = "na_str")]
    pub price: Option<String>,
    #[serde(serialize_with = "na_str")]
    pub price_qualifier: Option<String>,
    #[serde(serialize_with = "na_str")]
    pub average_rating: Option<String>,
    pub rating_count: u64,
    #[serde(serialize_with = "na_str")]
    pub host_name: Option<String>,
    pub host_is_verified: bool,
    pub host_is_superhost: bool,
    pub host_years: i64,
    pub host_months: i64,
    #[serde(serialize_with = "na_f64")]
    pub latitude: Option<f64>,
    #[serde(serialize_with = "na_f64")]
    pub longitude: Option<f64>,
    #[serde(serialize_with = "na_str")]
    pub beds: Option<String>,
    #[serde(serialize_with = "na_str")]
    pub guests: Option<String>,
    #[serde(serialize_with = "na_str")]
    pub bedrooms: Option<String>,
    #[serde(serialize_with = "na_str")]
    pub bathrooms: Option<String>,
    pub amenities: Vec<String>,
    #[serde(serialize_with = "na_str")]
    pub location: Option<String>,
    pub image_urls: Vec<String>,
    pub badges: Vec<String>,
    #[serde(serialize_with = "na_str")]
    pub listing_type: Option<String>,
}

/// Secondary fields scraped from one listing's own detail page.
///
/// Ephemeral: produced per listing id by the detail enricher, merged into
/// the owning [`ListingRecord`], then discarded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingDetails {
    pub beds: Option<String>,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub amenities: Vec<String>,
    pub location: Option<String>,
}

impl ListingRecord {
    /// Merge detail-page fields into this record.
    ///
    /// Upgrade-only for the sentinel-or-value fields: a detail value
    /// overwrites only when it is known, so a failed or partial detail fetch
    /// never downgrades a field the search pass already filled. Amenities and
    /// location come exclusively from the detail page and overwrite
    /// unconditionally.
    pub fn apply_details(&mut self, details: &ListingDetails) {
        if details.beds.is_some() {
            self.beds = details.beds.clone();
        }
        if details.bedrooms.is_some() {
            self.bedrooms = details.bedrooms.clone();
        }
        if details.bathrooms.is_some() {
            self.bathrooms = details.bathrooms.clone();
        }
        self.amenities = details.amenities.clone();
        self.location = details.location.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_record_serializes_every_field_with_sentinels() {
        let value = serde_json::to_value(ListingRecord::default()).unwrap();
        let object = value.as_object().unwrap();
        for field in [
            "listing_id",
            "url",
            "title",
            "price",
            "price_qualifier",
            "average_rating",
            "host_name",
            "latitude",
            "longitude",
            "beds",
            "guests",
            "bedrooms",
            "bathrooms",
            "location",
            "listing_type",
        ] {
            assert_eq!(object[field], json!("N/A"), "field {field}");
        }
        assert_eq!(object["rating_count"], json!(0));
        assert_eq!(object["host_is_verified"], json!(false));
        assert_eq!(object["host_is_superhost"], json!(false));
        assert_eq!(object["host_years"], json!(0));
        assert_eq!(object["host_months"], json!(0));
        assert_eq!(object["amenities"], json!([]));
        assert_eq!(object["image_urls"], json!([]));
        assert_eq!(object["badges"], json!([]));
    }

    #[test]
    fn coordinates_stay_numeric_when_present() {
        let record = ListingRecord {
            latitude: Some(22.28),
            ..Default::default()
        };
        let value = serde_json::to_value(record).unwrap();
        assert_eq!(value["latitude"], json!(22.28));
        assert_eq!(value["longitude"], json!("N/A"));
    }

    #[test]
    fn merge_never_downgrades_known_fields() {
        let mut record = ListingRecord {
            beds: Some("2 beds".to_string()),
            guests: Some("4 guests".to_string()),
            ..Default::default()
        };
        record.apply_details(&ListingDetails::default());
        assert_eq!(record.beds.as_deref(), Some("2 beds"));
        assert_eq!(record.guests.as_deref(), Some("4 guests"));
        assert!(record.amenities.is_empty());
        assert!(record.location.is_none());
    }

    #[test]
    fn merge_upgrades_unknown_fields_and_overwrites_detail_owned_ones() {
        let mut record = ListingRecord {
            beds: Some("1 bed".to_string()),
            ..Default::default()
        };
        let details = ListingDetails {
            beds: Some("3 beds".to_string()),
            bedrooms: Some("2 bedrooms".to_string()),
            bathrooms: None,
            amenities: vec!["Wi-Fi".to_string()],
            location: Some("Kowloon".to_string()),
        };
        record.apply_details(&details);
        assert_eq!(record.beds.as_deref(), Some("3 beds"));
        assert_eq!(record.bedrooms.as_deref(), Some("2 bedrooms"));
        assert!(record.bathrooms.is_none());
        assert_eq!(record.amenities, vec!["Wi-Fi"]);
        assert_eq!(record.location.as_deref(), Some("Kowloon"));
    }
}
