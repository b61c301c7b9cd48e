//! Search-query parameters and input validation
//!
//! Dates are validated before any network call happens. Validation failures
//! are user-facing sentences, not errors: the tool surface returns them
//! verbatim as its text payload.

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;
use tracing::info;

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("DATE_RE: hardcoded regex is valid"));

/// Immutable, validated search parameters.
///
/// Seeds the first request URL and is re-attached to every listing URL the
/// extractor constructs, so each emitted record is directly re-fetchable
/// with consistent context.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub place: String,
    /// Check-in date, already normalized to `YYYY-MM-DD` in the current year or later
    pub checkin: String,
    /// Check-out date, same normalization as `checkin`
    pub checkout: String,
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
    pub pets: u32,
    pub price_max: u32,
    pub max_pages: usize,
}

impl SearchQuery {
    /// Total guest count derived from the party breakdown (pets excluded)
    pub fn guests(&self) -> u32 {
        self.adults + self.children + self.infants
    }
}

/// Which date field is being validated, for error wording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateKind {
    CheckIn,
    CheckOut,
}

impl DateKind {
    fn label(self) -> &'static str {
        match self {
            DateKind::CheckIn => "check-in",
            DateKind::CheckOut => "check-out",
        }
    }
}

/// Validate a `YYYY-MM-DD` date string and advance past-year dates.
///
/// A date whose year is behind the current year is silently moved to the
/// current year with month and day preserved; this is logged, not rejected.
/// Malformed input yields the literal user-facing rejection message.
pub fn normalize_date(raw: &str, kind: DateKind) -> Result<String, String> {
    normalize_date_with_year(raw, kind, Local::now().year())
}

fn normalize_date_with_year(raw: &str, kind: DateKind, current_year: i32) -> Result<String, String> {
    if !DATE_RE.is_match(raw) {
        return Err(format!(
            "Invalid {} date format: Must be YYYY-MM-DD.",
            kind.label()
        ));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("Invalid {} date: Unable to parse date.", kind.label()))?;
    if date.year() < current_year {
        let adjusted = format!("{current_year}-{:02}-{:02}", date.month(), date.day());
        info!(
            "Adjusted {} date from {} to {}: {adjusted}",
            kind.label(),
            date.year(),
            current_year
        );
        Ok(adjusted)
    } else {
        Ok(raw.to_string())
    }
}
