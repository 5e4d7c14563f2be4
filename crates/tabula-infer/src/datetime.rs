//! Detection and canonical formatting of date/time literals.
//!
//! String classification must not attempt a full datetime parse on every
//! cell, so candidates are gated by a cheap shape check first. Only strings
//! that look like an ISO-8601 date (`2024-01-29`, optionally followed by a
//! time component) reach the real parsers.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

/// Shape gate: four-digit year, then month and day, optionally a time part.
static TEMPORAL_GATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}[-/]\d{1,2}[-/]\d{1,2}([T ].+)?$").expect("valid temporal gate pattern")
});

/// Accepted time-part layouts, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// A parsed temporal literal, preserving whether a time component existed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Temporal {
    /// Date without a time component.
    Date(NaiveDate),
    /// Date and time, timezone-naive (offsets are folded into local time).
    DateTime(NaiveDateTime),
}

/// Parses an ISO-8601-like literal, returning `None` for anything that does
/// not pass the shape gate or the layout parsers.
pub fn parse_temporal(s: &str) -> Option<Temporal> {
    if !TEMPORAL_GATE.is_match(s) {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(Temporal::Date(d));
        }
    }

    // RFC 3339 covers offset and Zulu suffixes.
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(Temporal::DateTime(dt.naive_local()));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Temporal::DateTime(dt));
        }
    }

    None
}

/// Canonical display form for a date: `YYYY-MM-DD`.
pub fn format_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// Canonical display form for a date-time: `YYYY-MM-DD HH:MM:SS`, with a
/// fractional part only when one is present.
pub fn format_datetime(dt: NaiveDateTime) -> String {
    if dt.nanosecond() == 0 {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M:%S%.f").to_string()
    }
}

impl Temporal {
    /// Canonical display form of either variant.
    pub fn canonical(&self) -> String {
        match self {
            Temporal::Date(d) => format_date(*d),
            Temporal::DateTime(dt) => format_datetime(*dt),
        }
    }
}
