//! Date helper functions

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::fmt::Write;

/// Formats accepted for post dates, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%B %d, %Y", "%b %d, %Y"];

/// Parse a post date in ISO (`2025-03-03`) or long (`March 3, 2025`) form
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
}

/// Serde adapter for [`parse_date`]
pub fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid calendar date: {:?}", raw)))
}

/// Format a date using Moment.js-compatible format string
///
/// # Examples
/// ```ignore
/// format_date(&date, "MMMM D, YYYY") // -> "March 3, 2025"
/// ```
///
/// Falls back to [`full_date`] when the pattern is not a valid format.
pub fn format_date(date: &NaiveDate, format: &str) -> String {
    let chrono_format = moment_to_chrono_format(format);
    let mut out = String::new();
    if write!(out, "{}", date.format(&chrono_format)).is_err() {
        tracing::warn!("Invalid date format {:?}, using default", format);
        return full_date(date);
    }
    out
}

/// Check that a Moment.js-style pattern converts to a usable chrono format
pub fn is_valid_format(format: &str) -> bool {
    let chrono_format = moment_to_chrono_format(format);
    !StrftimeItems::new(&chrono_format).any(|item| matches!(item, Item::Error))
}

/// Format date in full format (like "March 3, 2025")
pub fn full_date(date: &NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Format a date for machine consumption
pub fn date_xml(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest tokens first within each family
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DDDD", "%j"),
        ("DD", "%d"),
        ("D", "%-d"),
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}
