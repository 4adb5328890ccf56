use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

use crate::error::{Result, ToolError};
use crate::model::CellValue;

/// Canonical rendering of dates in the flattened output, e.g. `31-May-2025`.
pub const DATE_OUTPUT_FORMAT: &str = "%d-%b-%Y";

static ISO_DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").expect("date prefix pattern is valid"));

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Returns `true` when the text starts with a `YYYY-MM-DD` date.
pub fn has_iso_date_prefix(text: &str) -> bool {
    ISO_DATE_PREFIX.is_match(text)
}

/// Returns `true` when a value is a native timestamp or text that starts with
/// a `YYYY-MM-DD` date.
pub fn is_date_value(value: &CellValue) -> bool {
    match value {
        CellValue::Timestamp(_) => true,
        CellValue::Text(text) => has_iso_date_prefix(text),
        CellValue::Empty => false,
    }
}

/// Classifies a column from its first value only. A column whose first row is
/// not a date is never treated as a date column.
pub fn is_date_column<'a>(mut values: impl Iterator<Item = &'a CellValue>) -> bool {
    values.next().is_some_and(is_date_value)
}

/// Renders a date-like value as `DD-Mon-YYYY`.
///
/// Missing values become an empty string and text that does not start with a
/// `YYYY-MM-DD` date passes through unchanged. Text that carries the prefix but
/// is not a valid date is an error, which callers treat as a failed column.
pub fn format_date(value: &CellValue) -> Result<String> {
    match value {
        CellValue::Empty => Ok(String::new()),
        CellValue::Timestamp(timestamp) => Ok(render(timestamp)),
        CellValue::Text(text) if has_iso_date_prefix(text) => {
            parse_date_text(text).map(|timestamp| render(&timestamp))
        }
        CellValue::Text(text) => Ok(text.clone()),
    }
}

/// Parses text starting with `YYYY-MM-DD`, optionally followed by a time of
/// day and an RFC 3339 offset. The offset is dropped and the local date kept.
pub fn parse_date_text(text: &str) -> Result<NaiveDateTime> {
    let trimmed = text.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    for format in DATETIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(timestamp);
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| timestamp.naive_local())
        .map_err(|_| ToolError::InvalidDate(text.to_string()))
}

fn render(timestamp: &NaiveDateTime) -> String {
    timestamp.format(DATE_OUTPUT_FORMAT).to_string()
}
