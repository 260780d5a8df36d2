//! Helpers for values coming from the document (forecast) backend.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Extracts a document identifier.
///
/// Accepts a plain string, an extended-JSON `{"$oid": "..."}` object, or any
/// object whose first value is a string. Anything else yields an empty string.
#[must_use]
pub fn extract_document_id(value: &Value) -> String {
    match value {
        Value::String(id) => id.trim().to_string(),
        Value::Object(map) => map
            .get("$oid")
            .map(|oid| match oid {
                Value::String(id) => id.trim().to_string(),
                other => other.to_string().trim().to_string(),
            })
            .or_else(|| {
                map.values()
                    .next()
                    .and_then(Value::as_str)
                    .map(|id| id.trim().to_string())
            })
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Returns `true` for a 24-character hexadecimal object id.
#[must_use]
pub fn is_object_id(id: &str) -> bool {
    id.len() == 24 && id.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Parses a timestamp or date as a UTC calendar date.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS[.fff]` timestamps
/// (read as UTC) and plain `YYYY-MM-DD` dates.
#[must_use]
pub fn parse_utc_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ts.date());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Renders a date for a `date` input (`YYYY-MM-DD`), or empty when unparsable.
#[must_use]
pub fn to_date_input(value: &str) -> String {
    parse_utc_date(value)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
