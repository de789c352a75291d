//! Record normalization.
//!
//! [`transform`] turns a validated [`RawRecord`] into a [`NormalizedRecord`].
//! It is deterministic and never mutates its input; each output field is
//! derived independently.
//!
//! Missing-value policy is intentionally asymmetric and must stay that way:
//!
//! - `age`: absent *or* unparsable input becomes the integer 0 (the
//!   unparsable case also logs a warning);
//! - `created_at`: unparsable input becomes the explicit
//!   [`ParsedDate::Unavailable`] marker, with one warning logged.

use crate::diagnostics::Logger;
use crate::models::{NormalizedRecord, ParsedDate, RawRecord};
use chrono::NaiveDate;
use serde_json::Value;

/// Remove leading/trailing whitespace and convert to lowercase.
pub fn clean_string(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Parse a `YYYY-MM-DD` date string.
///
/// Failure is recoverable: the unavailable marker is substituted and a
/// warning is emitted.
pub fn parse_date(date_str: &str, log: &Logger) -> ParsedDate {
    match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        Ok(date) => ParsedDate::Date(date),
        Err(_) => {
            log.warning(format!("Invalid date format: {}", date_str));
            ParsedDate::Unavailable
        }
    }
}

/// Normalize one record.
///
/// Expected never to fail for string input: anomalies degrade to defaults
/// or markers, with warnings on the diagnostics stream.
pub fn transform(record: &RawRecord, log: &Logger) -> NormalizedRecord {
    let name = clean_string(field_str(record, "name"));
    let email = clean_string(field_str(record, "email"));
    let age = parse_age(record, log);
    let created_at = parse_date(field_str(record, "created_at"), log);

    // Pass everything else through unchanged. The raw `created_at` string
    // stays; only the fields overwritten above are dropped from `extra`.
    let extra = record
        .iter()
        .filter(|(key, _)| !matches!(key.as_str(), "name" | "email" | "age"))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    NormalizedRecord {
        name,
        email,
        age,
        created_at,
        extra,
    }
}

fn field_str<'a>(record: &'a RawRecord, field: &str) -> &'a str {
    record.get(field).and_then(Value::as_str).unwrap_or("")
}

/// Coerce `age` to an integer. Absent defaults to 0 before parsing;
/// a present but unparsable value also degrades to 0.
fn parse_age(record: &RawRecord, log: &Logger) -> i64 {
    match record.get("age").and_then(Value::as_str) {
        None | Some("") => 0,
        Some(raw) => match raw.trim().parse() {
            Ok(n) => n,
            Err(_) => {
                log.warning(format!("Invalid age value: {}", raw));
                0
            }
        },
    }
}
