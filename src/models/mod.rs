//! Domain models for the rowsift pipeline.
//!
//! - [`RawRecord`] - one input row, field name to raw string value
//! - [`ParsedDate`] - a parsed calendar date or an explicit unavailable marker
//! - [`NormalizedRecord`] - the cleaned record emitted to the sink

use chrono::NaiveDate;
use serde::ser::Serializer;
use serde::Serialize;
use serde_json::{Map, Value};

// =============================================================================
// Raw Record
// =============================================================================

/// One row of input data, keyed by field name.
///
/// Values are always `Value::String` as produced by the tabular source; the
/// field set comes from the header row and is not statically fixed.
pub type RawRecord = Map<String, Value>;

// =============================================================================
// Parsed Date
// =============================================================================

/// Outcome of parsing a record's `created_at` field.
///
/// An unparsable date is a recoverable anomaly: the record is kept and this
/// marker is substituted instead of a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDate {
    /// Successfully parsed calendar date.
    Date(NaiveDate),
    /// The raw value could not be parsed as `YYYY-MM-DD`.
    Unavailable,
}

impl ParsedDate {
    pub fn is_available(&self) -> bool {
        matches!(self, ParsedDate::Date(_))
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            ParsedDate::Date(d) => Some(*d),
            ParsedDate::Unavailable => None,
        }
    }
}

impl Serialize for ParsedDate {
    /// Dates serialize via their string representation; the unavailable
    /// marker serializes as JSON null.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParsedDate::Date(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            ParsedDate::Unavailable => serializer.serialize_none(),
        }
    }
}

// =============================================================================
// Normalized Record
// =============================================================================

/// A record that passed validation, after normalization.
///
/// Guaranteed fields are typed; everything else from the raw record passes
/// through unchanged in `extra` (including the original `created_at`
/// string, which coexists with the parsed `created_at_dt`).
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedRecord {
    /// Trimmed, lower-cased name. Empty if missing from the input.
    pub name: String,
    /// Trimmed, lower-cased email. Empty if missing from the input.
    pub email: String,
    /// Age coerced to an integer. Absent or unparsable input becomes 0.
    pub age: i64,
    /// Parsed `created_at`, or the unavailable marker on parse failure.
    #[serde(rename = "created_at_dt")]
    pub created_at: ParsedDate,
    /// All raw fields not overwritten by the normalized ones.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
