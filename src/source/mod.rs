//! Record sources: where raw records come from.
//!
//! [`RecordSource`] is the boundary the pipeline pulls from: a lazy, finite
//! sequence of [`RawRecord`]s, requested once per run. [`CsvFileSource`]
//! reads delimited text with a header row, with encoding and delimiter
//! either configured or auto-detected. [`StaticSource`] serves in-memory
//! records for tests.

use crate::error::{SourceError, SourceResult};
use crate::models::RawRecord;
use serde_json::{Map, Value};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// One-per-run iterator of raw records.
pub type RecordIter = Box<dyn Iterator<Item = SourceResult<RawRecord>>>;

/// Produces the raw record sequence for a run.
///
/// Implementations must be restartable: each `records` call starts the
/// sequence over from the beginning.
pub trait RecordSource {
    fn records(&mut self) -> SourceResult<RecordIter>;
}

// =============================================================================
// Encoding and delimiter detection
// =============================================================================

/// Detect the encoding of raw bytes using chardet, normalizing common
/// charset aliases.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string using the given encoding label.
pub fn decode_content(bytes: &[u8], encoding: &str) -> SourceResult<String> {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => Ok(String::from_utf8_lossy(bytes).into_owned()),
        label => match encoding_rs::Encoding::for_label(label.as_bytes()) {
            Some(enc) => Ok(enc.decode(bytes).0.into_owned()),
            None => Err(SourceError::Decode(format!(
                "Unknown encoding label: {}",
                encoding
            ))),
        },
    }
}

/// Detect the field delimiter by counting candidate occurrences in the
/// first line.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

// =============================================================================
// CSV file source
// =============================================================================

/// Reads raw records from a delimited text file with a header row.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
    delimiter: Option<char>,
    encoding: Option<String>,
}

impl CsvFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            delimiter: None,
            encoding: None,
        }
    }

    /// Force a delimiter instead of auto-detecting it.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Force a text encoding instead of auto-detecting it.
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }
}

impl RecordSource for CsvFileSource {
    fn records(&mut self) -> SourceResult<RecordIter> {
        let bytes =
            std::fs::read(&self.path).map_err(|e| SourceError::from_io(e, &self.path))?;

        let encoding = self
            .encoding
            .clone()
            .unwrap_or_else(|| detect_encoding(&bytes));
        let content = decode_content(&bytes, &encoding)?;
        let delimiter = self.delimiter.unwrap_or_else(|| detect_delimiter(&content));

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter as u8)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(Cursor::new(content));

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_matches('"').to_string())
            .collect();
        if headers.is_empty() || headers.iter().all(String::is_empty) {
            return Err(SourceError::NoHeaders);
        }

        Ok(Box::new(reader.into_records().map(move |row| {
            let row = row?;
            let mut record = Map::new();
            for (i, header) in headers.iter().enumerate() {
                // short rows pad missing trailing fields with empty strings
                let value = row.get(i).unwrap_or("");
                record.insert(header.clone(), Value::String(value.to_string()));
            }
            Ok(record)
        })))
    }
}

// =============================================================================
// Static source (tests)
// =============================================================================

/// Serves a fixed record sequence from memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<RawRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }
}

impl RecordSource for StaticSource {
    fn records(&mut self) -> SourceResult<RecordIter> {
        Ok(Box::new(self.records.clone().into_iter().map(Ok)))
    }
}
