//! Record sinks: where normalized records go.
//!
//! The pipeline hands the full accumulated sequence to a [`RecordSink`]
//! exactly once, after the pass has completed. [`JsonFileSink`] writes a
//! pretty-printed JSON array; [`MemorySink`] captures the document for
//! tests.

use crate::error::SinkResult;
use crate::models::NormalizedRecord;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Serializes the accumulated records to their destination.
pub trait RecordSink {
    fn write(&mut self, records: &[NormalizedRecord]) -> SinkResult<()>;
}

// =============================================================================
// JSON file sink
// =============================================================================

/// Writes records as a single pretty-printed JSON array.
///
/// Non-JSON-native values (parsed dates) serialize via their string
/// representation; the date-unavailable marker serializes as null.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl RecordSink for JsonFileSink {
    fn write(&mut self, records: &[NormalizedRecord]) -> SinkResult<()> {
        let json = serde_json::to_string_pretty(records)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

// =============================================================================
// Memory sink (tests)
// =============================================================================

/// Captures the written document in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    document: Option<Vec<Value>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The captured document, if `write` was called.
    pub fn document(&self) -> Option<&[Value]> {
        self.document.as_deref()
    }
}

impl RecordSink for MemorySink {
    fn write(&mut self, records: &[NormalizedRecord]) -> SinkResult<()> {
        let document = records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        self.document = Some(document);
        Ok(())
    }
}
