//! Static run configuration.
//!
//! Everything here is fixed before the run starts; nothing is
//! runtime-dynamic.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Accumulation size at which the pipeline emits its informational batch
/// diagnostic. Cosmetic: nothing is flushed.
pub const DEFAULT_BATCH_THRESHOLD: usize = 1000;

/// Configuration surface for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Delimited input file.
    pub input: PathBuf,
    /// JSON output file.
    pub output: PathBuf,
    /// Diagnostics file. `None` logs to stderr.
    pub log_path: Option<PathBuf>,
    /// Field delimiter. `None` auto-detects from the first line.
    pub delimiter: Option<char>,
    /// Text encoding label. `None` auto-detects.
    pub encoding: Option<String>,
    /// Batch-diagnostic threshold.
    pub batch_threshold: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input_data.csv"),
            output: PathBuf::from("processed_data.json"),
            log_path: None,
            delimiter: None,
            encoding: None,
            batch_threshold: DEFAULT_BATCH_THRESHOLD,
        }
    }
}
