//! Error types for the rowsift pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`SourceError`] - reading and decoding the tabular input
//! - [`SinkError`] - writing the output document
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.
//!
//! Per-record validation failures and transformation anomalies are *not*
//! errors: they are reported through the diagnostics stream and the record
//! is skipped (or a marker is substituted). Only I/O and structural
//! problems surface here.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Source Errors
// =============================================================================

/// Errors while reading the delimited input.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Input file does not exist.
    #[error("Input file not found: {0}")]
    NotFound(PathBuf),

    /// Any other failure while reading the input.
    #[error("Failed to read input: {0}")]
    Read(String),

    /// Failed to decode bytes with the requested or detected encoding.
    #[error("Failed to decode input: {0}")]
    Decode(String),

    /// Malformed delimited data.
    #[error("Invalid CSV data: {0}")]
    Csv(#[from] csv::Error),

    /// No header row found.
    #[error("No headers found in input")]
    NoHeaders,
}

impl SourceError {
    /// Classify an I/O error, keeping "not found" distinct from generic
    /// read failures.
    pub fn from_io(err: std::io::Error, path: &std::path::Path) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            SourceError::NotFound(path.to_path_buf())
        } else {
            SourceError::Read(err.to_string())
        }
    }
}

// =============================================================================
// Sink Errors
// =============================================================================

/// Errors while writing the output document.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Failed to write the output file.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize records to JSON.
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the error type returned by [`crate::pipeline::Pipeline::run`].
/// Any of these is fatal to the run: no output document is produced.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Source error.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Sink error.
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Result type for sink operations.
pub type SinkResult<T> = Result<T, SinkError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
