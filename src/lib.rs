//! # Rowsift - delimited record validation and normalization
//!
//! Rowsift reads tabular records from delimited text, validates each record
//! against a per-field ruleset, normalizes the survivors, and writes them as
//! a single JSON document. One linear pass per run; invalid records are
//! skipped and logged, I/O failures abort the run.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV File   │────▶│  Validator  │────▶│ Transformer │────▶│  JSON File  │
//! │ (auto-enc)  │     │  (RuleSet)  │     │ (normalize) │     │  (array)    │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rowsift::{CsvFileSource, JsonFileSink, Logger, Pipeline};
//!
//! let log = Logger::stderr();
//! let mut source = CsvFileSource::new("input_data.csv");
//! let mut sink = JsonFileSink::new("processed_data.json");
//!
//! let stats = Pipeline::standard().run(&mut source, &mut sink, &log)?;
//! println!("kept {} of {} records", stats.valid, stats.total);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - hierarchical error types
//! - [`models`] - record model (raw, normalized, parsed date)
//! - [`rules`] - data-driven validation rules
//! - [`validate`] - per-record validation
//! - [`transform`] - normalization
//! - [`source`] / [`sink`] - input/output boundaries
//! - [`diagnostics`] - leveled, timestamped logging
//! - [`pipeline`] - orchestration and run statistics
//! - [`config`] - static run configuration

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Validation
pub mod rules;
pub mod validate;

// Normalization
pub mod transform;

// Boundaries
pub mod sink;
pub mod source;

// Observability
pub mod diagnostics;

// Orchestration
pub mod pipeline;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{PipelineError, PipelineResult, SinkError, SinkResult, SourceError, SourceResult};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{NormalizedRecord, ParsedDate, RawRecord};

// =============================================================================
// Re-exports - Rules and validation
// =============================================================================

pub use rules::{Rule, RuleSet, ValueKind};
pub use validate::{validate, ValidationReport};

// =============================================================================
// Re-exports - Transformation
// =============================================================================

pub use transform::{clean_string, parse_date, transform};

// =============================================================================
// Re-exports - Boundaries
// =============================================================================

pub use sink::{JsonFileSink, MemorySink, RecordSink};
pub use source::{
    decode_content, detect_delimiter, detect_encoding, CsvFileSource, RecordSource, StaticSource,
};

// =============================================================================
// Re-exports - Diagnostics
// =============================================================================

pub use diagnostics::{LogEntry, LogLevel, Logger};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use config::RunConfig;
pub use pipeline::{Pipeline, RunStats};
