//! Pipeline orchestration.
//!
//! [`Pipeline::run`] drives one complete pass: pull raw records from a
//! [`RecordSource`] one at a time, validate, transform, accumulate, and
//! finally hand the full accumulation to a [`RecordSink`].
//!
//! Record-level problems (validation failures, transformation anomalies)
//! never abort the run; source and sink failures always do. On a fatal
//! failure no output document is written and the typed error is both logged
//! at critical level and returned to the caller.

use crate::config::DEFAULT_BATCH_THRESHOLD;
use crate::diagnostics::Logger;
use crate::error::PipelineResult;
use crate::models::NormalizedRecord;
use crate::rules::RuleSet;
use crate::sink::RecordSink;
use crate::source::RecordSource;
use crate::transform::transform;
use crate::validate::validate;
use serde::Serialize;

// =============================================================================
// Run statistics
// =============================================================================

/// Run-level counters, reported at run end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Records pulled from the source.
    pub total: usize,
    /// Records that passed validation and were emitted.
    pub valid: usize,
}

impl RunStats {
    /// Records discarded by validation. `total == valid + skipped` always
    /// holds.
    pub fn skipped(&self) -> usize {
        self.total - self.valid
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Single-pass batch pipeline: source -> validate -> transform -> sink.
pub struct Pipeline {
    rules: RuleSet,
    batch_threshold: usize,
}

impl Pipeline {
    pub fn new(rules: RuleSet, batch_threshold: usize) -> Self {
        Self {
            rules,
            batch_threshold,
        }
    }

    /// Pipeline with the standard ruleset and default batch threshold.
    pub fn standard() -> Self {
        Self::new(RuleSet::standard(), DEFAULT_BATCH_THRESHOLD)
    }

    /// Execute one run.
    ///
    /// Returns the run counters on success. Any source or sink failure is
    /// fatal: it is logged where it surfaces, logged once more at critical
    /// level here, and returned as a typed error. The sink is invoked only
    /// after the full pass succeeds, so a failed run writes no output.
    pub fn run(
        &self,
        source: &mut dyn RecordSource,
        sink: &mut dyn RecordSink,
        log: &Logger,
    ) -> PipelineResult<RunStats> {
        match self.run_inner(source, sink, log) {
            Ok(stats) => Ok(stats),
            Err(err) => {
                log.critical(format!(
                    "A critical error occurred during processing: {}",
                    err
                ));
                Err(err)
            }
        }
    }

    fn run_inner(
        &self,
        source: &mut dyn RecordSource,
        sink: &mut dyn RecordSink,
        log: &Logger,
    ) -> PipelineResult<RunStats> {
        log.info("Starting data processing...");

        let mut stats = RunStats::default();
        let mut processed: Vec<NormalizedRecord> = Vec::new();

        let records = source.records().map_err(|e| {
            log.error(format!("Error reading input: {}", e));
            e
        })?;

        for record in records {
            let record = record.map_err(|e| {
                log.error(format!("Error reading input: {}", e));
                e
            })?;
            stats.total += 1;

            let report = validate(&self.rules, &record, log);
            if !report.is_valid {
                log.warning(format!(
                    "Skipping invalid record: {}",
                    serde_json::Value::Object(record)
                ));
                continue;
            }

            processed.push(transform(&record, log));
            stats.valid += 1;

            // Informational only: nothing is flushed and the accumulation
            // stays unbounded.
            if self.batch_threshold > 0 && processed.len() % self.batch_threshold == 0 {
                log.info(format!("Processed {} records in a batch.", processed.len()));
            }
        }

        log.info(format!(
            "Finished reading {} records. {} valid records found.",
            stats.total, stats.valid
        ));

        sink.write(&processed).map_err(|e| {
            log.error(format!("Error writing output: {}", e));
            e
        })?;
        log.info(format!(
            "Processed data written ({} records).",
            processed.len()
        ));

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::LogLevel;
    use crate::sink::{JsonFileSink, MemorySink};
    use crate::source::{CsvFileSource, StaticSource};
    use serde_json::{json, Map};
    use std::io::Write;

    fn record(fields: &[(&str, &str)]) -> Map<String, serde_json::Value> {
        let mut map = Map::new();
        for (k, v) in fields {
            map.insert((*k).to_string(), json!(v));
        }
        map
    }

    fn three_records() -> Vec<Map<String, serde_json::Value>> {
        vec![
            record(&[
                ("id", "1"),
                ("name", "Alice"),
                ("email", "alice@example.com"),
                ("age", "30"),
                ("created_at", "2024-01-15"),
            ]),
            // invalid: unparsable age plus an out-of-range id
            record(&[
                ("id", "0"),
                ("name", "Bob"),
                ("email", "bob@example.com"),
                ("age", "abc"),
                ("created_at", "2024-02-01"),
            ]),
            record(&[
                ("id", "3"),
                ("name", "Carol"),
                ("email", "carol@example.com"),
                ("age", "45"),
                ("created_at", "2024-03-20"),
            ]),
        ]
    }

    #[test]
    fn test_end_to_end_skips_invalid_record() {
        let log = Logger::memory();
        let mut source = StaticSource::new(three_records());
        let mut sink = MemorySink::new();

        let stats = Pipeline::standard()
            .run(&mut source, &mut sink, &log)
            .unwrap();

        assert_eq!(stats.total, 3);
        assert_eq!(stats.valid, 2);
        assert_eq!(stats.skipped(), 1);

        let doc = sink.document().unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc[0]["id"], "1");
        assert_eq!(doc[1]["id"], "3");
        assert!(doc.iter().all(|r| r["id"] != "0"));
        assert_eq!(doc[1]["age"], 45);
    }

    #[test]
    fn test_counters_law() {
        let log = Logger::memory();
        let mut source = StaticSource::new(three_records());
        let mut sink = MemorySink::new();

        let stats = Pipeline::standard()
            .run(&mut source, &mut sink, &log)
            .unwrap();
        assert_eq!(stats.total, stats.valid + stats.skipped());
        assert!(stats.valid <= stats.total);
    }

    #[test]
    fn test_summary_diagnostic() {
        let log = Logger::memory();
        let mut source = StaticSource::new(three_records());
        let mut sink = MemorySink::new();

        Pipeline::standard()
            .run(&mut source, &mut sink, &log)
            .unwrap();

        assert!(log.entries().iter().any(|e| {
            e.level == LogLevel::Info
                && e.message == "Finished reading 3 records. 2 valid records found."
        }));
    }

    #[test]
    fn test_batch_diagnostic_is_periodic() {
        let log = Logger::memory();
        let records: Vec<_> = (1..=5)
            .map(|i| {
                record(&[
                    ("id", &i.to_string()),
                    ("name", "n"),
                    ("email", "n@x.y"),
                    ("age", "20"),
                    ("created_at", "2024-01-15"),
                ])
            })
            .collect();
        let mut source = StaticSource::new(records);
        let mut sink = MemorySink::new();

        Pipeline::new(RuleSet::standard(), 2)
            .run(&mut source, &mut sink, &log)
            .unwrap();

        let batch_lines: Vec<_> = log
            .entries()
            .into_iter()
            .filter(|e| e.message.contains("records in a batch"))
            .collect();
        // thresholds at 2 and 4 accumulated records
        assert_eq!(batch_lines.len(), 2);
        assert!(batch_lines[0].message.contains("Processed 2 records"));
        assert!(batch_lines[1].message.contains("Processed 4 records"));
    }

    #[test]
    fn test_source_not_found_is_fatal_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out_path = dir.path().join("out.json");

        let log = Logger::memory();
        let mut source = CsvFileSource::new(dir.path().join("missing.csv"));
        let mut sink = JsonFileSink::new(&out_path);

        let result = Pipeline::standard().run(&mut source, &mut sink, &log);
        assert!(result.is_err());
        assert!(!out_path.exists());
        assert_eq!(log.count_at(LogLevel::Critical), 1);
        assert_eq!(log.count_at(LogLevel::Error), 1);
    }

    #[test]
    fn test_sink_failure_is_fatal() {
        let log = Logger::memory();
        let mut source = StaticSource::new(three_records());
        let mut sink = JsonFileSink::new("/no/such/dir/out.json");

        let result = Pipeline::standard().run(&mut source, &mut sink, &log);
        assert!(result.is_err());
        assert_eq!(log.count_at(LogLevel::Critical), 1);
    }

    #[test]
    fn test_file_to_file_run() {
        let dir = tempfile::tempdir().unwrap();
        let in_path = dir.path().join("input.csv");
        let out_path = dir.path().join("output.json");

        let mut file = std::fs::File::create(&in_path).unwrap();
        writeln!(file, "id,name,email,age,created_at").unwrap();
        writeln!(file, "1, Alice ,ALICE@Example.com,30,2024-01-15").unwrap();
        writeln!(file, "2,Bob,bob@example.com,30,not-a-date").unwrap();
        drop(file);

        let log = Logger::memory();
        let mut source = CsvFileSource::new(&in_path);
        let mut sink = JsonFileSink::new(&out_path);

        let stats = Pipeline::standard()
            .run(&mut source, &mut sink, &log)
            .unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.valid, 2);

        let doc: Vec<serde_json::Value> =
            serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
        assert_eq!(doc[0]["name"], "alice");
        assert_eq!(doc[0]["email"], "alice@example.com");
        assert_eq!(doc[0]["created_at_dt"], "2024-01-15");
        // "not-a-date" is 10 characters: shape passes validation, the
        // transformer substitutes the unavailable marker
        assert!(doc[1]["created_at_dt"].is_null());
    }

    #[test]
    fn test_empty_source_still_writes_document() {
        let log = Logger::memory();
        let mut source = StaticSource::new(vec![]);
        let mut sink = MemorySink::new();

        let stats = Pipeline::standard()
            .run(&mut source, &mut sink, &log)
            .unwrap();
        assert_eq!(stats.total, 0);
        assert_eq!(sink.document().unwrap().len(), 0);
    }
}
