//! Per-record validation against a [`RuleSet`].
//!
//! Validation is lenient about absence: a field named in the ruleset but
//! missing from the record is simply not evaluated, and can never by itself
//! make the record invalid. This is a deliberate, documented law (see the
//! `absent_field_never_fails` test), not an accident of control flow.

use crate::diagnostics::Logger;
use crate::models::RawRecord;
use crate::rules::RuleSet;
use serde_json::Value;

/// Outcome of validating one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Whether every evaluated rule passed.
    pub is_valid: bool,
    /// Fields whose rule failed, in ruleset order. Used for logging only;
    /// there is no partial accept.
    pub failed_fields: Vec<String>,
}

impl ValidationReport {
    fn valid() -> Self {
        Self {
            is_valid: true,
            failed_fields: Vec::new(),
        }
    }
}

/// Validate a single record.
///
/// Each failing field emits one warning diagnostic naming the record's `id`
/// (when present) and the field. Logging is observability only; it never
/// changes the outcome.
pub fn validate(rules: &RuleSet, record: &RawRecord, log: &Logger) -> ValidationReport {
    let mut report = ValidationReport::valid();

    for (field, rule) in rules.iter() {
        let Some(value) = record.get(field) else {
            // absence is not a failure
            continue;
        };

        if !rule.check(value) {
            log.warning(format!(
                "Validation failed for record ID {}: Field '{}' failed rule.",
                record_id(record),
                field
            ));
            report.is_valid = false;
            report.failed_fields.push(field.clone());
        }
    }

    report
}

/// Display form of a record's `id` field for diagnostics.
fn record_id(record: &RawRecord) -> String {
    match record.get("id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "None".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::LogLevel;
    use serde_json::{json, Map};

    fn record(fields: &[(&str, &str)]) -> RawRecord {
        let mut map = Map::new();
        for (k, v) in fields {
            map.insert((*k).to_string(), json!(v));
        }
        map
    }

    #[test]
    fn test_fully_valid_record() {
        let log = Logger::memory();
        let rec = record(&[
            ("id", "1"),
            ("name", "Alice"),
            ("email", "alice@example.com"),
            ("age", "30"),
            ("created_at", "2024-01-15"),
        ]);

        let report = validate(&RuleSet::standard(), &rec, &log);
        assert!(report.is_valid);
        assert!(report.failed_fields.is_empty());
        assert_eq!(log.entries().len(), 0);
    }

    #[test]
    fn test_valid_email_with_clean_other_fields() {
        // weak email shape is enough when no other field invalidates
        let log = Logger::memory();
        let rec = record(&[("email", "bob@mail.org"), ("name", "Bob")]);
        assert!(validate(&RuleSet::standard(), &rec, &log).is_valid);
    }

    #[test]
    fn test_failing_fields_reported_and_logged() {
        let log = Logger::memory();
        let rec = record(&[
            ("id", "2"),
            ("name", ""),
            ("email", "not-an-email"),
            ("age", "200"),
        ]);

        let report = validate(&RuleSet::standard(), &rec, &log);
        assert!(!report.is_valid);
        assert_eq!(report.failed_fields, vec!["age", "email", "name"]);

        // one warning per failing field, each naming the record id
        assert_eq!(log.count_at(LogLevel::Warning), 3);
        for entry in log.entries() {
            assert!(entry.message.contains("record ID 2"));
        }
    }

    #[test]
    fn absent_field_never_fails() {
        // every ruleset field missing: the record is vacuously valid
        let log = Logger::memory();
        let rec = record(&[("comment", "no governed fields at all")]);

        let report = validate(&RuleSet::standard(), &rec, &log);
        assert!(report.is_valid);
        assert_eq!(log.entries().len(), 0);
    }

    #[test]
    fn test_logging_does_not_change_outcome() {
        let rec = record(&[("age", "999")]);
        let captured = validate(&RuleSet::standard(), &rec, &Logger::memory());
        let to_file = {
            let dir = tempfile::tempdir().unwrap();
            let log = Logger::file(dir.path().join("v.log")).unwrap();
            validate(&RuleSet::standard(), &rec, &log)
        };
        assert_eq!(captured, to_file);
    }

    #[test]
    fn test_missing_id_logged_as_none() {
        let log = Logger::memory();
        let rec = record(&[("name", "")]);
        validate(&RuleSet::standard(), &rec, &log);
        assert!(log.entries()[0].message.contains("record ID None"));
    }
}
