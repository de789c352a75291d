//! Validation rules.
//!
//! A [`Rule`] is a data-driven predicate over a single field value. Rules are
//! tagged variants rather than opaque callables so a ruleset can be
//! serialized, inspected, and tested in isolation.
//!
//! Every rule is total over raw string input: a value the rule cannot
//! interpret (e.g. a non-numeric string fed to a numeric check) fails the
//! rule, it never panics.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// =============================================================================
// Rule
// =============================================================================

/// Value kinds recognized by [`Rule::TypeCheck`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Parses as a signed integer.
    Integer,
    /// Any textual value.
    Text,
}

/// All available validation rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rule {
    /// Value is of the given kind.
    TypeCheck { kind: ValueKind },

    /// Value parses as an integer within the given bounds (inclusive).
    /// An open bound is omitted.
    RangeCheck {
        #[serde(default)]
        min: Option<i64>,
        #[serde(default)]
        max: Option<i64>,
    },

    /// Value is a non-empty string.
    NonEmpty,

    /// Value contains every required substring.
    SubstringPresence { required: Vec<String> },

    /// Value is exactly this many characters long.
    LengthExact { length: usize },
}

impl Rule {
    /// Apply this rule to a value. Total: never panics, never errors.
    pub fn check(&self, value: &Value) -> bool {
        match self {
            Rule::TypeCheck { kind } => self.check_type(value, *kind),
            Rule::RangeCheck { min, max } => self.check_range(value, *min, *max),
            Rule::NonEmpty => self.check_non_empty(value),
            Rule::SubstringPresence { required } => self.check_substrings(value, required),
            Rule::LengthExact { length } => self.check_length(value, *length),
        }
    }

    fn as_string(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn as_integer(value: &Value) -> Option<i64> {
        match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn check_type(&self, value: &Value, kind: ValueKind) -> bool {
        match kind {
            ValueKind::Integer => Self::as_integer(value).is_some(),
            ValueKind::Text => matches!(value, Value::String(_)),
        }
    }

    fn check_range(&self, value: &Value, min: Option<i64>, max: Option<i64>) -> bool {
        match Self::as_integer(value) {
            Some(n) => min.map_or(true, |lo| n >= lo) && max.map_or(true, |hi| n <= hi),
            None => false,
        }
    }

    fn check_non_empty(&self, value: &Value) -> bool {
        match Self::as_string(value) {
            Some(s) => !s.is_empty(),
            None => false,
        }
    }

    fn check_substrings(&self, value: &Value, required: &[String]) -> bool {
        match Self::as_string(value) {
            Some(s) => required.iter().all(|sub| s.contains(sub.as_str())),
            None => false,
        }
    }

    fn check_length(&self, value: &Value, length: usize) -> bool {
        match Self::as_string(value) {
            Some(s) => s.chars().count() == length,
            None => false,
        }
    }
}

// =============================================================================
// RuleSet
// =============================================================================

/// Immutable mapping from field name to the rule governing it.
///
/// Fields absent from a record are not evaluated; a ruleset only constrains
/// values that are actually present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSet {
    rules: BTreeMap<String, Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style rule registration.
    pub fn with_rule(mut self, field: impl Into<String>, rule: Rule) -> Self {
        self.rules.insert(field.into(), rule);
        self
    }

    /// The fixed domain vocabulary:
    ///
    /// - `id` - positive integer
    /// - `name` - non-empty string
    /// - `email` - contains both `@` and `.` (intentionally weak)
    /// - `age` - integer in [0, 120]
    /// - `created_at` - exactly 10 characters (format-shaped only)
    pub fn standard() -> Self {
        Self::new()
            .with_rule(
                "id",
                Rule::RangeCheck {
                    min: Some(1),
                    max: None,
                },
            )
            .with_rule("name", Rule::NonEmpty)
            .with_rule(
                "email",
                Rule::SubstringPresence {
                    required: vec!["@".to_string(), ".".to_string()],
                },
            )
            .with_rule(
                "age",
                Rule::RangeCheck {
                    min: Some(0),
                    max: Some(120),
                },
            )
            .with_rule("created_at", Rule::LengthExact { length: 10 })
    }

    pub fn get(&self, field: &str) -> Option<&Rule> {
        self.rules.get(field)
    }

    /// Iterate rules in a stable (field-name) order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Rule)> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
