//! Schema layer
//!
//! Turns untyped JSON records into typed values. Every reader method records
//! a [`Violation`] instead of returning early, so a single pass reports all
//! problems with a record rather than just the first.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::platform::ClosedSet;

/// The nature of a single schema violation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// Required field absent or null
    Missing,
    /// Field present with the wrong JSON type
    WrongType {
        /// Human readable name of the expected type
        expected: &'static str,
    },
    /// Numeric value outside its inclusive bounds
    OutOfRange {
        /// The bound that was violated, e.g. `"0 <= x <= 1"`
        constraint: String,
    },
    /// Text field that must not be empty
    EmptyText,
    /// List field that must hold at least one element
    EmptyList,
    /// Value outside a closed enumeration
    UnknownVariant {
        /// The rejected value
        value: String,
        /// Accepted values
        allowed: &'static [&'static str],
    },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "field required"),
            Self::WrongType { expected } => write!(f, "expected {expected}"),
            Self::OutOfRange { constraint } => write!(f, "out of range ({constraint})"),
            Self::EmptyText => write!(f, "must not be empty"),
            Self::EmptyList => write!(f, "must contain at least one item"),
            Self::UnknownVariant { value, allowed } => {
                write!(f, "'{value}' is not one of [{}]", allowed.join(", "))
            }
        }
    }
}

/// A violated field and what was wrong with it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Dotted path of the field, e.g. `content.text` or `sources[1]`
    pub field: String,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(field: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

/// One or more violations found while validating a record
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} validation error(s): {}", .violations.len(), summarize(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Shorthand for an error holding a single violation
    pub fn single(field: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            violations: vec![Violation::new(field, kind)],
        }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Names of every offending field, in discovery order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.field.as_str())
    }

    /// Whether any violation names `field`
    pub fn mentions(&self, field: &str) -> bool {
        self.fields().any(|f| f == field)
    }

    /// The violation recorded for `field`, if any
    pub fn kind_of(&self, field: &str) -> Option<&ViolationKind> {
        self.violations
            .iter()
            .find(|v| v.field == field)
            .map(|v| &v.kind)
    }
}

/// Accumulator for violations found while checking a typed record
#[derive(Debug, Default)]
pub struct Violations {
    items: Vec<Violation>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, kind: ViolationKind) {
        self.items.push(Violation::new(field, kind));
    }

    /// Record `kind` against `field` unless `ok` holds
    pub fn check(&mut self, ok: bool, field: &str, kind: impl FnOnce() -> ViolationKind) {
        if !ok {
            self.push(field, kind());
        }
    }

    pub fn check_text(&mut self, field: &str, value: &str) {
        self.check(!value.is_empty(), field, || ViolationKind::EmptyText);
    }

    pub fn check_list<T>(&mut self, field: &str, value: &[T]) {
        self.check(!value.is_empty(), field, || ViolationKind::EmptyList);
    }

    /// Inclusive `[min, max]` bound for a float; NaN never passes
    pub fn check_f64_range(&mut self, field: &str, value: f64, min: f64, max: f64) {
        self.check((min..=max).contains(&value), field, || {
            ViolationKind::OutOfRange {
                constraint: format!("{min} <= x <= {max}"),
            }
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.items.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                violations: self.items,
            })
        }
    }

    fn into_error(self) -> ValidationError {
        ValidationError {
            violations: self.items,
        }
    }
}

/// Parse an ISO-8601 date-time. Values without an offset are taken as UTC.
fn parse_iso8601(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    text.parse::<NaiveDateTime>().ok().map(|naive| naive.and_utc())
}

/// Reads typed fields out of a JSON object, collecting violations as it goes.
///
/// Each accessor returns `None` whenever it recorded a violation, so once
/// [`FieldReader::is_clean`] holds every `Option` produced by a required
/// accessor is `Some`.
pub struct FieldReader<'a> {
    object: Option<&'a Map<String, Value>>,
    prefix: String,
    violations: Violations,
}

impl<'a> FieldReader<'a> {
    /// Start reading a top-level record
    pub fn new(value: &'a Value) -> Self {
        Self::nested(value, "")
    }

    /// Start reading a nested record whose fields are reported as `{prefix}.{name}`
    pub fn nested(value: &'a Value, prefix: &str) -> Self {
        let mut violations = Violations::new();
        let object = value.as_object();
        if object.is_none() {
            let field = if prefix.is_empty() { "$" } else { prefix };
            violations.push(field, ViolationKind::WrongType { expected: "object" });
        }

        Self {
            object,
            prefix: prefix.to_string(),
            violations,
        }
    }

    fn path(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.prefix, name)
        }
    }

    /// Raw value of `name`, treating JSON `null` as absent
    pub fn raw(&self, name: &str) -> Option<&'a Value> {
        self.object
            .and_then(|o| o.get(name))
            .filter(|v| !v.is_null())
    }

    /// Record a violation against `name` (path-qualified)
    pub fn reject(&mut self, name: &str, kind: ViolationKind) {
        let path = self.path(name);
        self.violations.push(path, kind);
    }

    fn present(&mut self, name: &str) -> Option<&'a Value> {
        let value = self.raw(name);
        if value.is_none() && self.object.is_some() {
            self.reject(name, ViolationKind::Missing);
        }
        value
    }

    fn as_text(&mut self, name: &str, value: &Value) -> Option<String> {
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.reject(name, ViolationKind::WrongType { expected: "string" });
                None
            }
        }
    }

    fn non_empty(&mut self, name: &str, text: String) -> Option<String> {
        if text.is_empty() {
            self.reject(name, ViolationKind::EmptyText);
            None
        } else {
            Some(text)
        }
    }

    /// Required, non-empty string
    pub fn required_text(&mut self, name: &str) -> Option<String> {
        let value = self.present(name)?;
        let text = self.as_text(name, value)?;
        self.non_empty(name, text)
    }

    /// Non-empty string that falls back to `default` when absent
    pub fn text_or(&mut self, name: &str, default: &str) -> Option<String> {
        match self.raw(name) {
            None => Some(default.to_string()),
            Some(value) => {
                let text = self.as_text(name, value)?;
                self.non_empty(name, text)
            }
        }
    }

    /// Optional string; empty strings are kept as given
    pub fn optional_text(&mut self, name: &str) -> Option<String> {
        let value = self.raw(name)?;
        self.as_text(name, value)
    }

    /// Integer within inclusive `[min, max]`, or `default` when absent.
    ///
    /// A `None` default makes the field required.
    pub fn integer_in(
        &mut self,
        name: &str,
        default: Option<u64>,
        min: u64,
        max: u64,
    ) -> Option<u64> {
        let value = match (self.raw(name), default) {
            (Some(value), _) => value,
            (None, Some(default)) => return Some(default),
            (None, None) => {
                self.present(name);
                return None;
            }
        };

        if !(value.is_i64() || value.is_u64()) {
            self.reject(name, ViolationKind::WrongType { expected: "integer" });
            return None;
        }

        let constraint = if max == u64::MAX {
            format!("x >= {min}")
        } else {
            format!("{min} <= x <= {max}")
        };

        match value.as_u64() {
            Some(n) if (min..=max).contains(&n) => Some(n),
            _ => {
                self.reject(name, ViolationKind::OutOfRange { constraint });
                None
            }
        }
    }

    /// Required number within inclusive `[min, max]`
    pub fn number_in(&mut self, name: &str, min: f64, max: f64) -> Option<f64> {
        let value = self.present(name)?;
        let Some(n) = value.as_f64() else {
            self.reject(name, ViolationKind::WrongType { expected: "number" });
            return None;
        };

        if (min..=max).contains(&n) {
            Some(n)
        } else {
            self.reject(
                name,
                ViolationKind::OutOfRange {
                    constraint: format!("{min} <= x <= {max}"),
                },
            );
            None
        }
    }

    /// Boolean, or `default` when absent
    pub fn bool_or(&mut self, name: &str, default: bool) -> Option<bool> {
        match self.raw(name) {
            None => Some(default),
            Some(Value::Bool(b)) => Some(*b),
            Some(_) => {
                self.reject(name, ViolationKind::WrongType { expected: "boolean" });
                None
            }
        }
    }

    /// Required list of strings with at least one element
    pub fn non_empty_list(&mut self, name: &str) -> Option<Vec<String>> {
        let value = self.present(name)?;
        let Some(items) = value.as_array() else {
            self.reject(name, ViolationKind::WrongType { expected: "array" });
            return None;
        };

        if items.is_empty() {
            self.reject(name, ViolationKind::EmptyList);
            return None;
        }

        let mut out = Vec::with_capacity(items.len());
        let mut clean = true;
        for (i, item) in items.iter().enumerate() {
            match item.as_str() {
                Some(s) => out.push(s.to_string()),
                None => {
                    self.reject(
                        &format!("{name}[{i}]"),
                        ViolationKind::WrongType { expected: "string" },
                    );
                    clean = false;
                }
            }
        }

        clean.then_some(out)
    }

    fn parse_timestamp(&mut self, name: &str, value: &Value) -> Option<DateTime<Utc>> {
        let parsed = value.as_str().and_then(parse_iso8601);
        if parsed.is_none() {
            self.reject(
                name,
                ViolationKind::WrongType {
                    expected: "ISO-8601 timestamp",
                },
            );
        }
        parsed
    }

    /// Required ISO-8601 timestamp, normalized to UTC
    pub fn timestamp(&mut self, name: &str) -> Option<DateTime<Utc>> {
        let value = self.present(name)?;
        self.parse_timestamp(name, value)
    }

    /// Optional ISO-8601 timestamp, normalized to UTC.
    ///
    /// The outer `Option` is `None` only when the field was malformed.
    pub fn optional_timestamp(&mut self, name: &str) -> Option<Option<DateTime<Utc>>> {
        match self.raw(name) {
            None => Some(None),
            Some(value) => self.parse_timestamp(name, value).map(Some),
        }
    }

    /// Required UUID in its canonical textual form
    pub fn uuid(&mut self, name: &str) -> Option<Uuid> {
        let value = self.present(name)?;
        let parsed = value.as_str().and_then(|s| Uuid::parse_str(s).ok());
        if parsed.is_none() {
            self.reject(name, ViolationKind::WrongType { expected: "uuid" });
        }
        parsed
    }

    /// Required member of a closed enumeration
    pub fn variant<T: ClosedSet>(&mut self, name: &str) -> Option<T> {
        let value = self.present(name)?;
        let text = self.as_text(name, value)?;
        match text.parse::<T>() {
            Ok(v) => Some(v),
            Err(_) => {
                self.reject(
                    name,
                    ViolationKind::UnknownVariant {
                        value: text,
                        allowed: T::VARIANTS,
                    },
                );
                None
            }
        }
    }

    /// Fold the violations of a nested reader into this one
    pub fn absorb(&mut self, nested: FieldReader<'_>) {
        self.violations.items.extend(nested.violations.items);
    }

    /// Whether no violation has been recorded so far
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Consume the reader, yielding whatever was recorded
    pub fn into_error(self) -> ValidationError {
        self.violations.into_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collects_every_violation() {
        let input = json!({ "name": "", "count": "three" });
        let mut reader = FieldReader::new(&input);

        assert!(reader.required_text("name").is_none());
        assert!(reader.integer_in("count", Some(1), 0, 10).is_none());
        assert!(reader.required_text("missing").is_none());

        let err = reader.into_error();
        assert_eq!(err.violations().len(), 3);
        assert_eq!(err.kind_of("name"), Some(&ViolationKind::EmptyText));
        assert_eq!(
            err.kind_of("count"),
            Some(&ViolationKind::WrongType { expected: "integer" })
        );
        assert_eq!(err.kind_of("missing"), Some(&ViolationKind::Missing));
    }

    #[test]
    fn test_null_is_treated_as_absent() {
        let input = json!({ "limit": null });
        let mut reader = FieldReader::new(&input);
        assert_eq!(reader.integer_in("limit", Some(10), 1, u64::MAX), Some(10));
        assert!(reader.is_clean());
    }

    #[test]
    fn test_integer_bounds_are_inclusive() {
        let input = json!({ "low": 0, "high": 10, "over": 11, "neg": -1 });
        let mut reader = FieldReader::new(&input);
        assert_eq!(reader.integer_in("low", None, 0, 10), Some(0));
        assert_eq!(reader.integer_in("high", None, 0, 10), Some(10));
        assert!(reader.integer_in("over", None, 0, 10).is_none());
        assert!(reader.integer_in("neg", None, 0, 10).is_none());

        let err = reader.into_error();
        assert!(err.mentions("over"));
        assert!(err.mentions("neg"));
        assert!(!err.mentions("low"));
    }

    #[test]
    fn test_nested_paths_are_qualified() {
        let input = json!({ "text": 5 });
        let mut reader = FieldReader::nested(&input, "content");
        assert!(reader.required_text("text").is_none());
        assert!(reader.into_error().mentions("content.text"));
    }

    #[test]
    fn test_list_reports_bad_elements_by_index() {
        let input = json!({ "sources": ["twitter", 3], "empty": [] });
        let mut reader = FieldReader::new(&input);
        assert!(reader.non_empty_list("sources").is_none());
        assert!(reader.non_empty_list("empty").is_none());

        let err = reader.into_error();
        assert!(err.mentions("sources[1]"));
        assert_eq!(err.kind_of("empty"), Some(&ViolationKind::EmptyList));
    }

    #[test]
    fn test_non_object_input() {
        let input = json!("nope");
        let mut reader = FieldReader::new(&input);
        assert!(reader.required_text("niche").is_none());
        let err = reader.into_error();
        assert_eq!(err.violations().len(), 1);
        assert!(err.mentions("$"));
    }

    #[test]
    fn test_timestamps_with_and_without_offset() {
        let input = json!({
            "zulu": "2026-03-01T09:00:00Z",
            "offset": "2026-03-01T11:00:00+02:00",
            "naive": "2026-03-01T09:00:00",
            "bad": "next tuesday"
        });
        let mut reader = FieldReader::new(&input);
        let zulu = reader.timestamp("zulu").unwrap();
        assert_eq!(reader.timestamp("offset"), Some(zulu));
        assert_eq!(reader.timestamp("naive"), Some(zulu));
        assert_eq!(reader.optional_timestamp("absent"), Some(None));
        assert!(reader.optional_timestamp("bad").is_none());

        let err = reader.into_error();
        assert_eq!(err.violations().len(), 1);
        assert!(err.mentions("bad"));
    }

    #[test]
    fn test_error_message_lists_fields() {
        let err = ValidationError::single("platform", ViolationKind::Missing);
        assert_eq!(err.to_string(), "1 validation error(s): platform: field required");
    }
}
