//! # Schema Registry Operations
//!
//! Defaults, exhaustive validation, and projection over the declarative
//! field tables. Validation inspects the whole map and batches every
//! finding; projection silently drops undeclared keys (used to turn
//! free-form form input into a clean topic answer map).

use serde_json::{Map, Value};

use crate::error::{SchemaValidationError, SchemaViolation};
use crate::fields::{FieldKind, FieldSpec, Topic, RATING_FIELDS, RATING_SELECTION, SUMMARY_FIELDS};

/// The declared `(key, label)` pairs of a topic, optionally excluding
/// comment fields.
pub fn fields(topic: Topic, without_comments: bool) -> Vec<(&'static str, &'static str)> {
    topic
        .fields()
        .iter()
        .filter(|f| !(without_comments && f.kind == FieldKind::Comment))
        .map(|f| (f.key, f.label))
        .collect()
}

/// A fully-populated default answer map for a topic: tri-state questions
/// unanswered (`null`), binary choices `false`, comments empty.
pub fn defaults(topic: Topic) -> Map<String, Value> {
    defaults_for(topic.fields())
}

fn defaults_for(specs: &[FieldSpec]) -> Map<String, Value> {
    specs
        .iter()
        .map(|f| {
            let value = match f.kind {
                FieldKind::TriState => Value::Null,
                FieldKind::Binary => Value::Bool(false),
                FieldKind::Comment => Value::String(String::new()),
            };
            (f.key.to_string(), value)
        })
        .collect()
}

/// Validate a raw JSON value against a topic schema.
///
/// The pass is exhaustive: every missing key, unknown key, wrong-typed
/// value, and (for single-choice topics) mutual-exclusivity violation is
/// collected before the result is returned, so a caller can present all
/// problems at once.
///
/// # Errors
///
/// Returns a [`SchemaValidationError`] carrying every finding.
pub fn validate(topic: Topic, value: &Value) -> Result<(), SchemaValidationError> {
    validate_against(topic.key(), topic.fields(), topic.exclusive_selection(), value)
}

/// Validate a stored summary blob: all 24 flags present, all boolean.
/// Several flags co-exist, so there is no single-choice constraint.
pub fn validate_summary_value(value: &Value) -> Result<(), SchemaValidationError> {
    validate_against("summary", SUMMARY_FIELDS, None, value)
}

/// Validate a stored rating blob: the four flags plus comment, with at
/// most one flag selected.
pub fn validate_rating_value(value: &Value) -> Result<(), SchemaValidationError> {
    validate_against("rating", RATING_FIELDS, Some(RATING_SELECTION), value)
}

fn validate_against(
    schema: &'static str,
    specs: &[FieldSpec],
    exclusive_selection: Option<&'static str>,
    value: &Value,
) -> Result<(), SchemaValidationError> {
    let mut findings = Vec::new();

    let Some(map) = value.as_object() else {
        return Err(SchemaValidationError {
            schema,
            findings: vec![SchemaViolation::NotAnObject],
        });
    };

    for spec in specs {
        if !map.contains_key(spec.key) {
            findings.push(SchemaViolation::MissingField {
                key: spec.key.to_string(),
            });
        }
    }

    let mut true_count = 0usize;
    for (key, val) in map {
        let Some(spec) = specs.iter().find(|f| f.key == key) else {
            findings.push(SchemaViolation::UnknownField { key: key.clone() });
            continue;
        };
        match spec.kind {
            FieldKind::TriState => {
                if !(val.is_null() || val.is_boolean()) {
                    findings.push(SchemaViolation::WrongType {
                        key: key.clone(),
                        expected: "boolean or null",
                    });
                }
            }
            FieldKind::Binary => {
                if !val.is_boolean() {
                    findings.push(SchemaViolation::WrongType {
                        key: key.clone(),
                        expected: "boolean",
                    });
                }
                if val == &Value::Bool(true) {
                    true_count += 1;
                }
            }
            FieldKind::Comment => {
                if !val.is_string() {
                    findings.push(SchemaViolation::WrongType {
                        key: key.clone(),
                        expected: "string",
                    });
                }
            }
        }
    }

    if let Some(selection) = exclusive_selection {
        if true_count > 1 {
            findings.push(SchemaViolation::ExclusivityViolation { selection });
        }
    }

    if findings.is_empty() {
        Ok(())
    } else {
        Err(SchemaValidationError { schema, findings })
    }
}

/// Extract only this topic's declared keys from a larger map, silently
/// dropping extras. Missing declared keys stay missing; validation
/// reports them.
pub fn project(topic: Topic, raw: &Map<String, Value>) -> Map<String, Value> {
    topic
        .fields()
        .iter()
        .filter_map(|f| raw.get(f.key).map(|v| (f.key.to_string(), v.clone())))
        .collect()
}
