//! # Schema Validation Errors
//!
//! Batched validation findings. A validation pass inspects the whole
//! answer map and reports every problem at once so a caller can present
//! all of them to the submitter in a single round-trip.

use thiserror::Error;

/// A single validation finding against a schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    /// The submitted map is not a JSON object.
    #[error("invalid value: must be a JSON object")]
    NotAnObject,

    /// A declared field is absent from the submitted map.
    #[error("data is missing the following field: {key}")]
    MissingField {
        /// The declared key that was not present.
        key: String,
    },

    /// The submitted map contains a key the schema does not declare.
    #[error("invalid key: {key}")]
    UnknownField {
        /// The undeclared key.
        key: String,
    },

    /// A field value has the wrong JSON type for its kind.
    #[error("invalid value for key {key}: only {expected} values are allowed")]
    WrongType {
        /// The offending key.
        key: String,
        /// Human-readable description of the accepted type(s).
        expected: &'static str,
    },

    /// More than one boolean in a single-choice schema is true.
    #[error("Only 1 {selection} should be selected.")]
    ExclusivityViolation {
        /// The single-choice selection name (e.g. "Data Classification").
        selection: &'static str,
    },

    /// A validated map still failed typed conversion. Indicates a schema
    /// table and record definition drifting apart.
    #[error("malformed value: {detail}")]
    Malformed {
        /// The underlying conversion failure.
        detail: String,
    },
}

/// The batched result of validating one answer map against one schema.
///
/// Always carries *every* finding from the pass; validation is
/// exhaustive per call, never fail-fast.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{schema} failed validation: {}", format_findings(.findings))]
pub struct SchemaValidationError {
    /// The schema that was violated (a topic key, `"summary"`, or
    /// `"rating"`).
    pub schema: &'static str,
    /// Every finding from the validation pass, in discovery order.
    pub findings: Vec<SchemaViolation>,
}

impl SchemaValidationError {
    /// Whether any finding matches the given predicate.
    pub fn has_finding(&self, predicate: impl Fn(&SchemaViolation) -> bool) -> bool {
        self.findings.iter().any(predicate)
    }
}

fn format_findings(findings: &[SchemaViolation]) -> String {
    findings
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
