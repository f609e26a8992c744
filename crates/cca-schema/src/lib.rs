//! # cca-schema — Questionnaire Schema Registry
//!
//! Declarative schemas for the six CCA questionnaire topics (GxP impact,
//! GxP ERES, SOX impact, privacy impact, data classification, business
//! impact) plus the derived summary and rating field tables.
//!
//! ## Responsibilities
//!
//! - **Field tables:** each topic's canonical field set as data: key,
//!   label, kind (tri-state / binary / comment), in questionnaire order.
//!   Everything downstream (validation, defaults, form rendering, report
//!   generation) reads these tables instead of hard-coding field names.
//!
//! - **Exhaustive validation:** [`registry::validate`] checks a raw JSON
//!   map against a topic schema and reports *every* problem found
//!   (missing keys, unknown keys, wrong-typed values, mutual-exclusivity
//!   violations), batched into one [`SchemaValidationError`], never
//!   fail-fast on the first finding.
//!
//! - **Typed records:** topic answers cross the system boundary as JSON
//!   maps and are converted once, at the boundary, into typed records
//!   ([`answers`]) with compile-time-known fields. The derivation engine
//!   never touches raw maps.
//!
//! - **Aggregate submission validation:** [`submission`] runs all six
//!   topic validators, collects all findings, and applies the
//!   cross-topic rule that forces GxP-ERES all-false when GxP impact is
//!   explicitly all-false.

pub mod answers;
pub mod error;
pub mod fields;
pub mod registry;
pub mod submission;

// Re-export primary types.
pub use answers::{
    BusinessImpactAnswers, DataClassificationAnswers, GxpEresAnswers, GxpImpactAnswers,
    PrivacyImpactAnswers, SoxImpactAnswers, TopicAnswerSet,
};
pub use error::{SchemaValidationError, SchemaViolation};
pub use fields::{FieldKind, FieldSpec, Topic};
pub use submission::{apply_eres_suppression, validate_submission, SubmissionError};
