//! # Aggregate Submission Validation
//!
//! Validates a full submission (all six topic maps) in one pass,
//! collecting every topic's findings, then converts to typed records
//! and applies the cross-topic rule:
//!
//! > If every GxP-impact question is answered with an explicit "No",
//! > the GxP-ERES answers are forced to "No" regardless of what was
//! > submitted. ERES is only meaningful for GxP solutions.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::answers::{
    BusinessImpactAnswers, DataClassificationAnswers, GxpEresAnswers, GxpImpactAnswers,
    PrivacyImpactAnswers, SoxImpactAnswers, TopicAnswerSet,
};
use crate::error::{SchemaValidationError, SchemaViolation};
use crate::fields::Topic;

/// A submission failed validation in one or more topics.
///
/// Carries every per-topic [`SchemaValidationError`] so the caller can
/// surface all problems in a single response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("submission failed validation in {}: {}", topics(.errors), messages(.errors))]
pub struct SubmissionError {
    /// One entry per topic that failed, in questionnaire order.
    pub errors: Vec<SchemaValidationError>,
}

fn topics(errors: &[SchemaValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.schema)
        .collect::<Vec<_>>()
        .join(", ")
}

fn messages(errors: &[SchemaValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Validate all six topic maps of a submission and produce the typed
/// answer set, with the ERES suppression rule applied.
///
/// Validation is exhaustive across topics: every topic is checked even
/// after the first failure, and the error carries all findings.
///
/// # Errors
///
/// Returns [`SubmissionError`] if any topic map is missing or fails its
/// schema.
pub fn validate_submission(raw: &Map<String, Value>) -> Result<TopicAnswerSet, SubmissionError> {
    let mut errors = Vec::new();

    let gxp_impact = convert_topic(raw, Topic::GxpImpact, GxpImpactAnswers::from_value, &mut errors);
    let gxp_eres = convert_topic(raw, Topic::GxpEres, GxpEresAnswers::from_value, &mut errors);
    let sox_impact = convert_topic(raw, Topic::SoxImpact, SoxImpactAnswers::from_value, &mut errors);
    let privacy_impact = convert_topic(
        raw,
        Topic::PrivacyImpact,
        PrivacyImpactAnswers::from_value,
        &mut errors,
    );
    let data_classification = convert_topic(
        raw,
        Topic::DataClassification,
        DataClassificationAnswers::from_value,
        &mut errors,
    );
    let business_impact = convert_topic(
        raw,
        Topic::BusinessImpact,
        BusinessImpactAnswers::from_value,
        &mut errors,
    );

    if !errors.is_empty() {
        return Err(SubmissionError { errors });
    }

    // All six are present and valid past this point.
    let mut set = TopicAnswerSet {
        gxp_impact: gxp_impact.expect("validated above"),
        gxp_eres: gxp_eres.expect("validated above"),
        sox_impact: sox_impact.expect("validated above"),
        privacy_impact: privacy_impact.expect("validated above"),
        data_classification: data_classification.expect("validated above"),
        business_impact: business_impact.expect("validated above"),
    };

    apply_eres_suppression(&mut set);
    Ok(set)
}

fn convert_topic<T>(
    raw: &Map<String, Value>,
    topic: Topic,
    convert: impl Fn(&Value) -> Result<T, SchemaValidationError>,
    errors: &mut Vec<SchemaValidationError>,
) -> Option<T> {
    let Some(value) = raw.get(topic.key()) else {
        errors.push(SchemaValidationError {
            schema: topic.key(),
            findings: vec![SchemaViolation::MissingField {
                key: topic.key().to_string(),
            }],
        });
        return None;
    };
    match convert(value) {
        Ok(answers) => Some(answers),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

/// Apply the cross-topic rule in place: explicit all-false GxP impact
/// forces all ERES answers to explicit false.
pub fn apply_eres_suppression(set: &mut TopicAnswerSet) {
    if set.gxp_impact.all_explicitly_false() {
        set.gxp_eres.clear_answers();
    }
}
