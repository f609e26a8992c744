//! # Summary + Rating Preview
//!
//! Derives summary and rating from a raw submission without persisting
//! anything. Backs the live client-side preview operation.

use serde_json::{Map, Value};

use cca_schema::{validate_submission, SubmissionError};

use crate::rating::{derive_rating, Rating};
use crate::summary::{derive_summary, Summary};

/// Validate a raw submission and derive its summary and rating.
///
/// Nothing is stored; calling this repeatedly with the same input
/// yields the same pair.
///
/// # Errors
///
/// Returns the batched [`SubmissionError`] when any topic map fails
/// validation.
pub fn preview(raw: &Map<String, Value>) -> Result<(Summary, Rating), SubmissionError> {
    let answers = validate_submission(raw)?;
    let summary = derive_summary(&answers);
    let rating = derive_rating(&summary);
    Ok((summary, rating))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cca_core::CriticalityRating;
    use cca_schema::{registry, Topic};
    use serde_json::json;

    fn default_submission() -> Map<String, Value> {
        Topic::all()
            .iter()
            .map(|t| (t.key().to_string(), Value::Object(registry::defaults(*t))))
            .collect()
    }

    #[test]
    fn default_submission_previews_no_compliance_risk() {
        let (summary, rating) = preview(&default_submission()).unwrap();
        assert!(summary.non_gxp && summary.non_sox && summary.non_eres && summary.no_privacy);
        assert_eq!(rating.rating, CriticalityRating::NoComplianceRisk);
    }

    #[test]
    fn preview_does_not_mutate_its_input() {
        let raw = default_submission();
        let before = raw.clone();
        let _ = preview(&raw).unwrap();
        assert_eq!(raw, before);
    }

    #[test]
    fn gmp_answer_previews_significant() {
        let mut raw = default_submission();
        raw["gxp_impact"]
            .as_object_mut()
            .unwrap()
            .insert("part_of_batch_record".into(), json!(true));
        let (summary, rating) = preview(&raw).unwrap();
        assert!(summary.gmp);
        assert_eq!(rating.rating, CriticalityRating::Significant);
    }

    #[test]
    fn invalid_submission_surfaces_all_findings() {
        let mut raw = default_submission();
        raw.insert("data_classification".into(), json!({}));
        raw.insert("business_impact".into(), json!({}));
        let err = preview(&raw).unwrap_err();
        assert_eq!(err.errors.len(), 2);
    }
}
