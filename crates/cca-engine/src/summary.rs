//! # Summary Derivation
//!
//! Reduces the six topic answer sets into the flat 24-flag summary. The
//! per-topic rules are independent of each other; the audit-trail flags
//! are the one exception, reading the GxP summary flags, and must run
//! after GxP derivation in the same pass.
//!
//! Unanswered (tri-state `None`) questions never count as "yes": a
//! topic with nothing answered derives the same summary as a topic
//! answered all-"No".

use serde::{Deserialize, Serialize};

use cca_schema::{
    BusinessImpactAnswers, DataClassificationAnswers, GxpEresAnswers, GxpImpactAnswers,
    PrivacyImpactAnswers, SoxImpactAnswers, TopicAnswerSet,
};

/// The derived categorical summary: one flag set per topic plus the two
/// audit-trail flags. Computed, never hand-edited; always fully
/// populated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    // GxP impact
    pub gmp: bool,
    pub gcp: bool,
    pub glp: bool,
    pub gvp: bool,
    pub gxp_indirect: bool,
    pub non_gxp: bool,
    // SOX impact
    pub sox: bool,
    pub non_sox: bool,
    // GxP ERES
    pub er: bool,
    pub es: bool,
    pub non_eres: bool,
    // Privacy impact
    pub high_privacy: bool,
    pub medium_privacy: bool,
    /// Declared on the summary sheet but never set by the rule table;
    /// stays false. Kept as an open product question rather than
    /// inventing a trigger for it.
    pub low_privacy: bool,
    pub no_privacy: bool,
    // Audit trail (derived from the GxP flags above)
    pub administrative_audit_trail_review: bool,
    pub operational_audit_trail_review: bool,
    // Data classification passthrough
    pub data_classification_secret: bool,
    pub data_classification_restricted: bool,
    pub data_classification_internal: bool,
    pub data_classification_public: bool,
    // Business impact passthrough
    pub business_impact_high: bool,
    pub business_impact_medium: bool,
    pub business_impact_low: bool,
}

impl Summary {
    /// Serialize to the boundary map (all 24 keys, all boolean).
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).expect("summary serializes to a JSON object")
    }

    /// Whether no business-impact flag is set.
    pub fn no_business_impact(&self) -> bool {
        !(self.business_impact_high || self.business_impact_medium || self.business_impact_low)
    }

    /// Whether no data-classification flag is set.
    pub fn no_data_classification(&self) -> bool {
        !(self.data_classification_secret
            || self.data_classification_restricted
            || self.data_classification_internal
            || self.data_classification_public)
    }
}

fn answered_yes(question: Option<bool>) -> bool {
    question == Some(true)
}

fn any_yes(questions: &[Option<bool>]) -> bool {
    questions.iter().copied().any(answered_yes)
}

/// Derive the full summary from the six topic answer sets.
///
/// Pure and idempotent: recomputing from the same inputs always yields
/// the same summary.
pub fn derive_summary(answers: &TopicAnswerSet) -> Summary {
    let mut summary = Summary::default();
    derive_gxp_impact(&mut summary, &answers.gxp_impact);
    derive_sox_impact(&mut summary, &answers.sox_impact);
    derive_gxp_eres(&mut summary, &answers.gxp_eres);
    derive_privacy_impact(&mut summary, &answers.privacy_impact);
    derive_data_classification(&mut summary, &answers.data_classification);
    derive_business_impact(&mut summary, &answers.business_impact);

    // Audit trail reads the GxP summary flags, so it runs last.
    derive_audit_trail(&mut summary);
    summary
}

fn derive_gxp_impact(summary: &mut Summary, answers: &GxpImpactAnswers) {
    let is_non_gxp = !any_yes(&answers.all_questions());
    summary.non_gxp = is_non_gxp;

    if !is_non_gxp {
        // The solution is GxP; check the individual sections.
        summary.gmp = any_yes(&answers.gmp_group());
        summary.gcp = any_yes(&answers.gcp_group());
        summary.glp = any_yes(&answers.glp_group());
        summary.gvp = any_yes(&answers.gvp_group());
        summary.gxp_indirect = any_yes(&answers.indirect_group());
    }
}

fn derive_sox_impact(summary: &mut Summary, answers: &SoxImpactAnswers) {
    let is_sox = any_yes(&answers.all_questions());
    summary.sox = is_sox;
    summary.non_sox = !is_sox;
}

fn derive_gxp_eres(summary: &mut Summary, answers: &GxpEresAnswers) {
    let is_non_eres = !any_yes(&answers.all_questions());
    summary.non_eres = is_non_eres;

    if !is_non_eres {
        summary.er = answered_yes(answers.creates_electronic_gxp_records);
        summary.es = answered_yes(answers.employs_electronic_signatures);
    }
}

fn derive_privacy_impact(summary: &mut Summary, answers: &PrivacyImpactAnswers) {
    let q1 = answered_yes(answers.collects_personal_information);
    let q2 = answered_yes(answers.data_subject_outside_eu);

    summary.high_privacy = (q1 && q2) || (q1 && !q2);
    summary.medium_privacy = q2 && !q1;
    // No trigger exists for low_privacy in the rule table.
    summary.no_privacy = !q1 && !q2;
}

fn derive_data_classification(summary: &mut Summary, answers: &DataClassificationAnswers) {
    summary.data_classification_secret = answers.data_classification_secret;
    summary.data_classification_restricted = answers.data_classification_restricted;
    summary.data_classification_internal = answers.data_classification_internal;
    summary.data_classification_public = answers.data_classification_public;
}

fn derive_business_impact(summary: &mut Summary, answers: &BusinessImpactAnswers) {
    summary.business_impact_high = answers.business_impact_high;
    summary.business_impact_medium = answers.business_impact_medium;
    summary.business_impact_low = answers.business_impact_low;
}

fn derive_audit_trail(summary: &mut Summary) {
    let operational = summary.gmp || summary.gcp || summary.glp || summary.gvp;
    summary.operational_audit_trail_review = operational;
    summary.administrative_audit_trail_review = operational || summary.gxp_indirect;
}

#[cfg(test)]
mod tests {
    use super::*;
    use cca_schema::fields::SUMMARY_FIELDS;
    use proptest::prelude::*;

    #[test]
    fn summary_serde_keys_match_the_schema_table() {
        let value = Summary::default().to_value();
        let map = value.as_object().unwrap();
        let mut keys: Vec<&str> = map.keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        let mut declared: Vec<&str> = SUMMARY_FIELDS.iter().map(|f| f.key).collect();
        declared.sort_unstable();
        assert_eq!(keys, declared);
    }

    #[test]
    fn all_default_answers_derive_the_non_impact_summary() {
        let summary = derive_summary(&TopicAnswerSet::default());
        assert!(summary.non_gxp);
        assert!(summary.non_sox);
        assert!(summary.non_eres);
        assert!(summary.no_privacy);
        assert!(!summary.gmp && !summary.gcp && !summary.glp && !summary.gvp);
        assert!(!summary.gxp_indirect);
        assert!(!summary.er && !summary.es);
        assert!(!summary.high_privacy && !summary.medium_privacy && !summary.low_privacy);
        assert!(summary.no_data_classification());
        assert!(summary.no_business_impact());
        assert!(!summary.operational_audit_trail_review);
        assert!(!summary.administrative_audit_trail_review);
    }

    #[test]
    fn one_gmp_answer_sets_gmp_and_clears_non_gxp() {
        let mut answers = TopicAnswerSet::default();
        answers.gxp_impact.part_of_batch_record = Some(true);
        let summary = derive_summary(&answers);
        assert!(!summary.non_gxp);
        assert!(summary.gmp);
        assert!(!summary.gcp && !summary.glp && !summary.gvp && !summary.gxp_indirect);
    }

    #[test]
    fn section_flags_follow_their_field_groups() {
        let mut answers = TopicAnswerSet::default();
        answers.gxp_impact.used_to_design_discover_products = Some(true); // GCP group
        answers.gxp_impact.externally_facing_tool = Some(true); // GVP group
        answers.gxp_impact.supports_gxp_processes = Some(true); // indirect group
        let summary = derive_summary(&answers);
        assert!(summary.gcp);
        assert!(summary.gvp);
        assert!(summary.gxp_indirect);
        assert!(!summary.gmp);
        assert!(!summary.glp);
    }

    #[test]
    fn explicit_no_answers_still_count_toward_non_gxp() {
        let mut answers = TopicAnswerSet::default();
        for question in [
            &mut answers.gxp_impact.used_for_product_quality_control,
            &mut answers.gxp_impact.part_of_batch_record,
        ] {
            *question = Some(false);
        }
        let summary = derive_summary(&answers);
        assert!(summary.non_gxp);
    }

    #[test]
    fn sox_summary_is_a_negation_pair() {
        let mut answers = TopicAnswerSet::default();
        assert!(derive_summary(&answers).non_sox);

        answers.sox_impact.exchanges_data_with_sox_system = Some(true);
        let summary = derive_summary(&answers);
        assert!(summary.sox);
        assert!(!summary.non_sox);
    }

    #[test]
    fn eres_sections_only_set_when_not_non_eres() {
        let mut answers = TopicAnswerSet::default();
        answers.gxp_eres.creates_electronic_gxp_records = Some(true);
        let summary = derive_summary(&answers);
        assert!(!summary.non_eres);
        assert!(summary.er);
        assert!(!summary.es);
    }

    #[test]
    fn privacy_truth_table() {
        // (q1, q2) → (high, medium, no)
        let cases = [
            (None, None, (false, false, true)),
            (Some(false), Some(false), (false, false, true)),
            (Some(true), Some(false), (true, false, false)),
            (Some(true), None, (true, false, false)),
            (Some(true), Some(true), (true, false, false)),
            (Some(false), Some(true), (false, true, false)),
            (None, Some(true), (false, true, false)),
        ];
        for (q1, q2, (high, medium, no)) in cases {
            let mut answers = TopicAnswerSet::default();
            answers.privacy_impact.collects_personal_information = q1;
            answers.privacy_impact.data_subject_outside_eu = q2;
            let summary = derive_summary(&answers);
            assert_eq!(summary.high_privacy, high, "q1={q1:?} q2={q2:?}");
            assert_eq!(summary.medium_privacy, medium, "q1={q1:?} q2={q2:?}");
            assert_eq!(summary.no_privacy, no, "q1={q1:?} q2={q2:?}");
            assert!(!summary.low_privacy, "low_privacy has no trigger");
        }
    }

    #[test]
    fn classification_and_business_impact_pass_through() {
        let mut answers = TopicAnswerSet::default();
        answers.data_classification.data_classification_restricted = true;
        answers.business_impact.business_impact_medium = true;
        let summary = derive_summary(&answers);
        assert!(summary.data_classification_restricted);
        assert!(!summary.data_classification_secret);
        assert!(summary.business_impact_medium);
        assert!(!summary.business_impact_high);
    }

    #[test]
    fn audit_trail_operational_excludes_indirect() {
        let mut answers = TopicAnswerSet::default();
        answers.gxp_impact.supports_gxp_processes = Some(true); // indirect only
        let summary = derive_summary(&answers);
        assert!(summary.gxp_indirect);
        assert!(!summary.operational_audit_trail_review);
        assert!(summary.administrative_audit_trail_review);
    }

    #[test]
    fn audit_trail_operational_set_by_direct_sections() {
        let mut answers = TopicAnswerSet::default();
        answers.gxp_impact.impacted_by_glp_regulations = Some(true);
        let summary = derive_summary(&answers);
        assert!(summary.operational_audit_trail_review);
        assert!(summary.administrative_audit_trail_review);
    }

    fn arb_tri_state() -> impl Strategy<Value = Option<bool>> {
        prop_oneof![Just(None), Just(Some(false)), Just(Some(true))]
    }

    proptest! {
        /// Derivation is a pure function: the same answers always derive
        /// byte-identical summaries.
        #[test]
        fn derivation_is_idempotent(
            q1 in arb_tri_state(),
            q2 in arb_tri_state(),
            q3 in arb_tri_state(),
            sox in arb_tri_state(),
            er in arb_tri_state(),
            secret in any::<bool>(),
            high in any::<bool>(),
        ) {
            let mut answers = TopicAnswerSet::default();
            answers.gxp_impact.used_for_product_quality_control = q1;
            answers.gxp_impact.impacted_by_gcp_regulations = q2;
            answers.gxp_impact.supports_gxp_processes = q3;
            answers.sox_impact.handles_material_financial_data = sox;
            answers.gxp_eres.creates_electronic_gxp_records = er;
            answers.data_classification.data_classification_secret = secret;
            answers.business_impact.business_impact_high = high;

            let first = derive_summary(&answers);
            let second = derive_summary(&answers);
            prop_assert_eq!(first, second);
            prop_assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
        }

        /// Exactly one of the privacy outcome flags (high/medium/no) is
        /// set for every answer combination, and low_privacy never is.
        #[test]
        fn privacy_outcomes_partition(q1 in arb_tri_state(), q2 in arb_tri_state()) {
            let mut answers = TopicAnswerSet::default();
            answers.privacy_impact.collects_personal_information = q1;
            answers.privacy_impact.data_subject_outside_eu = q2;
            let summary = derive_summary(&answers);
            let set = [summary.high_privacy, summary.medium_privacy, summary.no_privacy]
                .iter()
                .filter(|&&flag| flag)
                .count();
            prop_assert_eq!(set, 1);
            prop_assert!(!summary.low_privacy);
        }
    }
}
