//! # Typed Topic Answer Records
//!
//! One record per questionnaire topic, with compile-time-known fields.
//! Raw JSON maps are converted here, at the system boundary, after
//! schema validation; the derivation engine only ever sees these types.
//!
//! Field names match the schema table keys one-for-one (the tests in
//! this module pin that correspondence), so `serde_json::from_value` on
//! a validated map cannot drift from the declared schema.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{SchemaValidationError, SchemaViolation};
use crate::fields::Topic;
use crate::registry;

fn convert<T: serde::de::DeserializeOwned>(
    topic: Topic,
    value: &Value,
) -> Result<T, SchemaValidationError> {
    registry::validate(topic, value)?;
    serde_json::from_value(value.clone()).map_err(|e| SchemaValidationError {
        schema: topic.key(),
        findings: vec![SchemaViolation::Malformed {
            detail: e.to_string(),
        }],
    })
}

// ---------------------------------------------------------------------------
// GxP impact
// ---------------------------------------------------------------------------

/// Answers to the 12 GxP-impact questions. Tri-state: `None` means
/// unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GxpImpactAnswers {
    pub used_for_product_quality_control: Option<bool>,
    #[serde(default)]
    pub used_for_product_quality_control_comment: String,
    pub part_of_batch_record: Option<bool>,
    #[serde(default)]
    pub part_of_batch_record_comment: String,
    pub impacted_by_gmp_regulations: Option<bool>,
    #[serde(default)]
    pub impacted_by_gmp_regulations_comment: String,
    pub impacted_by_gcp_regulations: Option<bool>,
    #[serde(default)]
    pub impacted_by_gcp_regulations_comment: String,
    pub used_to_design_discover_products: Option<bool>,
    #[serde(default)]
    pub used_to_design_discover_products_comment: String,
    pub impacted_by_glp_regulations: Option<bool>,
    #[serde(default)]
    pub impacted_by_glp_regulations_comment: String,
    pub used_to_collect_and_process_data: Option<bool>,
    #[serde(default)]
    pub used_to_collect_and_process_data_comment: String,
    pub used_for_post_marketing_commitment: Option<bool>,
    #[serde(default)]
    pub used_for_post_marketing_commitment_comment: String,
    pub used_to_monitor_and_report_source_data: Option<bool>,
    #[serde(default)]
    pub used_to_monitor_and_report_source_data_comment: String,
    pub externally_facing_tool: Option<bool>,
    #[serde(default)]
    pub externally_facing_tool_comment: String,
    pub used_for_quality_related_decisions: Option<bool>,
    #[serde(default)]
    pub used_for_quality_related_decisions_comment: String,
    pub supports_gxp_processes: Option<bool>,
    #[serde(default)]
    pub supports_gxp_processes_comment: String,
}

impl GxpImpactAnswers {
    /// Convert a validated boundary map into a typed record.
    pub fn from_value(value: &Value) -> Result<Self, SchemaValidationError> {
        convert(Topic::GxpImpact, value)
    }

    /// All 12 question values, in questionnaire order.
    pub fn all_questions(&self) -> [Option<bool>; 12] {
        [
            self.used_for_product_quality_control,
            self.part_of_batch_record,
            self.impacted_by_gmp_regulations,
            self.impacted_by_gcp_regulations,
            self.used_to_design_discover_products,
            self.impacted_by_glp_regulations,
            self.used_to_collect_and_process_data,
            self.used_for_post_marketing_commitment,
            self.used_to_monitor_and_report_source_data,
            self.externally_facing_tool,
            self.used_for_quality_related_decisions,
            self.supports_gxp_processes,
        ]
    }

    /// The GMP-direct field group.
    pub fn gmp_group(&self) -> [Option<bool>; 3] {
        [
            self.used_for_product_quality_control,
            self.part_of_batch_record,
            self.impacted_by_gmp_regulations,
        ]
    }

    /// The GCP field group.
    pub fn gcp_group(&self) -> [Option<bool>; 2] {
        [
            self.impacted_by_gcp_regulations,
            self.used_to_design_discover_products,
        ]
    }

    /// The GLP field group.
    pub fn glp_group(&self) -> [Option<bool>; 2] {
        [
            self.impacted_by_glp_regulations,
            self.used_to_collect_and_process_data,
        ]
    }

    /// The GVP field group.
    pub fn gvp_group(&self) -> [Option<bool>; 3] {
        [
            self.used_for_post_marketing_commitment,
            self.used_to_monitor_and_report_source_data,
            self.externally_facing_tool,
        ]
    }

    /// The GxP-indirect field group.
    pub fn indirect_group(&self) -> [Option<bool>; 2] {
        [
            self.used_for_quality_related_decisions,
            self.supports_gxp_processes,
        ]
    }

    /// Whether every question is answered with an explicit "No".
    ///
    /// Unanswered questions do not count; the cross-topic ERES
    /// suppression only fires on an explicit all-false GxP section.
    pub fn all_explicitly_false(&self) -> bool {
        self.all_questions().iter().all(|q| *q == Some(false))
    }
}

// ---------------------------------------------------------------------------
// GxP ERES
// ---------------------------------------------------------------------------

/// Answers to the electronic-records / electronic-signatures questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GxpEresAnswers {
    pub creates_electronic_gxp_records: Option<bool>,
    #[serde(default)]
    pub creates_electronic_gxp_records_comment: String,
    pub employs_electronic_signatures: Option<bool>,
    #[serde(default)]
    pub employs_electronic_signatures_comment: String,
}

impl GxpEresAnswers {
    /// Convert a validated boundary map into a typed record.
    pub fn from_value(value: &Value) -> Result<Self, SchemaValidationError> {
        convert(Topic::GxpEres, value)
    }

    /// Both question values, in questionnaire order.
    pub fn all_questions(&self) -> [Option<bool>; 2] {
        [
            self.creates_electronic_gxp_records,
            self.employs_electronic_signatures,
        ]
    }

    /// Force both answers to an explicit "No". Used by the cross-topic
    /// rule when the GxP-impact section is explicitly all-false.
    pub fn clear_answers(&mut self) {
        self.creates_electronic_gxp_records = Some(false);
        self.employs_electronic_signatures = Some(false);
    }
}

// ---------------------------------------------------------------------------
// SOX impact
// ---------------------------------------------------------------------------

/// Answers to the three SOX-impact questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoxImpactAnswers {
    pub handles_material_financial_data: Option<bool>,
    #[serde(default)]
    pub handles_material_financial_data_comment: String,
    pub controls_access_to_financial_systems: Option<bool>,
    #[serde(default)]
    pub controls_access_to_financial_systems_comment: String,
    pub exchanges_data_with_sox_system: Option<bool>,
    #[serde(default)]
    pub exchanges_data_with_sox_system_comment: String,
}

impl SoxImpactAnswers {
    /// Convert a validated boundary map into a typed record.
    pub fn from_value(value: &Value) -> Result<Self, SchemaValidationError> {
        convert(Topic::SoxImpact, value)
    }

    /// All three question values, in questionnaire order.
    pub fn all_questions(&self) -> [Option<bool>; 3] {
        [
            self.handles_material_financial_data,
            self.controls_access_to_financial_systems,
            self.exchanges_data_with_sox_system,
        ]
    }
}

// ---------------------------------------------------------------------------
// Privacy impact
// ---------------------------------------------------------------------------

/// Answers to the two privacy-impact questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyImpactAnswers {
    pub collects_personal_information: Option<bool>,
    #[serde(default)]
    pub collects_personal_information_comment: String,
    pub data_subject_outside_eu: Option<bool>,
    #[serde(default)]
    pub data_subject_outside_eu_comment: String,
}

impl PrivacyImpactAnswers {
    /// Convert a validated boundary map into a typed record.
    pub fn from_value(value: &Value) -> Result<Self, SchemaValidationError> {
        convert(Topic::PrivacyImpact, value)
    }
}

// ---------------------------------------------------------------------------
// Data classification
// ---------------------------------------------------------------------------

/// The single-choice data classification. Binary at rest; at most one
/// flag true (enforced by validation).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataClassificationAnswers {
    pub data_classification_secret: bool,
    pub data_classification_restricted: bool,
    pub data_classification_internal: bool,
    pub data_classification_public: bool,
}

impl DataClassificationAnswers {
    /// Convert a validated boundary map into a typed record.
    pub fn from_value(value: &Value) -> Result<Self, SchemaValidationError> {
        convert(Topic::DataClassification, value)
    }

    /// Whether no classification is selected at all.
    pub fn none_selected(&self) -> bool {
        !(self.data_classification_secret
            || self.data_classification_restricted
            || self.data_classification_internal
            || self.data_classification_public)
    }
}

// ---------------------------------------------------------------------------
// Business impact
// ---------------------------------------------------------------------------

/// The single-choice business impact plus its shared comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessImpactAnswers {
    pub business_impact_high: bool,
    pub business_impact_medium: bool,
    pub business_impact_low: bool,
    #[serde(default)]
    pub business_impact_comment: String,
}

impl BusinessImpactAnswers {
    /// Convert a validated boundary map into a typed record.
    pub fn from_value(value: &Value) -> Result<Self, SchemaValidationError> {
        convert(Topic::BusinessImpact, value)
    }

    /// Whether no impact level is selected at all.
    pub fn none_selected(&self) -> bool {
        !(self.business_impact_high || self.business_impact_medium || self.business_impact_low)
    }
}

// ---------------------------------------------------------------------------
// TopicAnswerSet
// ---------------------------------------------------------------------------

/// All six topic answer records of one assessment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicAnswerSet {
    pub gxp_impact: GxpImpactAnswers,
    pub gxp_eres: GxpEresAnswers,
    pub sox_impact: SoxImpactAnswers,
    pub privacy_impact: PrivacyImpactAnswers,
    pub data_classification: DataClassificationAnswers,
    pub business_impact: BusinessImpactAnswers,
}

impl TopicAnswerSet {
    /// Serialize one topic back to its boundary map. Used by report
    /// generation and the flat export.
    pub fn topic_value(&self, topic: Topic) -> Value {
        let value = match topic {
            Topic::GxpImpact => serde_json::to_value(&self.gxp_impact),
            Topic::GxpEres => serde_json::to_value(&self.gxp_eres),
            Topic::SoxImpact => serde_json::to_value(&self.sox_impact),
            Topic::PrivacyImpact => serde_json::to_value(&self.privacy_impact),
            Topic::DataClassification => serde_json::to_value(&self.data_classification),
            Topic::BusinessImpact => serde_json::to_value(&self.business_impact),
        };
        value.expect("topic answer records serialize to JSON objects")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldKind;
    use serde_json::json;

    /// Every record's serde field set must equal its schema table. This
    /// is the pin that keeps the declarative tables and the typed
    /// records from drifting apart.
    #[test]
    fn record_fields_match_schema_tables() {
        for topic in Topic::all() {
            let value = TopicAnswerSet::default().topic_value(*topic);
            let map = value.as_object().unwrap();
            let declared: Vec<&str> = topic.fields().iter().map(|f| f.key).collect();
            let mut serialized: Vec<&str> = map.keys().map(|k| k.as_str()).collect();
            serialized.sort_unstable();
            let mut expected = declared.clone();
            expected.sort_unstable();
            assert_eq!(serialized, expected, "field drift in {topic}");
        }
    }

    #[test]
    fn default_records_validate_against_their_schemas() {
        let set = TopicAnswerSet::default();
        for topic in Topic::all() {
            crate::registry::validate(*topic, &set.topic_value(*topic)).unwrap();
        }
    }

    #[test]
    fn defaults_are_unanswered_for_tri_state_topics() {
        let gxp = GxpImpactAnswers::default();
        assert!(gxp.all_questions().iter().all(|q| q.is_none()));
        assert!(!gxp.all_explicitly_false());
    }

    #[test]
    fn from_value_roundtrip() {
        let mut map = crate::registry::defaults(Topic::SoxImpact);
        map.insert("handles_material_financial_data".into(), json!(true));
        map.insert(
            "handles_material_financial_data_comment".into(),
            json!("general ledger feed"),
        );
        let answers = SoxImpactAnswers::from_value(&Value::Object(map)).unwrap();
        assert_eq!(answers.handles_material_financial_data, Some(true));
        assert_eq!(
            answers.handles_material_financial_data_comment,
            "general ledger feed"
        );
        assert_eq!(answers.controls_access_to_financial_systems, None);
    }

    #[test]
    fn from_value_rejects_invalid_map() {
        let err = GxpEresAnswers::from_value(&json!({"bogus": true})).unwrap_err();
        assert!(!err.findings.is_empty());
    }

    #[test]
    fn all_explicitly_false_requires_every_answer() {
        let mut gxp = GxpImpactAnswers::default();
        for question in [
            "used_for_product_quality_control",
            "part_of_batch_record",
            "impacted_by_gmp_regulations",
        ] {
            // Only a few answered: not explicitly all-false.
            let mut value = serde_json::to_value(&gxp).unwrap();
            value[question] = json!(false);
            gxp = GxpImpactAnswers::from_value(&value).unwrap();
        }
        assert!(!gxp.all_explicitly_false());

        let mut value = serde_json::to_value(&gxp).unwrap();
        for field in Topic::GxpImpact.fields() {
            if field.kind == FieldKind::TriState {
                value[field.key] = json!(false);
            }
        }
        let gxp = GxpImpactAnswers::from_value(&value).unwrap();
        assert!(gxp.all_explicitly_false());
    }

    #[test]
    fn clear_answers_sets_explicit_false() {
        let mut eres = GxpEresAnswers {
            creates_electronic_gxp_records: Some(true),
            employs_electronic_signatures: None,
            ..Default::default()
        };
        eres.clear_answers();
        assert_eq!(eres.creates_electronic_gxp_records, Some(false));
        assert_eq!(eres.employs_electronic_signatures, Some(false));
    }

    #[test]
    fn none_selected_helpers() {
        assert!(DataClassificationAnswers::default().none_selected());
        assert!(BusinessImpactAnswers::default().none_selected());
        let classified = DataClassificationAnswers {
            data_classification_internal: true,
            ..Default::default()
        };
        assert!(!classified.none_selected());
    }
}
