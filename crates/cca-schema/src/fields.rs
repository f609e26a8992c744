//! # Declarative Field Tables
//!
//! The canonical field set for every questionnaire topic, expressed as
//! data rather than code. Each table lists `(key, label, kind)` in
//! questionnaire order; the derivation field groups are separate fixed
//! key lists over the same tables.
//!
//! The summary and rating tables describe *derived* blobs: they are
//! used for labels and for validating stored values, but their contents
//! are computed by `cca-engine`, never hand-edited.

use serde::{Deserialize, Serialize};

/// The JSON shape a schema field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// `true` / `false` / `null` (unanswered). Impact questions default
    /// to unanswered.
    TriState,
    /// `true` / `false` only. Single-choice topics are binary at rest.
    Binary,
    /// Free text, defaulting to the empty string.
    Comment,
}

/// One declared field of a topic schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Canonical field key.
    pub key: &'static str,
    /// Questionnaire prompt or sheet label.
    pub label: &'static str,
    /// Accepted JSON shape.
    pub kind: FieldKind,
}

const fn tri(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        label,
        kind: FieldKind::TriState,
    }
}

const fn bin(key: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        label,
        kind: FieldKind::Binary,
    }
}

const fn comment(key: &'static str) -> FieldSpec {
    FieldSpec {
        key,
        label: "Comments (optional)",
        kind: FieldKind::Comment,
    }
}

// ---------------------------------------------------------------------------
// Topic
// ---------------------------------------------------------------------------

/// The six questionnaire topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    /// GxP regulatory impact (12 tri-state questions).
    GxpImpact,
    /// Electronic records / electronic signatures applicability.
    GxpEres,
    /// Sarbanes-Oxley impact.
    SoxImpact,
    /// Personal-information privacy impact.
    PrivacyImpact,
    /// Data classification (single choice).
    DataClassification,
    /// Business impact (single choice).
    BusinessImpact,
}

impl Topic {
    /// All topics, in questionnaire order.
    pub fn all() -> &'static [Topic] {
        &[
            Self::GxpImpact,
            Self::GxpEres,
            Self::SoxImpact,
            Self::PrivacyImpact,
            Self::DataClassification,
            Self::BusinessImpact,
        ]
    }

    /// The canonical key of this topic in a submission map.
    pub fn key(&self) -> &'static str {
        match self {
            Self::GxpImpact => "gxp_impact",
            Self::GxpEres => "gxp_eres",
            Self::SoxImpact => "sox_impact",
            Self::PrivacyImpact => "privacy_impact",
            Self::DataClassification => "data_classification",
            Self::BusinessImpact => "business_impact",
        }
    }

    /// Human-readable section title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::GxpImpact => "GxP Impact",
            Self::GxpEres => {
                "GxP Electronic Records (ER) and Electronic Signatures (ES) Applicability"
            }
            Self::SoxImpact => "SOX Impact",
            Self::PrivacyImpact => "Privacy Impact",
            Self::DataClassification => "Data Classification",
            Self::BusinessImpact => "Business Impact",
        }
    }

    /// The declared field table for this topic.
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Self::GxpImpact => GXP_IMPACT_FIELDS,
            Self::GxpEres => GXP_ERES_FIELDS,
            Self::SoxImpact => SOX_IMPACT_FIELDS,
            Self::PrivacyImpact => PRIVACY_IMPACT_FIELDS,
            Self::DataClassification => DATA_CLASSIFICATION_FIELDS,
            Self::BusinessImpact => BUSINESS_IMPACT_FIELDS,
        }
    }

    /// For single-choice topics, the selection name used in the
    /// "Only 1 … should be selected." finding. `None` for multi-select
    /// topics.
    pub fn exclusive_selection(&self) -> Option<&'static str> {
        match self {
            Self::DataClassification => Some("Data Classification"),
            Self::BusinessImpact => Some("Business Impact"),
            Self::GxpImpact | Self::GxpEres | Self::SoxImpact | Self::PrivacyImpact => None,
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

// ---------------------------------------------------------------------------
// GxP impact (12 tri-state questions, each with a comment)
// ---------------------------------------------------------------------------

pub const GXP_IMPACT_FIELDS: &[FieldSpec] = &[
    tri(
        "used_for_product_quality_control",
        "1. Is the solution used for product quality control, or to monitor, control, or \
         supervise packaging and labeling operations, production processes, GMP facilities or \
         services, or the commercial manufacturing supply chain, or as a process control \
         solution that may affect drug product quality without independent verification?",
    ),
    comment("used_for_product_quality_control_comment"),
    tri(
        "part_of_batch_record",
        "2. Is the data from the solution recorded as part of the batch record or lot \
         release, and/or does it directly impact the ability to recall drug product?",
    ),
    comment("part_of_batch_record_comment"),
    tri(
        "impacted_by_gmp_regulations",
        "3. Is this solution impacted by any GMP global regulations that require the company \
         to maintain certain records and submit specific information to the agency as part of \
         compliance (predicate rules)?",
    ),
    comment("impacted_by_gmp_regulations_comment"),
    tri(
        "impacted_by_gcp_regulations",
        "4. Is this solution impacted by any GCP global regulations that require the company \
         to maintain certain records and submit specific information to the agency as part of \
         compliance (predicate rules)? Record the regulation(s) in Comments.",
    ),
    comment("impacted_by_gcp_regulations_comment"),
    tri(
        "used_to_design_discover_products",
        "5. Is the solution used to design, conduct, perform, monitor, audit, record, \
         analyze, and report information from a clinical or animal study, or to discover or \
         verify the clinical, pharmacological and/or other pharmacodynamic effects of an \
         investigational product?",
    ),
    comment("used_to_design_discover_products_comment"),
    tri(
        "impacted_by_glp_regulations",
        "6. Is this solution impacted by any GLP global regulations that require the company \
         to maintain certain records and submit specific information to the agency as part of \
         compliance (predicate rules)? Record the regulation(s) in Comments.",
    ),
    comment("impacted_by_glp_regulations_comment"),
    tri(
        "used_to_collect_and_process_data",
        "7. Is the solution used to collect, store, process or transmit patient or data \
         subject original documents, data, and records, or to plan, perform, monitor, record, \
         archive and report non-clinical health and safety data within a laboratory \
         environment?",
    ),
    comment("used_to_collect_and_process_data_comment"),
    tri(
        "used_for_post_marketing_commitment",
        "8. Is the solution used to design, conduct, perform, monitor, audit, record, \
         analyze, and report information from a clinical or post-marketing commitment?",
    ),
    comment("used_for_post_marketing_commitment_comment"),
    tri(
        "used_to_monitor_and_report_source_data",
        "9. Is the solution used to monitor, audit, record, analyze, and report source data \
         (e.g., letters, emails, records of telephone calls, which include details of an \
         event)?",
    ),
    comment("used_to_monitor_and_report_source_data_comment"),
    tri(
        "externally_facing_tool",
        "10. Is the solution an externally facing tool (e.g., web sites or digital media \
         platforms) that could have the potential to generate adverse-event data?",
    ),
    comment("externally_facing_tool_comment"),
    tri(
        "used_for_quality_related_decisions",
        "11. Is the solution used to create, process, store, hold, manipulate, or report \
         data used to make quality related decisions (e.g., product reviews, training \
         records, complaints records)?",
    ),
    comment("used_for_quality_related_decisions_comment"),
    tri(
        "supports_gxp_processes",
        "12. Is the solution used to provide support to GxP processes and/or systems?",
    ),
    comment("supports_gxp_processes_comment"),
];

/// GMP-direct field group (summary `gmp`).
pub const GMP_RELATED_FIELDS: &[&str] = &[
    "used_for_product_quality_control",
    "part_of_batch_record",
    "impacted_by_gmp_regulations",
];

/// GCP field group (summary `gcp`).
pub const GCP_RELATED_FIELDS: &[&str] = &[
    "impacted_by_gcp_regulations",
    "used_to_design_discover_products",
];

/// GLP field group (summary `glp`).
pub const GLP_RELATED_FIELDS: &[&str] = &[
    "impacted_by_glp_regulations",
    "used_to_collect_and_process_data",
];

/// GVP field group (summary `gvp`).
pub const GVP_RELATED_FIELDS: &[&str] = &[
    "used_for_post_marketing_commitment",
    "used_to_monitor_and_report_source_data",
    "externally_facing_tool",
];

/// GxP-indirect field group (summary `gxp_indirect`).
pub const GXP_INDIRECT_RELATED_FIELDS: &[&str] = &[
    "used_for_quality_related_decisions",
    "supports_gxp_processes",
];

// ---------------------------------------------------------------------------
// GxP ERES (2 tri-state questions)
// ---------------------------------------------------------------------------

pub const GXP_ERES_FIELDS: &[FieldSpec] = &[
    tri(
        "creates_electronic_gxp_records",
        "1. Does the system create, modify, maintain, archive, retrieve, or transmit records \
         in electronic form that are required by any MD or GxP regulation or that are \
         otherwise submitted to external health authorities?",
    ),
    comment("creates_electronic_gxp_records_comment"),
    tri(
        "employs_electronic_signatures",
        "2. Does the system employ electronic signatures that are considered the equivalent \
         to handwritten signatures executed on paper?",
    ),
    comment("employs_electronic_signatures_comment"),
];

/// Electronic-records field group (summary `er`).
pub const ER_RELATED_FIELDS: &[&str] = &["creates_electronic_gxp_records"];

/// Electronic-signatures field group (summary `es`).
pub const ES_RELATED_FIELDS: &[&str] = &["employs_electronic_signatures"];

// ---------------------------------------------------------------------------
// SOX impact (3 tri-state questions)
// ---------------------------------------------------------------------------

pub const SOX_IMPACT_FIELDS: &[FieldSpec] = &[
    tri(
        "handles_material_financial_data",
        "1. Is this a solution used for the generation, maintenance, storage or importation \
         of material financial data or financial reports utilized in the financial reporting \
         process?",
    ),
    comment("handles_material_financial_data_comment"),
    tri(
        "controls_access_to_financial_systems",
        "2. Does the solution provide access control for financial systems and integration \
         with other systems?",
    ),
    comment("controls_access_to_financial_systems_comment"),
    tri(
        "exchanges_data_with_sox_system",
        "3. Does the system feed information, or is it fed information from another in-scope \
         SOX system?",
    ),
    comment("exchanges_data_with_sox_system_comment"),
];

// ---------------------------------------------------------------------------
// Privacy impact (2 tri-state questions)
// ---------------------------------------------------------------------------

pub const PRIVACY_IMPACT_FIELDS: &[FieldSpec] = &[
    tri(
        "collects_personal_information",
        "1. Does the solution collect, process, and/or disclose personal information (or not \
         prevent the ability to), directly or through a third party, as defined in the \
         company's EU personal data processing and privacy-by-design procedures?",
    ),
    comment("collects_personal_information_comment"),
    tri(
        "data_subject_outside_eu",
        "2. Will the personal information being collected, processed, or disclosed belong to \
         an individual not residing in an EU country?",
    ),
    comment("data_subject_outside_eu_comment"),
];

// ---------------------------------------------------------------------------
// Data classification (single choice, binary at rest)
// ---------------------------------------------------------------------------

pub const DATA_CLASSIFICATION_FIELDS: &[FieldSpec] = &[
    bin(
        "data_classification_secret",
        "Secret: highly sensitive data intended for limited, specific use by a workgroup \
         with a legitimate need-to-know; explicit Data Steward authorization required; \
         leakage can cause substantial damage to the company.",
    ),
    bin(
        "data_classification_restricted",
        "Restricted: data that must be protected to safeguard the privacy or security of an \
         individual or organization; disclosure limited to a need-to-know basis and may be \
         required confidential by law or regulation.",
    ),
    bin(
        "data_classification_internal",
        "Internal: information that must be guarded due to proprietary, ethical, or privacy \
         considerations, restricted to personnel with a legitimate reason to access it.",
    ),
    bin(
        "data_classification_public",
        "Public: information that may or must be open to the general public, with no \
         existing legal restrictions on access or usage.",
    ),
];

// ---------------------------------------------------------------------------
// Business impact (single choice plus a shared comment)
// ---------------------------------------------------------------------------

pub const BUSINESS_IMPACT_FIELDS: &[FieldSpec] = &[
    bin(
        "business_impact_high",
        "High (Patient Safety): risk to patient safety (GxP), or serious disruption of \
         business with no compensating manual processes available.",
    ),
    bin(
        "business_impact_medium",
        "Medium (Business Mission Critical): revenue impacted, negative customer \
         satisfaction, compliance violation (not patient safety), and/or damage to the \
         organization's reputation.",
    ),
    bin(
        "business_impact_low",
        "Low (Business Supporting): employee productivity degradation.",
    ),
    comment("business_impact_comment"),
];

// ---------------------------------------------------------------------------
// Derived tables: summary and rating
// ---------------------------------------------------------------------------

/// The 24 derived summary flags, in sheet order. All binary; computed by
/// `cca-engine`, never hand-edited.
pub const SUMMARY_FIELDS: &[FieldSpec] = &[
    bin("gmp", "GMP"),
    bin("gcp", "GCP"),
    bin("glp", "GLP"),
    bin("gvp", "GVP"),
    bin("gxp_indirect", "GxP Indirect"),
    bin("non_gxp", "Non-GxP"),
    bin("sox", "SOX"),
    bin("non_sox", "Non-SOX"),
    bin("er", "ER"),
    bin("es", "ES"),
    bin("non_eres", "Non-ERES"),
    bin("high_privacy", "High Privacy"),
    bin("medium_privacy", "Medium Privacy"),
    bin("low_privacy", "Low Privacy"),
    bin("no_privacy", "No Privacy"),
    bin(
        "administrative_audit_trail_review",
        "Administrative Audit Trail Review",
    ),
    bin(
        "operational_audit_trail_review",
        "Operational Audit Trail Review",
    ),
    bin("data_classification_secret", "Secret Data Classification"),
    bin(
        "data_classification_restricted",
        "Restricted Data Classification",
    ),
    bin(
        "data_classification_internal",
        "Internal Data Classification",
    ),
    bin("data_classification_public", "Public Data Classification"),
    bin("business_impact_high", "High Business Impact"),
    bin("business_impact_medium", "Medium Business Impact"),
    bin("business_impact_low", "Low Business Impact"),
];

/// The rating sheet fields: four mutually exclusive flags plus a
/// justification comment.
pub const RATING_FIELDS: &[FieldSpec] = &[
    bin(
        "rating_significant",
        "Significant: GxP-direct impact, or SECRET data classification.",
    ),
    bin(
        "rating_moderate",
        "Moderate: GxP-indirect impact, SOX, high or medium privacy impact, INTERNAL or \
         RESTRICTED data classification, or high business impact.",
    ),
    bin(
        "rating_minimal",
        "Minimal: non-GxP impact, low privacy impact, non-SOX, PUBLIC data classification, \
         or medium business impact.",
    ),
    bin(
        "rating_no_compliance_risk",
        "No Compliance Risk: non-GxP impact, no privacy impact, non-SOX, and low business \
         impact. Provide justification in the comment section when selected.",
    ),
    comment("rating_comment"),
];

/// Selection name for the rating sheet's exclusivity finding.
pub const RATING_SELECTION: &str = "Compliance Criticality Rating";
