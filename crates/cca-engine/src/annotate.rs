//! # Reference Annotation
//!
//! Projects reference-policy columns onto a resolved requirement set.
//! Three fixed policy columns always lead; privacy policy columns are
//! added only for high-or-medium-privacy assessments; the ERES
//! applicability columns track whichever of the `impact` / `no_impact`
//! tags matches the summary. Cells hold the newline-joined,
//! deduplicated citation identifiers; an empty result renders as the
//! `"N/A"` sentinel, never the empty string, so "no citations" stays
//! distinguishable from a failed generation.

use serde::{Deserialize, Serialize};

use cca_catalog::{Catalog, Requirement};
use cca_core::ControlId;

use crate::summary::Summary;

/// Cell sentinel for a requirement with no citations under a policy.
pub const EMPTY_CELL: &str = "N/A";

/// Policy columns that lead every annotated worksheet regardless of
/// classification.
pub const FIXED_POLICY_COLUMNS: &[(&str, &str)] = &[
    ("cloud_controls_matrix_v_4.0", "CLOUD CONTROLS MATRIX v 4.0"),
    ("nist_sp800-53_r5", "NIST SP800-53 R5"),
    ("policy__procedure", "Policy / Procedure"),
];

/// One projected policy column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyColumn {
    /// Normalized policy header name (cell lookup key).
    pub policy_header: String,
    /// Worksheet column title.
    pub title: String,
}

/// One annotated requirement row: a cell per projected column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedRow {
    /// The requirement's control identifier.
    pub control_id: ControlId,
    /// Cells aligned with [`ReferenceAnnotations::columns`].
    pub cells: Vec<String>,
}

/// The variable-width annotation projection over a resolved set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceAnnotations {
    /// Projected policy columns, in worksheet order.
    pub columns: Vec<PolicyColumn>,
    /// One row per resolved requirement, in resolution order.
    pub rows: Vec<AnnotatedRow>,
}

/// The citation cell for one requirement under one policy.
pub fn reference_cell(requirement: &Requirement, policy_header: &str) -> String {
    let identifiers = requirement.references_under(policy_header);
    if identifiers.is_empty() {
        EMPTY_CELL.to_string()
    } else {
        identifiers.into_iter().collect::<Vec<_>>().join("\n")
    }
}

/// Build the annotation projection for a resolved requirement set.
///
/// Column selection depends only on the summary and the catalog's
/// compliance→policy links; cell contents depend only on the
/// requirements. Deterministic for a fixed catalog snapshot.
pub fn annotate_references(
    catalog: &Catalog,
    summary: &Summary,
    requirements: &[&Requirement],
) -> ReferenceAnnotations {
    let mut columns: Vec<PolicyColumn> = FIXED_POLICY_COLUMNS
        .iter()
        .map(|(header, title)| PolicyColumn {
            policy_header: header.to_string(),
            title: title.to_string(),
        })
        .collect();

    // Privacy policy columns: only for high-or-medium-privacy solutions.
    if summary.high_privacy || summary.medium_privacy {
        for policy in catalog.policies_linked_to(&["high_privacy", "medium_privacy"]) {
            columns.push(PolicyColumn {
                policy_header: policy.header_name.clone(),
                title: policy.name.clone(),
            });
        }
    }

    // ERES applicability columns: impact when ER or ES applies, else
    // the no-impact policies.
    let eres_tag = if summary.er || summary.es {
        "impact"
    } else {
        "no_impact"
    };
    for policy in catalog.policies_linked_to(&[eres_tag]) {
        columns.push(PolicyColumn {
            policy_header: policy.header_name.clone(),
            title: policy.name.clone(),
        });
    }

    // A policy linked through two routes appears once, first position wins.
    let mut seen = std::collections::BTreeSet::new();
    columns.retain(|column| seen.insert(column.policy_header.clone()));

    let rows = requirements
        .iter()
        .map(|requirement| AnnotatedRow {
            control_id: requirement.control_id.clone(),
            cells: columns
                .iter()
                .map(|column| reference_cell(requirement, &column.policy_header))
                .collect(),
        })
        .collect();

    ReferenceAnnotations { columns, rows }
}
