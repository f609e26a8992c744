//! # Requirement Worksheets
//!
//! Structured models of the two requirement worksheets. The first lists
//! the resolved requirements grouped under category header bands derived
//! from the control identifier's embedded code; the second carries the
//! reference-annotation columns. Binary spreadsheet rendering is an
//! external collaborator's job.

use serde::{Deserialize, Serialize};

use cca_catalog::Requirement;
use cca_core::ControlId;
use cca_engine::ReferenceAnnotations;

/// Column titles of the requirements worksheet, in sheet order. The
/// fourth column is an intentional spacer.
pub const WORKSHEET_COLUMNS: &[&str] = &[
    "Requirement #",
    "Requirement Statement",
    "Comments",
    "",
    "Common Solution",
    "Test Guidance",
];

/// One requirement row of the worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorksheetRow {
    pub control_id: ControlId,
    pub requirement_statement: String,
    pub common_solution: String,
    pub test_guidance: String,
}

/// A run of consecutive requirements sharing one category, rendered
/// under a category-colored header band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorksheetSection {
    /// Category name; empty when the control identifier carries an
    /// unknown code.
    pub category: String,
    pub rows: Vec<WorksheetRow>,
}

/// The requirements worksheet: sections in resolution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementsWorksheet {
    pub sections: Vec<WorksheetSection>,
}

impl RequirementsWorksheet {
    /// Total requirement rows across all sections.
    pub fn row_count(&self) -> usize {
        self.sections.iter().map(|s| s.rows.len()).sum()
    }
}

/// The category name embedded in a control identifier.
///
/// The code sits between the first `_` and the following `-`
/// (e.g. `CTRL_AM-001` → `AM` → "Access Management"). Unknown or
/// missing codes map to the empty category.
pub fn category_for_control_id(control_id: &str) -> &'static str {
    let Some(code) = control_id
        .split_once('_')
        .and_then(|(_, rest)| rest.split_once('-'))
        .map(|(code, _)| code)
    else {
        return "";
    };
    match code {
        "AM" => "Access Management",
        "CM" => "Capability Management",
        "DG" => "Data Governance",
        "DP" => "Data Protection",
        "DPri" => "Data Privacy",
        "ERES" => "Electronic Signatures, Digital Signatures and Electronic Records",
        "IM" => "Incident Management",
        "IP" => "Infrastructure Protection",
        "LM" => "Logging & Monitoring",
        "PS" => "Physical Security",
        "RM" => "Risk Management",
        "SD" => "Secure Development / SDLC",
        "SM" => "Supplier Management",
        "TA" => "Training & Awareness",
        _ => "",
    }
}

/// Build the requirements worksheet from a resolved set: a new section
/// starts whenever the derived category changes between consecutive
/// requirements.
pub fn build_requirements_worksheet(requirements: &[&Requirement]) -> RequirementsWorksheet {
    let mut sections: Vec<WorksheetSection> = Vec::new();
    for requirement in requirements {
        let category = category_for_control_id(requirement.control_id.as_str());
        let row = WorksheetRow {
            control_id: requirement.control_id.clone(),
            requirement_statement: requirement.requirement_statement.clone(),
            common_solution: requirement.common_solution.clone(),
            test_guidance: requirement.test_guidance.clone(),
        };
        match sections.last_mut() {
            Some(section) if section.category == category => section.rows.push(row),
            _ => sections.push(WorksheetSection {
                category: category.to_string(),
                rows: vec![row],
            }),
        }
    }
    RequirementsWorksheet { sections }
}

// ---------------------------------------------------------------------------
// Annotated worksheet
// ---------------------------------------------------------------------------

/// The annotated worksheet: requirement identifiers, the projected
/// reference-policy columns, then the trailing requirement fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedWorksheet {
    /// Column titles, in sheet order.
    pub columns: Vec<String>,
    /// One row per requirement, cells aligned with `columns`.
    pub rows: Vec<Vec<String>>,
}

/// Build the annotated worksheet from the annotation projection and the
/// resolved set it was computed from. The two inputs must be aligned;
/// both come from the same resolution pass.
pub fn build_annotated_worksheet(
    annotations: &ReferenceAnnotations,
    requirements: &[&Requirement],
) -> AnnotatedWorksheet {
    debug_assert_eq!(annotations.rows.len(), requirements.len());

    let mut columns = vec!["Requirement #".to_string()];
    columns.extend(annotations.columns.iter().map(|c| c.title.clone()));
    columns.push("Common Solution".to_string());
    columns.push("Test Guidance".to_string());

    let rows = annotations
        .rows
        .iter()
        .zip(requirements)
        .map(|(annotated, requirement)| {
            let mut row = vec![annotated.control_id.to_string()];
            row.extend(annotated.cells.iter().cloned());
            row.push(requirement.common_solution.clone());
            row.push(requirement.test_guidance.clone());
            row
        })
        .collect();

    AnnotatedWorksheet { columns, rows }
}
