//! # Narrative Assessment Document
//!
//! A structured model of the questionnaire document: the full set of
//! questions with checkbox renderings, the single-choice selections,
//! and the derived summary/rating sheets. Word rendering is an external
//! collaborator; this model carries everything it needs.

use serde::{Deserialize, Serialize};

use cca_schema::{FieldKind, Topic};
use cca_state::AssessmentRecord;

/// Checked checkbox glyph.
pub const CHECKED: char = '☑';
/// Unchecked checkbox glyph.
pub const UNCHECKED: char = '☐';

/// The checkbox glyph for a value.
pub fn checkbox(checked: bool) -> char {
    if checked {
        CHECKED
    } else {
        UNCHECKED
    }
}

/// One tri-state question row: prompt, yes/no checkboxes, comment.
///
/// An unanswered question renders as "No"; only an explicit "Yes"
/// checks the yes box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRow {
    /// 1-based question number within the section.
    pub index: usize,
    pub prompt: String,
    pub yes_checked: bool,
    pub no_checked: bool,
    pub comment: String,
}

/// One single-choice or summary row: label plus one checkbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRow {
    pub label: String,
    pub checked: bool,
}

/// One document section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSection {
    pub title: String,
    /// Tri-state question rows (empty for selection sections).
    pub questions: Vec<QuestionRow>,
    /// Selection rows (empty for question sections).
    pub selections: Vec<SelectionRow>,
    /// Trailing section comment, where the sheet has one.
    pub comment: String,
}

/// The narrative document model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentDocument {
    /// The record's form name.
    pub form_name: String,
    /// Fixed document title.
    pub title: String,
    /// Solution identification rows: `(label, value)`.
    pub solution: Vec<(String, String)>,
    /// Questionnaire, summary, and rating sections in sheet order.
    pub sections: Vec<DocumentSection>,
}

fn question_section(record: &AssessmentRecord, topic: Topic) -> DocumentSection {
    let values = record.answers.topic_value(topic);
    let mut questions = Vec::new();
    let mut index = 0;
    for field in topic.fields() {
        if field.kind != FieldKind::TriState {
            continue;
        }
        index += 1;
        let answered_yes = values.get(field.key).and_then(|v| v.as_bool()) == Some(true);
        let comment = values
            .get(&format!("{}_comment", field.key))
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        questions.push(QuestionRow {
            index,
            prompt: field.label.to_string(),
            yes_checked: answered_yes,
            no_checked: !answered_yes,
            comment,
        });
    }
    DocumentSection {
        title: topic.title().to_string(),
        questions,
        selections: Vec::new(),
        comment: String::new(),
    }
}

fn selection_section(record: &AssessmentRecord, topic: Topic) -> DocumentSection {
    let values = record.answers.topic_value(topic);
    let mut selections = Vec::new();
    let mut comment = String::new();
    for field in topic.fields() {
        match field.kind {
            FieldKind::Binary => selections.push(SelectionRow {
                label: field.label.to_string(),
                checked: values.get(field.key).and_then(|v| v.as_bool()) == Some(true),
            }),
            FieldKind::Comment => {
                comment = values
                    .get(field.key)
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string();
            }
            FieldKind::TriState => {}
        }
    }
    DocumentSection {
        title: topic.title().to_string(),
        questions: Vec::new(),
        selections,
        comment,
    }
}

fn summary_section(record: &AssessmentRecord) -> DocumentSection {
    let values = record.summary.to_value();
    DocumentSection {
        title: "Solution Criticality Summary".to_string(),
        questions: Vec::new(),
        selections: cca_schema::fields::SUMMARY_FIELDS
            .iter()
            .map(|field| SelectionRow {
                label: field.label.to_string(),
                checked: values.get(field.key).and_then(|v| v.as_bool()) == Some(true),
            })
            .collect(),
        comment: String::new(),
    }
}

fn rating_section(record: &AssessmentRecord) -> DocumentSection {
    DocumentSection {
        title: "Compliance Criticality Rating".to_string(),
        questions: Vec::new(),
        selections: record
            .rating
            .flags()
            .iter()
            .map(|(key, checked)| SelectionRow {
                label: rating_label(key).to_string(),
                checked: *checked,
            })
            .collect(),
        comment: record.rating.comment.clone(),
    }
}

fn rating_label(key: &str) -> &'static str {
    match key {
        "rating_significant" => "Significant",
        "rating_moderate" => "Moderate",
        "rating_minimal" => "Minimal",
        _ => "No Compliance Risk",
    }
}

/// Build the narrative document model for a record.
pub fn build_document(record: &AssessmentRecord) -> AssessmentDocument {
    let profile = &record.profile;
    let solution = vec![
        ("Solution Name".to_string(), profile.solution_name.clone()),
        (
            "Software Release / Version".to_string(),
            profile.solution_version.clone(),
        ),
        ("Vendor Name".to_string(), profile.vendor_name.clone()),
        (
            "Solution Type".to_string(),
            profile.solution_type_display().to_string(),
        ),
        (
            "Hosting and Type".to_string(),
            profile.hosting.map(|h| h.label().to_string()).unwrap_or_default(),
        ),
        ("Server Host / Location".to_string(), profile.server_host.clone()),
        (
            "Solution Classification".to_string(),
            profile
                .solution_classification
                .map(|c| c.label().to_string())
                .unwrap_or_default(),
        ),
        (
            "Solution Description and Intended Use".to_string(),
            profile.solution_description.clone(),
        ),
    ];

    let sections = vec![
        question_section(record, Topic::GxpImpact),
        question_section(record, Topic::GxpEres),
        question_section(record, Topic::SoxImpact),
        question_section(record, Topic::PrivacyImpact),
        selection_section(record, Topic::DataClassification),
        selection_section(record, Topic::BusinessImpact),
        summary_section(record),
        rating_section(record),
    ];

    AssessmentDocument {
        form_name: record.name.clone(),
        title: "Title: Compliance Criticality Assessment".to_string(),
        solution,
        sections,
    }
}
