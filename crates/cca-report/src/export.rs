//! # Flat Assessment Export
//!
//! Flattens assessment records into one flat column map per record for
//! spreadsheet/CSV export: metadata first, then every topic field in
//! schema order, then the summary flags (prefixed `summary_` to keep
//! the passthrough keys distinct from their topic columns), then the
//! rating flags and comment. Column order is fixed and identical for
//! every record.

use chrono::{DateTime, Utc};
use serde_json::Value;

use cca_schema::fields::SUMMARY_FIELDS;
use cca_schema::Topic;
use cca_state::AssessmentRecord;

const METADATA_COLUMNS: &[&str] = &[
    "id",
    "name",
    "status",
    "solution_name",
    "solution_version",
    "vendor_name",
    "solution_type",
    "hosting_and_type",
    "server_host",
    "solution_classification",
    "approved_by_business_owner",
    "approved_by_system_owner",
    "approved_by_compliance_officer",
];

const RATING_COLUMNS: &[&str] = &[
    "rating_significant",
    "rating_moderate",
    "rating_minimal",
    "rating_no_compliance_risk",
    "rating_comment",
];

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn decision_cell(approved: Option<bool>) -> String {
    match approved {
        None => String::new(),
        Some(b) => b.to_string(),
    }
}

/// The export header row. Fixed order, identical for every record.
pub fn export_headers() -> Vec<String> {
    let mut headers: Vec<String> = METADATA_COLUMNS.iter().map(|c| c.to_string()).collect();
    for topic in Topic::all() {
        headers.extend(topic.fields().iter().map(|f| f.key.to_string()));
    }
    headers.extend(SUMMARY_FIELDS.iter().map(|f| format!("summary_{}", f.key)));
    headers.extend(RATING_COLUMNS.iter().map(|c| c.to_string()));
    headers
}

/// Flatten one record into `(column, value)` pairs aligned with
/// [`export_headers`].
pub fn flatten_record(record: &AssessmentRecord) -> Vec<(String, String)> {
    let mut cells: Vec<String> = vec![
        record.id.to_string(),
        record.name.clone(),
        record.status.to_string(),
        record.profile.solution_name.clone(),
        record.profile.solution_version.clone(),
        record.profile.vendor_name.clone(),
        record.profile.solution_type_display().to_string(),
        record
            .profile
            .hosting
            .map(|h| h.as_str().to_string())
            .unwrap_or_default(),
        record.profile.server_host.clone(),
        record
            .profile
            .solution_classification
            .map(|c| c.as_str().to_string())
            .unwrap_or_default(),
        decision_cell(record.decisions.business_owner.approved),
        decision_cell(record.decisions.system_owner.approved),
        decision_cell(record.decisions.compliance_officer.approved),
    ];

    for topic in Topic::all() {
        let values = record.answers.topic_value(*topic);
        for field in topic.fields() {
            cells.push(cell(values.get(field.key).unwrap_or(&Value::Null)));
        }
    }

    let summary = record.summary.to_value();
    for field in SUMMARY_FIELDS {
        cells.push(cell(summary.get(field.key).unwrap_or(&Value::Null)));
    }

    let rating = record.rating.to_flags_value();
    for column in RATING_COLUMNS {
        cells.push(cell(rating.get(column).unwrap_or(&Value::Null)));
    }

    export_headers().into_iter().zip(cells).collect()
}

/// Flatten a set of records into a header row plus one value row each.
pub fn export_rows(records: &[&AssessmentRecord]) -> (Vec<String>, Vec<Vec<String>>) {
    let headers = export_headers();
    let rows = records
        .iter()
        .map(|record| {
            flatten_record(record)
                .into_iter()
                .map(|(_, value)| value)
                .collect()
        })
        .collect();
    (headers, rows)
}

/// The timestamped export file name.
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!(
        "Compliance_Criticality_Assessment_{}.csv",
        now.format("%Y-%m-%d_%H-%M-%S")
    )
}
