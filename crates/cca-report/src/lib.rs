//! # cca-report — Report Generation Pipeline
//!
//! Turns an approved assessment into its report artifacts through a
//! strictly ordered chain of stages:
//!
//! 1. resolve the applicable requirements,
//! 2. build the requirements worksheet (category header bands),
//! 3. build the annotated worksheet (reference-policy columns),
//! 4. build the narrative assessment document,
//! 5. archive the stored artifacts,
//! 6. notify the drafter and approvers.
//!
//! Stage failures are caught and recorded as
//! `StageReport { success, message }`, never raised across the chain,
//! and a stage whose predecessor failed records a skip instead of
//! running. Rendering, storage, archiving, and delivery sit behind the
//! [`ReportSink`] trait; this crate only builds the structured
//! artifacts.

pub mod document;
pub mod email;
pub mod export;
pub mod pipeline;
pub mod worksheet;

// Re-export primary types.
pub use document::{build_document, checkbox, AssessmentDocument, DocumentSection, QuestionRow, SelectionRow};
pub use email::{report_ready_notification, EmailNotification};
pub use export::{export_filename, export_rows, flatten_record};
pub use pipeline::{
    regenerate_reports, run_report_pipeline, PipelineRun, ReportError, ReportSink, StageReport,
};
pub use worksheet::{
    build_annotated_worksheet, build_requirements_worksheet, category_for_control_id,
    AnnotatedWorksheet, RequirementsWorksheet, WorksheetRow, WorksheetSection,
};
