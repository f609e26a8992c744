//! # Report Pipeline
//!
//! The ordered stage chain. Each stage is caught at its boundary and
//! reported as `{success, message}`; later stages consult the running
//! success flag and record a skip instead of crashing when an upstream
//! stage failed. Re-running a stage overwrites its artifact; the sink
//! contract requires idempotent writes per record.

use anyhow::Result;
use thiserror::Error;

use cca_catalog::Catalog;
use cca_core::{AssessmentId, AssessmentStatus};
use cca_engine::{annotate_references, resolve_requirements};
use cca_state::AssessmentRecord;

use crate::document::{build_document, AssessmentDocument};
use crate::email::{report_ready_notification, EmailNotification};
use crate::worksheet::{
    build_annotated_worksheet, build_requirements_worksheet, AnnotatedWorksheet,
    RequirementsWorksheet,
};

/// Where the pipeline hands its artifacts: renderers, storage,
/// archiving, and mail delivery are external collaborators behind this
/// trait. Write methods return the stored artifact name; writes must be
/// idempotent per record.
pub trait ReportSink {
    /// Render and store the requirements worksheet.
    fn write_requirements_worksheet(
        &mut self,
        record: &AssessmentRecord,
        worksheet: &RequirementsWorksheet,
    ) -> Result<String>;

    /// Render and store the annotated worksheet.
    fn write_annotated_worksheet(
        &mut self,
        record: &AssessmentRecord,
        worksheet: &AnnotatedWorksheet,
    ) -> Result<String>;

    /// Render and store the narrative assessment document.
    fn write_document(
        &mut self,
        record: &AssessmentRecord,
        document: &AssessmentDocument,
    ) -> Result<String>;

    /// Compress the stored artifacts into one archive; returns the
    /// archive's name/location.
    fn archive(&mut self, record: &AssessmentRecord, artifacts: &[String]) -> Result<String>;

    /// Deliver the notification email.
    fn deliver(&mut self, notification: &EmailNotification) -> Result<()>;
}

/// One stage's outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    /// Stage name, stable across runs.
    pub stage: &'static str,
    /// Whether the stage ran to completion.
    pub success: bool,
    /// Outcome detail (success note, error text, or skip reason).
    pub message: String,
}

/// The outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRun {
    /// The record the run belongs to.
    pub assessment: AssessmentId,
    /// Stage reports in execution order.
    pub stages: Vec<StageReport>,
}

impl PipelineRun {
    /// Whether every stage ran successfully.
    pub fn succeeded(&self) -> bool {
        self.stages.iter().all(|s| s.success)
    }

    /// The report for a stage, if it was reached.
    pub fn stage(&self, name: &str) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.stage == name)
    }
}

/// Errors raised before a pipeline run starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// Regeneration was requested for a selection containing records
    /// that are not approved.
    #[error("there are unapproved forms in the selection; generate reports with an approved status only")]
    UnapprovedSelection,
}

fn run_stage<T>(
    stages: &mut Vec<StageReport>,
    stage: &'static str,
    success_message: &str,
    failure_prefix: &str,
    upstream_ok: bool,
    f: impl FnOnce() -> Result<T>,
) -> Option<T> {
    if !upstream_ok {
        stages.push(StageReport {
            stage,
            success: false,
            message: "skipped: an upstream stage failed".to_string(),
        });
        return None;
    }
    match f() {
        Ok(value) => {
            stages.push(StageReport {
                stage,
                success: true,
                message: success_message.to_string(),
            });
            Some(value)
        }
        Err(e) => {
            tracing::warn!(stage, error = %e, "report pipeline stage failed");
            stages.push(StageReport {
                stage,
                success: false,
                message: format!("{failure_prefix}: {e}"),
            });
            None
        }
    }
}

/// Run the full report pipeline for one record.
///
/// Never panics and never propagates stage errors; the returned
/// [`PipelineRun`] carries every stage's outcome. Runs for different
/// records are independent.
pub fn run_report_pipeline(
    catalog: &Catalog,
    record: &AssessmentRecord,
    sink: &mut dyn ReportSink,
) -> PipelineRun {
    let mut stages = Vec::new();
    tracing::info!(assessment = %record.id, "report pipeline started");

    let resolved = run_stage(
        &mut stages,
        "resolve_requirements",
        "Requirements resolved successfully.",
        "Error resolving requirements",
        true,
        || Ok(resolve_requirements(catalog, record.profile.hosting, &record.rating, &record.summary)?),
    );
    let mut ok = resolved.is_some();
    let requirements = resolved.unwrap_or_default();
    let mut artifacts: Vec<String> = Vec::new();

    let worksheet = run_stage(
        &mut stages,
        "requirements_worksheet",
        "Requirements worksheet generated successfully.",
        "Error generating requirements worksheet",
        ok,
        || {
            let worksheet = build_requirements_worksheet(&requirements);
            sink.write_requirements_worksheet(record, &worksheet)
        },
    );
    if let Some(name) = worksheet {
        artifacts.push(name);
    } else {
        ok = false;
    }

    let annotated = run_stage(
        &mut stages,
        "annotated_worksheet",
        "Annotated worksheet generated successfully.",
        "Error generating annotated worksheet",
        ok,
        || {
            let annotations = annotate_references(catalog, &record.summary, &requirements);
            let worksheet = build_annotated_worksheet(&annotations, &requirements);
            sink.write_annotated_worksheet(record, &worksheet)
        },
    );
    if let Some(name) = annotated {
        artifacts.push(name);
    } else {
        ok = false;
    }

    let document = run_stage(
        &mut stages,
        "assessment_document",
        "Assessment document generated successfully.",
        "Error generating assessment document",
        ok,
        || {
            let document = build_document(record);
            sink.write_document(record, &document)
        },
    );
    if let Some(name) = document {
        artifacts.push(name);
    } else {
        ok = false;
    }

    let archive = run_stage(
        &mut stages,
        "archive_reports",
        "Reports have been compiled and archived.",
        "Error compiling reports",
        ok,
        || sink.archive(record, &artifacts),
    );
    let archive_name = match archive {
        Some(name) => name,
        None => {
            ok = false;
            String::new()
        }
    };

    run_stage(
        &mut stages,
        "send_notification",
        "Report notification has been sent.",
        "Error sending report notification",
        ok,
        || {
            let notification = report_ready_notification(record, &archive_name);
            sink.deliver(&notification)
        },
    );

    let run = PipelineRun {
        assessment: record.id,
        stages,
    };
    tracing::info!(assessment = %record.id, succeeded = run.succeeded(), "report pipeline finished");
    run
}

/// Re-run the pipeline for a selection of records.
///
/// # Errors
///
/// Returns [`ReportError::UnapprovedSelection`] (without running
/// anything) when any record in the selection is not approved.
pub fn regenerate_reports(
    catalog: &Catalog,
    records: &[&AssessmentRecord],
    sink: &mut dyn ReportSink,
) -> Result<Vec<PipelineRun>, ReportError> {
    if records
        .iter()
        .any(|record| record.status != AssessmentStatus::Approved)
    {
        return Err(ReportError::UnapprovedSelection);
    }
    Ok(records
        .iter()
        .map(|record| run_report_pipeline(catalog, record, sink))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use cca_core::{CompanyId, HostingType, PersonRef, UserId};
    use cca_schema::TopicAnswerSet;
    use cca_state::{NewAssessment, SolutionProfile};
    use chrono::Utc;

    #[derive(Default)]
    struct MemorySink {
        written: Vec<String>,
        archived: Vec<Vec<String>>,
        delivered: Vec<EmailNotification>,
        fail_stage: Option<&'static str>,
    }

    impl MemorySink {
        fn fail_at(stage: &'static str) -> Self {
            Self {
                fail_stage: Some(stage),
                ..Default::default()
            }
        }

        fn check(&self, stage: &'static str) -> Result<()> {
            if self.fail_stage == Some(stage) {
                return Err(anyhow!("storage unavailable"));
            }
            Ok(())
        }
    }

    impl ReportSink for MemorySink {
        fn write_requirements_worksheet(
            &mut self,
            _record: &AssessmentRecord,
            _worksheet: &RequirementsWorksheet,
        ) -> Result<String> {
            self.check("requirements_worksheet")?;
            self.written.push("output1.xlsm".into());
            Ok("output1.xlsm".into())
        }

        fn write_annotated_worksheet(
            &mut self,
            _record: &AssessmentRecord,
            _worksheet: &AnnotatedWorksheet,
        ) -> Result<String> {
            self.check("annotated_worksheet")?;
            self.written.push("output2.xlsm".into());
            Ok("output2.xlsm".into())
        }

        fn write_document(
            &mut self,
            _record: &AssessmentRecord,
            _document: &AssessmentDocument,
        ) -> Result<String> {
            self.check("assessment_document")?;
            self.written.push("assessment.docx".into());
            Ok("assessment.docx".into())
        }

        fn archive(&mut self, _record: &AssessmentRecord, artifacts: &[String]) -> Result<String> {
            self.check("archive_reports")?;
            self.archived.push(artifacts.to_vec());
            Ok("reports.zip".into())
        }

        fn deliver(&mut self, notification: &EmailNotification) -> Result<()> {
            self.check("send_notification")?;
            self.delivered.push(notification.clone());
            Ok(())
        }
    }

    fn person(company: CompanyId, email: &str) -> PersonRef {
        PersonRef::new(UserId::new(), email, company).unwrap()
    }

    fn record(hosting: Option<HostingType>) -> AssessmentRecord {
        let company = CompanyId::new();
        let mut record = AssessmentRecord::create(
            NewAssessment {
                company,
                drafted_by: person(company, "drafter@example.com"),
                business_owner: person(company, "business@example.com"),
                system_owner: person(company, "system@example.com"),
                compliance_officer: person(company, "compliance@example.com"),
                profile: SolutionProfile {
                    hosting,
                    ..Default::default()
                },
                answers: TopicAnswerSet::default(),
            },
            Utc::now(),
        )
        .unwrap();
        record.assign_default_name(1);
        record
    }

    #[test]
    fn full_run_reports_every_stage_successful() {
        let mut sink = MemorySink::default();
        let run = run_report_pipeline(&Catalog::default(), &record(Some(HostingType::Saas)), &mut sink);
        assert!(run.succeeded());
        assert_eq!(run.stages.len(), 6);
        assert_eq!(
            sink.written,
            ["output1.xlsm", "output2.xlsm", "assessment.docx"]
        );
        assert_eq!(sink.archived, vec![vec![
            "output1.xlsm".to_string(),
            "output2.xlsm".to_string(),
            "assessment.docx".to_string(),
        ]]);
        assert_eq!(sink.delivered.len(), 1);
        assert!(sink.delivered[0].body.contains("reports.zip"));
    }

    #[test]
    fn missing_hosting_type_fails_resolve_and_skips_the_rest() {
        let mut sink = MemorySink::default();
        let run = run_report_pipeline(&Catalog::default(), &record(None), &mut sink);
        assert!(!run.succeeded());

        let resolve = run.stage("resolve_requirements").unwrap();
        assert!(!resolve.success);
        assert!(resolve.message.contains("unsupported hosting type"));

        for stage in [
            "requirements_worksheet",
            "annotated_worksheet",
            "assessment_document",
            "archive_reports",
            "send_notification",
        ] {
            let report = run.stage(stage).unwrap();
            assert!(!report.success, "{stage} should be skipped");
            assert!(report.message.contains("skipped"), "{stage}: {}", report.message);
        }
        assert!(sink.written.is_empty());
        assert!(sink.delivered.is_empty());
    }

    #[test]
    fn sink_failure_mid_chain_short_circuits_downstream() {
        let mut sink = MemorySink::fail_at("assessment_document");
        let run = run_report_pipeline(&Catalog::default(), &record(Some(HostingType::Saas)), &mut sink);
        assert!(!run.succeeded());

        assert!(run.stage("requirements_worksheet").unwrap().success);
        assert!(run.stage("annotated_worksheet").unwrap().success);

        let document = run.stage("assessment_document").unwrap();
        assert!(!document.success);
        assert!(document.message.contains("storage unavailable"));

        assert!(run.stage("archive_reports").unwrap().message.contains("skipped"));
        assert!(sink.delivered.is_empty());
    }

    #[test]
    fn archive_receives_only_written_artifacts() {
        let mut sink = MemorySink::default();
        run_report_pipeline(&Catalog::default(), &record(Some(HostingType::Saas)), &mut sink);
        assert_eq!(sink.archived[0].len(), 3);
    }

    #[test]
    fn regenerate_rejects_unapproved_selection() {
        let approved = {
            let mut r = record(Some(HostingType::Saas));
            for approver in [
                r.approvers.business_owner.id,
                r.approvers.system_owner.id,
                r.approvers.compliance_officer.id,
            ] {
                r.approve(&approver, Utc::now()).unwrap();
            }
            r
        };
        let draft = record(Some(HostingType::Saas));

        let mut sink = MemorySink::default();
        let err =
            regenerate_reports(&Catalog::default(), &[&approved, &draft], &mut sink).unwrap_err();
        assert_eq!(err, ReportError::UnapprovedSelection);
        assert!(sink.written.is_empty());

        let runs = regenerate_reports(&Catalog::default(), &[&approved], &mut sink).unwrap();
        assert_eq!(runs.len(), 1);
        assert!(runs[0].succeeded());
    }
}
