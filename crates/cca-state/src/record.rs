//! # Assessment Record
//!
//! The aggregate: identity, ownership, approver assignments, decision
//! snapshots, solution profile, topic answers, and the derived
//! summary/rating. Creation validates the approver rules (three
//! distinct people, all in the record's company) and the solution-type
//! "Other" rule, batching every finding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use cca_core::{
    ApproverRole, AssessmentId, AssessmentStatus, CommentId, CompanyId, HostingType, PersonRef,
    SolutionClassification, SolutionType, UserId,
};
use cca_engine::{derive_rating, derive_summary, Rating, Summary};
use cca_schema::{apply_eres_suppression, TopicAnswerSet};

// ---------------------------------------------------------------------------
// SolutionProfile
// ---------------------------------------------------------------------------

/// Solution identification metadata. Only the hosting type participates
/// in requirement resolution; the rest is carried into the reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionProfile {
    /// Solution name.
    pub solution_name: String,
    /// Software release / version, as applicable.
    pub solution_version: String,
    /// Vendor name.
    pub vendor_name: String,
    /// The kind of solution.
    pub solution_type: Option<SolutionType>,
    /// Free-text kind, required when `solution_type` is `Other`.
    pub other_solution_type: String,
    /// Hosting type; drives the resolution applicability predicate.
    pub hosting: Option<HostingType>,
    /// Server host / location.
    pub server_host: String,
    /// Configurability classification.
    pub solution_classification: Option<SolutionClassification>,
    /// Solution description and intended use.
    pub solution_description: String,
}

impl SolutionProfile {
    /// The display form of the solution type: the "Other" free text when
    /// selected, the label otherwise.
    pub fn solution_type_display(&self) -> &str {
        match self.solution_type {
            Some(SolutionType::Other) => &self.other_solution_type,
            Some(kind) => kind.label(),
            None => "",
        }
    }
}

// ---------------------------------------------------------------------------
// Approvers & decisions
// ---------------------------------------------------------------------------

/// The three approver assignments of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproverAssignment {
    pub business_owner: PersonRef,
    pub system_owner: PersonRef,
    pub compliance_officer: PersonRef,
}

impl ApproverAssignment {
    /// The person holding the given role.
    pub fn for_role(&self, role: ApproverRole) -> &PersonRef {
        match role {
            ApproverRole::BusinessOwner => &self.business_owner,
            ApproverRole::SystemOwner => &self.system_owner,
            ApproverRole::ComplianceOfficer => &self.compliance_officer,
        }
    }

    /// The role a user holds, if any. Checked in role order; roles are
    /// distinct people by record invariant, so at most one matches.
    pub fn role_of(&self, user: &UserId) -> Option<ApproverRole> {
        ApproverRole::all()
            .iter()
            .copied()
            .find(|role| self.for_role(*role).id == *user)
    }
}

/// One approver's decision snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// `None` = not yet reviewed, `Some(true)` = approved,
    /// `Some(false)` = rejected.
    pub approved: Option<bool>,
    /// When the decision was made. Cleared on rejection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
}

/// The three decision snapshots of a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalDecisions {
    pub business_owner: Decision,
    pub system_owner: Decision,
    pub compliance_officer: Decision,
}

impl ApprovalDecisions {
    /// The decision for a role.
    pub fn for_role(&self, role: ApproverRole) -> &Decision {
        match role {
            ApproverRole::BusinessOwner => &self.business_owner,
            ApproverRole::SystemOwner => &self.system_owner,
            ApproverRole::ComplianceOfficer => &self.compliance_officer,
        }
    }

    /// Mutable decision for a role.
    pub fn for_role_mut(&mut self, role: ApproverRole) -> &mut Decision {
        match role {
            ApproverRole::BusinessOwner => &mut self.business_owner,
            ApproverRole::SystemOwner => &mut self.system_owner,
            ApproverRole::ComplianceOfficer => &mut self.compliance_officer,
        }
    }

    /// Reset all three decisions to "not yet reviewed".
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn all(&self) -> [Decision; 3] {
        [self.business_owner, self.system_owner, self.compliance_officer]
    }

    /// Whether all three approvers have decided.
    pub fn all_reviewed(&self) -> bool {
        self.all().iter().all(|d| d.approved.is_some())
    }

    /// Whether all three decisions are explicit approvals.
    pub fn all_approved(&self) -> bool {
        self.all().iter().all(|d| d.approved == Some(true))
    }

    /// Whether any decision is an explicit rejection.
    pub fn any_rejected(&self) -> bool {
        self.all().iter().any(|d| d.approved == Some(false))
    }
}

// ---------------------------------------------------------------------------
// ReviewComment
// ---------------------------------------------------------------------------

/// A free-text review comment tied to a record, usually attached on
/// rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewComment {
    pub id: CommentId,
    /// The reviewer who wrote the comment.
    pub author: UserId,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A single record-level validation finding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordFinding {
    /// Two or three approval roles point at the same person.
    #[error("approver for each role should not be the same")]
    DuplicateApprovers,

    /// An approver belongs to a different company than the record.
    #[error("{} should be part of the company this form is assigned to", .role.label())]
    ApproverOutsideCompany {
        /// The offending role.
        role: ApproverRole,
    },

    /// Solution type is `Other` but the free-text field is empty.
    #[error("other solution type is required when solution type is set to 'Other'")]
    MissingOtherSolutionType,
}

/// Batched record validation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("assessment record failed validation: {}", .findings.iter().map(|f| f.to_string()).collect::<Vec<_>>().join("; "))]
pub struct RecordValidationError {
    /// Every finding, in discovery order.
    pub findings: Vec<RecordFinding>,
}

// ---------------------------------------------------------------------------
// AssessmentRecord
// ---------------------------------------------------------------------------

/// Input for creating a record.
#[derive(Debug, Clone)]
pub struct NewAssessment {
    pub company: CompanyId,
    pub drafted_by: PersonRef,
    pub business_owner: PersonRef,
    pub system_owner: PersonRef,
    pub compliance_officer: PersonRef,
    pub profile: SolutionProfile,
    pub answers: TopicAnswerSet,
}

/// The aggregate root. Owned by its creator's company; mutations are
/// expected to be serialized per record by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: AssessmentId,
    /// Form name; defaults to `Form #<n>` via [`Self::assign_default_name`].
    pub name: String,
    pub company: CompanyId,
    pub drafted_by: PersonRef,
    pub approvers: ApproverAssignment,
    pub status: AssessmentStatus,
    pub decisions: ApprovalDecisions,
    pub profile: SolutionProfile,
    pub answers: TopicAnswerSet,
    /// Derived; recomputed on every answer update.
    pub summary: Summary,
    /// Derived rating; the comment inside is user text and survives
    /// recomputation.
    pub rating: Rating,
    pub comments: Vec<ReviewComment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AssessmentRecord {
    /// Create a record in `Draft`, validating the approver and
    /// solution-type rules and deriving the initial summary/rating.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordValidationError`] batching every finding.
    pub fn create(new: NewAssessment, now: DateTime<Utc>) -> Result<Self, RecordValidationError> {
        let mut record = Self {
            id: AssessmentId::new(),
            name: String::new(),
            company: new.company,
            drafted_by: new.drafted_by,
            approvers: ApproverAssignment {
                business_owner: new.business_owner,
                system_owner: new.system_owner,
                compliance_officer: new.compliance_officer,
            },
            status: AssessmentStatus::Draft,
            decisions: ApprovalDecisions::default(),
            profile: new.profile,
            answers: new.answers,
            summary: Summary::default(),
            rating: derive_rating(&Summary::default()),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        record.normalize_profile();
        record.validate()?;
        record.recalculate();
        Ok(record)
    }

    /// Validate the approver rules and the solution-type "Other" rule.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordValidationError`] batching every finding.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        let mut findings = Vec::new();

        let ids = [
            self.approvers.business_owner.id,
            self.approvers.system_owner.id,
            self.approvers.compliance_officer.id,
        ];
        let distinct: std::collections::BTreeSet<_> =
            ids.iter().map(|id| *id.as_uuid()).collect();
        if distinct.len() != ids.len() {
            findings.push(RecordFinding::DuplicateApprovers);
        }

        for role in ApproverRole::all() {
            if self.approvers.for_role(*role).company != self.company {
                findings.push(RecordFinding::ApproverOutsideCompany { role: *role });
            }
        }

        if self.profile.solution_type == Some(SolutionType::Other)
            && self.profile.other_solution_type.trim().is_empty()
        {
            findings.push(RecordFinding::MissingOtherSolutionType);
        }

        if findings.is_empty() {
            Ok(())
        } else {
            Err(RecordValidationError { findings })
        }
    }

    /// Clear the "Other" free text when the solution type is not
    /// `Other`; a submitted leftover is ignored, not an error.
    fn normalize_profile(&mut self) {
        if self.profile.solution_type != Some(SolutionType::Other) {
            self.profile.other_solution_type.clear();
        }
    }

    /// Recompute the derived summary and rating from the current
    /// answers. The rating comment is user text and is preserved.
    pub fn recalculate(&mut self) {
        apply_eres_suppression(&mut self.answers);
        self.summary = derive_summary(&self.answers);
        let comment = std::mem::take(&mut self.rating.comment);
        self.rating = derive_rating(&self.summary);
        self.rating.comment = comment;
    }

    /// Replace the topic answers and recompute the derived values.
    pub fn update_answers(&mut self, answers: TopicAnswerSet, now: DateTime<Utc>) {
        self.answers = answers;
        self.recalculate();
        self.updated_at = now;
    }

    /// Set the default `Form #<n>` name if none was given. The form
    /// number comes from the persistence collaborator.
    pub fn assign_default_name(&mut self, form_number: u64) {
        if self.name.is_empty() {
            self.name = format!("Form #{form_number}");
        }
    }

    /// Review comments, newest first.
    pub fn comments_newest_first(&self) -> Vec<&ReviewComment> {
        let mut comments: Vec<&ReviewComment> = self.comments.iter().collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        comments
    }
}
