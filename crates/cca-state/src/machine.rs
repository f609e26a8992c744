//! # Approval State Machine
//!
//! Drives the record lifecycle from the three independent approver
//! decisions:
//!
//! - `submit` moves the record to `for_review`, resetting the decisions
//!   only when leaving `draft`; a submitter who also holds an approval
//!   role is auto-approved as a side effect.
//! - `approve` / `reject` record one role's decision; anyone outside
//!   the approval team is rejected with [`ApprovalError`].
//! - After every decision change the record is evaluated: all three
//!   approved → `approved` (yielding a [`ReportTrigger`] exactly once
//!   per entry); all three reviewed with a rejection → `for_revision`.

use chrono::{DateTime, Utc};
use thiserror::Error;

use cca_core::{ApproverRole, AssessmentId, AssessmentStatus, CommentId, UserId};

use crate::record::{AssessmentRecord, ReviewComment};

/// Errors raised by approval actions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApprovalError {
    /// The acting user holds none of the three approval roles.
    #[error("user {user} is not part of the approval team")]
    UnauthorizedApprover {
        /// The acting user.
        user: UserId,
    },
}

/// Marker that the report-generation pipeline must run for a record.
///
/// Yielded exactly once per entry into `approved`; re-evaluating an
/// already-approved record yields none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTrigger {
    /// The record whose reports must be generated.
    pub assessment: AssessmentId,
}

impl AssessmentRecord {
    /// Submit the record for review.
    ///
    /// Transitions to `for_review`. Decisions reset only when the record
    /// was in `draft`; resubmitting an already-in-review record keeps
    /// the decisions gathered so far. A submitter who holds one of the
    /// approval roles has that role auto-approved.
    ///
    /// Returns a [`ReportTrigger`] in the edge case where the submit
    /// completes the approval set (the submitter was the last pending
    /// approver).
    pub fn submit(&mut self, actor: &UserId, now: DateTime<Utc>) -> Option<ReportTrigger> {
        let previous = self.status;
        self.status = AssessmentStatus::ForReview;
        if previous == AssessmentStatus::Draft {
            self.decisions.reset();
        }
        tracing::info!(assessment = %self.id, from = %previous, "assessment submitted for review");

        if let Some(role) = self.approvers.role_of(actor) {
            let decision = self.decisions.for_role_mut(role);
            decision.approved = Some(true);
            decision.decided_at = Some(now);
            tracing::debug!(assessment = %self.id, role = %role, "submitter auto-approved own role");
        }

        self.updated_at = now;
        self.evaluate(now)
    }

    /// Revert the record to `draft` for an edit-resubmission cycle.
    pub fn revert_to_draft(&mut self, now: DateTime<Utc>) {
        self.status = AssessmentStatus::Draft;
        self.updated_at = now;
    }

    /// Record an approval for the acting user's role.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::UnauthorizedApprover`] when the actor
    /// holds no approval role on this record.
    pub fn approve(
        &mut self,
        actor: &UserId,
        now: DateTime<Utc>,
    ) -> Result<(ApproverRole, Option<ReportTrigger>), ApprovalError> {
        let role = self
            .approvers
            .role_of(actor)
            .ok_or(ApprovalError::UnauthorizedApprover { user: *actor })?;

        let decision = self.decisions.for_role_mut(role);
        decision.approved = Some(true);
        decision.decided_at = Some(now);
        self.updated_at = now;
        tracing::info!(assessment = %self.id, role = %role, "assessment approved");

        Ok((role, self.evaluate(now)))
    }

    /// Record a rejection for the acting user's role, clearing the
    /// decision timestamp and optionally attaching a review comment.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::UnauthorizedApprover`] when the actor
    /// holds no approval role on this record.
    pub fn reject(
        &mut self,
        actor: &UserId,
        comment: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<ApproverRole, ApprovalError> {
        let role = self
            .approvers
            .role_of(actor)
            .ok_or(ApprovalError::UnauthorizedApprover { user: *actor })?;

        let decision = self.decisions.for_role_mut(role);
        decision.approved = Some(false);
        decision.decided_at = None;
        self.updated_at = now;
        tracing::info!(assessment = %self.id, role = %role, "assessment rejected");

        if let Some(comment) = comment.filter(|c| !c.trim().is_empty()) {
            self.comments.push(ReviewComment {
                id: CommentId::new(),
                author: *actor,
                comment,
                created_at: now,
            });
        }

        // A rejection can complete the review set → for_revision.
        let trigger = self.evaluate(now);
        debug_assert!(trigger.is_none(), "a rejection can never enter approved");
        Ok(role)
    }

    /// Evaluate the decision set and apply the resulting transition.
    ///
    /// Observes the three decisions as one snapshot (the caller holds
    /// the record exclusively). Entering `approved` from any other
    /// status yields the report trigger; re-entering while already
    /// approved does not.
    pub fn evaluate(&mut self, now: DateTime<Utc>) -> Option<ReportTrigger> {
        if !self.decisions.all_reviewed() {
            return None;
        }

        let previous = self.status;
        if self.decisions.all_approved() {
            self.status = AssessmentStatus::Approved;
            self.updated_at = now;
            if previous != AssessmentStatus::Approved {
                tracing::info!(assessment = %self.id, "assessment approved by all roles; report pipeline triggered");
                return Some(ReportTrigger {
                    assessment: self.id,
                });
            }
            return None;
        }

        // All reviewed, at least one rejected.
        self.status = AssessmentStatus::ForRevision;
        self.updated_at = now;
        if previous != AssessmentStatus::ForRevision {
            tracing::info!(assessment = %self.id, "assessment sent back for revision");
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{NewAssessment, SolutionProfile};
    use cca_core::{CompanyId, HostingType, PersonRef};
    use cca_schema::TopicAnswerSet;

    fn person(company: CompanyId, email: &str) -> PersonRef {
        PersonRef::new(UserId::new(), email, company).unwrap()
    }

    fn record() -> AssessmentRecord {
        let company = CompanyId::new();
        AssessmentRecord::create(
            NewAssessment {
                company,
                drafted_by: person(company, "drafter@example.com"),
                business_owner: person(company, "business@example.com"),
                system_owner: person(company, "system@example.com"),
                compliance_officer: person(company, "compliance@example.com"),
                profile: SolutionProfile {
                    hosting: Some(HostingType::Saas),
                    ..Default::default()
                },
                answers: TopicAnswerSet::default(),
            },
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn submit_moves_to_for_review_and_resets_decisions() {
        let mut record = record();
        record.decisions.business_owner.approved = Some(true);
        let drafter = record.drafted_by.id;

        let trigger = record.submit(&drafter, Utc::now());
        assert!(trigger.is_none());
        assert_eq!(record.status, AssessmentStatus::ForReview);
        // Leaving draft resets the stale decision.
        assert_eq!(record.decisions.business_owner.approved, None);
    }

    #[test]
    fn resubmit_from_for_review_keeps_decisions() {
        let mut record = record();
        let drafter = record.drafted_by.id;
        record.submit(&drafter, Utc::now());

        let business = record.approvers.business_owner.id;
        record.approve(&business, Utc::now()).unwrap();

        record.submit(&drafter, Utc::now());
        assert_eq!(record.decisions.business_owner.approved, Some(true));
    }

    #[test]
    fn submitting_approver_is_auto_approved() {
        let mut record = record();
        let system_owner = record.approvers.system_owner.id;
        record.submit(&system_owner, Utc::now());
        assert_eq!(record.decisions.system_owner.approved, Some(true));
        assert!(record.decisions.system_owner.decided_at.is_some());
        assert_eq!(record.decisions.business_owner.approved, None);
    }

    #[test]
    fn outsider_cannot_approve_or_reject() {
        let mut record = record();
        let outsider = UserId::new();
        let err = record.approve(&outsider, Utc::now()).unwrap_err();
        assert_eq!(err, ApprovalError::UnauthorizedApprover { user: outsider });
        let err = record.reject(&outsider, None, Utc::now()).unwrap_err();
        assert_eq!(err, ApprovalError::UnauthorizedApprover { user: outsider });
    }

    #[test]
    fn approval_cascade_triggers_reports_exactly_once() {
        let mut record = record();
        let drafter = record.drafted_by.id;
        record.submit(&drafter, Utc::now());

        // None approved yet: stays in review.
        assert_eq!(record.status, AssessmentStatus::ForReview);

        let business = record.approvers.business_owner.id;
        let system = record.approvers.system_owner.id;
        let compliance = record.approvers.compliance_officer.id;

        let (_, trigger) = record.approve(&business, Utc::now()).unwrap();
        assert!(trigger.is_none());
        assert_eq!(record.status, AssessmentStatus::ForReview);

        let (_, trigger) = record.approve(&system, Utc::now()).unwrap();
        assert!(trigger.is_none());

        let (_, trigger) = record.approve(&compliance, Utc::now()).unwrap();
        let trigger = trigger.expect("third approval enters approved");
        assert_eq!(trigger.assessment, record.id);
        assert_eq!(record.status, AssessmentStatus::Approved);

        // Re-approving an already-approved record must not re-fire.
        let (_, trigger) = record.approve(&business, Utc::now()).unwrap();
        assert!(trigger.is_none());
        assert_eq!(record.status, AssessmentStatus::Approved);
    }

    #[test]
    fn rejection_after_full_approval_moves_to_for_revision() {
        let mut record = record();
        let drafter = record.drafted_by.id;
        record.submit(&drafter, Utc::now());
        for approver in [
            record.approvers.business_owner.id,
            record.approvers.system_owner.id,
            record.approvers.compliance_officer.id,
        ] {
            record.approve(&approver, Utc::now()).unwrap();
        }
        assert_eq!(record.status, AssessmentStatus::Approved);

        let system = record.approvers.system_owner.id;
        record
            .reject(&system, Some("hosting detail wrong".into()), Utc::now())
            .unwrap();
        assert_eq!(record.status, AssessmentStatus::ForRevision);
        assert_eq!(record.decisions.system_owner.approved, Some(false));
        assert_eq!(record.decisions.system_owner.decided_at, None);
        assert_eq!(record.comments.len(), 1);
        assert_eq!(record.comments[0].comment, "hosting detail wrong");
    }

    #[test]
    fn reject_without_comment_records_no_comment() {
        let mut record = record();
        let business = record.approvers.business_owner.id;
        record.reject(&business, None, Utc::now()).unwrap();
        record
            .reject(&business, Some("   ".into()), Utc::now())
            .unwrap();
        assert!(record.comments.is_empty());
    }

    #[test]
    fn partial_review_with_rejection_stays_in_review() {
        let mut record = record();
        let drafter = record.drafted_by.id;
        record.submit(&drafter, Utc::now());
        let business = record.approvers.business_owner.id;
        record.reject(&business, None, Utc::now()).unwrap();
        // Two approvers still pending: no transition yet.
        assert_eq!(record.status, AssessmentStatus::ForReview);
    }

    #[test]
    fn submit_by_last_pending_approver_completes_approval() {
        let mut record = record();
        let drafter = record.drafted_by.id;
        record.submit(&drafter, Utc::now());
        record
            .approve(&record.approvers.business_owner.id.clone(), Utc::now())
            .unwrap();
        record
            .approve(&record.approvers.system_owner.id.clone(), Utc::now())
            .unwrap();

        // The compliance officer resubmits; auto-approval completes the set.
        let compliance = record.approvers.compliance_officer.id;
        let trigger = record.submit(&compliance, Utc::now());
        assert!(trigger.is_some());
        assert_eq!(record.status, AssessmentStatus::Approved);
    }

    #[test]
    fn revert_to_draft_then_resubmit_resets_decisions() {
        let mut record = record();
        let drafter = record.drafted_by.id;
        record.submit(&drafter, Utc::now());
        record
            .approve(&record.approvers.business_owner.id.clone(), Utc::now())
            .unwrap();

        record.revert_to_draft(Utc::now());
        assert_eq!(record.status, AssessmentStatus::Draft);

        record.submit(&drafter, Utc::now());
        assert_eq!(record.decisions.business_owner.approved, None);
    }
}
