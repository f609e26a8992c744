//! # Lifecycle Status & Approver Roles
//!
//! The four-state assessment lifecycle and the three independent
//! approver roles that drive it. Transition logic lives in `cca-state`;
//! this module only defines the vocabulary.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an assessment record.
///
/// ```text
/// Draft → ForReview → Approved
///            ↓    ↘
///          Draft   ForRevision
/// ```
///
/// `Approved` requires all three approver decisions to be explicit
/// approvals; `ForRevision` requires all three reviewed with at least
/// one rejection. Neither is terminal; an edited record can be
/// resubmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    /// Being drafted; approvals are not yet meaningful.
    Draft,
    /// Submitted and awaiting the three approver decisions.
    ForReview,
    /// All three reviewed, at least one rejected.
    ForRevision,
    /// All three approved. Entry into this state triggers report
    /// generation exactly once.
    Approved,
}

impl AssessmentStatus {
    /// The canonical string name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::ForReview => "for_review",
            Self::ForRevision => "for_revision",
            Self::Approved => "approved",
        }
    }
}

impl std::fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The three independent approval roles on every assessment record.
///
/// Each role must be held by a distinct person, and all three must
/// belong to the record's company (enforced in `cca-state`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApproverRole {
    /// Owns the business process the solution supports.
    BusinessOwner,
    /// Owns the solution/system itself.
    SystemOwner,
    /// Reviews on behalf of risk management and compliance.
    ComplianceOfficer,
}

impl ApproverRole {
    /// All roles, in review-sheet order.
    pub fn all() -> &'static [ApproverRole] {
        &[
            Self::BusinessOwner,
            Self::SystemOwner,
            Self::ComplianceOfficer,
        ]
    }

    /// The canonical string name of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BusinessOwner => "business_owner",
            Self::SystemOwner => "system_owner",
            Self::ComplianceOfficer => "compliance_officer",
        }
    }

    /// Human-readable label as shown in approval messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BusinessOwner => "Business Owner",
            Self::SystemOwner => "System Owner",
            Self::ComplianceOfficer => "Compliance Officer",
        }
    }
}

impl std::fmt::Display for ApproverRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
