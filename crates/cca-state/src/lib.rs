//! # cca-state — Assessment Record & Approval Lifecycle
//!
//! The aggregate root of the CCA stack: one record holds ownership,
//! the solution profile, the six topic answer sets, and the derived
//! summary/rating, wrapped by the approval state machine
//! (`draft → for_review → approved / for_revision`).
//!
//! ## Concurrency
//!
//! Records are plain values. A persistence collaborator must serialize
//! mutations per record (row-level transaction or equivalent) so the
//! "all three reviewed" evaluation observes a consistent snapshot of
//! the three decisions; nothing in this crate shares mutable state.
//!
//! ## Report trigger
//!
//! Entering `Approved` from any other status yields a [`ReportTrigger`]
//! exactly once per entry. Re-evaluating an already-approved record
//! (e.g. after an unrelated edit) yields none.

pub mod machine;
pub mod record;

// Re-export primary types.
pub use machine::{ApprovalError, ReportTrigger};
pub use record::{
    ApprovalDecisions, ApproverAssignment, AssessmentRecord, Decision, NewAssessment,
    RecordFinding, RecordValidationError, ReviewComment, SolutionProfile,
};
