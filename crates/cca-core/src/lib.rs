//! # cca-core — Domain Primitives
//!
//! Core vocabulary for the Compliance Criticality Assessment stack:
//! identifier newtypes, the hosting/solution enumerations used by
//! requirement resolution, approver roles, the assessment lifecycle
//! status, and the four-level criticality rating scale.
//!
//! Every other crate in the workspace depends on this one. No business
//! rules live here; derivation, resolution, and lifecycle logic belong
//! to `cca-engine` and `cca-state`.

pub mod error;
pub mod identity;
pub mod lifecycle;
pub mod rating;
pub mod solution;

// Re-export primary types.
pub use error::ValidationError;
pub use identity::{AssessmentId, CommentId, CompanyId, ControlId, PersonRef, UserId};
pub use lifecycle::{ApproverRole, AssessmentStatus};
pub use rating::CriticalityRating;
pub use solution::{HostingType, SolutionClassification, SolutionType};
