//! # Identity Newtypes
//!
//! Domain-primitive newtypes for identifiers throughout the CCA stack.
//! Each identifier is a distinct type: you cannot pass a [`UserId`]
//! where an [`AssessmentId`] is expected.
//!
//! ## Validation
//!
//! [`ControlId`] is validated to be non-empty at construction time and
//! at deserialization time. UUID-based identifiers ([`AssessmentId`],
//! [`UserId`], [`CompanyId`], [`CommentId`]) are always valid by
//! construction.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Implements the UUID-backed identifier boilerplate: random
/// construction, conversion from/to `Uuid`, `Default`, and `Display`.
macro_rules! uuid_identifier {
    ($(#[$doc:meta])* $ty:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $ty(Uuid);

        impl $ty {
            /// Create a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an identifier from an existing UUID.
            pub fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Access the underlying UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $ty {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_identifier! {
    /// A unique identifier for a Compliance Criticality Assessment record.
    AssessmentId
}

uuid_identifier! {
    /// A unique identifier for a user (drafter or approver).
    UserId
}

uuid_identifier! {
    /// A unique identifier for the company/organization that owns a record.
    CompanyId
}

uuid_identifier! {
    /// A unique identifier for a review comment.
    CommentId
}

// ---------------------------------------------------------------------------
// ControlId
// ---------------------------------------------------------------------------

/// A requirement control identifier from the catalog
/// (e.g., `"CTRL_AM-001"`).
///
/// Control identifiers order the resolved requirement set, so they sort
/// lexicographically. Validated to be non-empty; the embedded category
/// code between `_` and `-` is interpreted by the report layer, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ControlId(String);

impl ControlId {
    /// Create a control identifier from a string, validating non-emptiness.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidControlId`] if the string is
    /// empty or whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidControlId);
        }
        Ok(Self(trimmed))
    }

    /// Access the control identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ControlId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for ControlId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// PersonRef
// ---------------------------------------------------------------------------

/// A reference to a person as the state machine sees them: identity,
/// notification address, and organization membership.
///
/// The user directory itself is an external collaborator; records carry
/// these snapshots so approver-authorization and same-company checks can
/// run without a directory round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRef {
    /// The person's unique identifier.
    pub id: UserId,
    /// Notification email address.
    pub email: String,
    /// The company the person belongs to.
    pub company: CompanyId,
}

impl PersonRef {
    /// Create a person reference, validating the email shape.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidEmail`] if the address is empty
    /// or has no `@` separator.
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        company: CompanyId,
    ) -> Result<Self, ValidationError> {
        let email = email.into().trim().to_string();
        if email.is_empty() || !email.contains('@') {
            return Err(ValidationError::InvalidEmail(email));
        }
        Ok(Self { id, email, company })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assessment_id_unique() {
        let a = AssessmentId::new();
        let b = AssessmentId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn user_id_from_uuid_roundtrip() {
        let uuid = Uuid::new_v4();
        let id = UserId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn control_id_valid() {
        let cid = ControlId::new("CTRL_AM-001").unwrap();
        assert_eq!(cid.as_str(), "CTRL_AM-001");
    }

    #[test]
    fn control_id_trims_whitespace() {
        let cid = ControlId::new("  CTRL_AM-001  ").unwrap();
        assert_eq!(cid.as_str(), "CTRL_AM-001");
    }

    #[test]
    fn control_id_rejects_empty() {
        assert!(ControlId::new("").is_err());
        assert!(ControlId::new("   ").is_err());
    }

    #[test]
    fn control_id_orders_lexicographically() {
        let a = ControlId::new("CTRL_AM-001").unwrap();
        let b = ControlId::new("CTRL_AM-002").unwrap();
        let c = ControlId::new("CTRL_CM-001").unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn control_id_serde_rejects_empty() {
        let err = serde_json::from_str::<ControlId>("\"  \"");
        assert!(err.is_err());
    }

    #[test]
    fn control_id_serde_roundtrip() {
        let cid = ControlId::new("CTRL_DG-014").unwrap();
        let json = serde_json::to_string(&cid).unwrap();
        let back: ControlId = serde_json::from_str(&json).unwrap();
        assert_eq!(cid, back);
    }

    #[test]
    fn person_ref_valid() {
        let p = PersonRef::new(UserId::new(), "owner@example.com", CompanyId::new()).unwrap();
        assert_eq!(p.email, "owner@example.com");
    }

    #[test]
    fn person_ref_rejects_bad_email() {
        assert!(PersonRef::new(UserId::new(), "", CompanyId::new()).is_err());
        assert!(PersonRef::new(UserId::new(), "not-an-address", CompanyId::new()).is_err());
    }
}
