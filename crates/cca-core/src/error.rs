//! # Core Validation Errors
//!
//! Construction-time validation failures for the identifier newtypes.

use thiserror::Error;

/// Errors raised when constructing core domain primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A control identifier was empty or whitespace-only.
    #[error("control identifier must be a non-empty string")]
    InvalidControlId,

    /// An email address was empty or missing the `@` separator.
    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),
}
