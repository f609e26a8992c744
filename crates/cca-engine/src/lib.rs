//! # cca-engine — Derivation & Resolution Engine
//!
//! The deterministic core of the CCA stack:
//!
//! - [`summary::derive_summary`] reduces the six typed topic answer sets
//!   into the 24 categorical summary flags. Pure; identical inputs give
//!   identical summaries.
//! - [`rating::derive_rating`] applies the ordered precedence cascade to
//!   a summary and produces exactly one [`CriticalityRating`]; the
//!   enum makes any other cardinality unrepresentable.
//! - [`resolve::resolve_requirements`] filters the requirement catalog
//!   by hosting-type applicability and by baseline-for-rating or
//!   compliance-tag membership, deduplicated and ordered by control
//!   identifier.
//! - [`annotate::annotate_references`] projects the variable-width
//!   reference-policy columns onto a resolved requirement set.
//! - [`preview::preview`] derives summary and rating from a submission
//!   without persisting anything.
//!
//! All functions here are synchronous, side-effect-free, and safe to
//! call concurrently on shared inputs.

pub mod annotate;
pub mod preview;
pub mod rating;
pub mod resolve;
pub mod summary;

pub use annotate::{annotate_references, reference_cell, AnnotatedRow, PolicyColumn, ReferenceAnnotations};
pub use preview::preview;
pub use rating::{derive_rating, Rating};
pub use resolve::{rating_tag, resolve_requirements, selected_compliance_tags, ResolveError};
pub use summary::{derive_summary, Summary};

pub use cca_core::CriticalityRating;
