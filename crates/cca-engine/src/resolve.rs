//! # Requirement Resolution
//!
//! Filters the catalog down to the requirements applicable to one
//! assessment: first by hosting-type applicability, then by the union of
//! (baseline requirements carrying the rating's tag) and (requirements
//! carrying any summary-selected tag), deduplicated and ordered by
//! control identifier.

use std::collections::BTreeSet;

use thiserror::Error;

use cca_catalog::{Catalog, Requirement};
use cca_core::{CriticalityRating, HostingType};

use crate::rating::Rating;
use crate::summary::Summary;

// Compliance tag header names from the catalog source table.
const TAG_NON_GXP: &str = "non-gxp";
const TAG_GLP_GCP: &str = "glp__gcp";
const TAG_GPVP: &str = "gpvp";
const TAG_SOX: &str = "sox";
const TAG_GMP_INDIRECT: &str = "gmp-indirect";
const TAG_GMP_DIRECT: &str = "gmp-direct";
const TAG_ERES_IMPACT: &str = "impact";
const TAG_ERES_NO_IMPACT: &str = "no_impact";
const TAG_HIGH_PRIVACY: &str = "high_privacy";
const TAG_MEDIUM_PRIVACY: &str = "medium_privacy";
const TAG_LOW_PRIVACY: &str = "low_privacy";

/// Errors raised by requirement resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The assessment has no hosting type, so no applicability predicate
    /// exists. Resolution must not silently match everything or nothing.
    #[error("unsupported hosting type: the assessment has no hosting type configured")]
    UnsupportedHostingType,
}

/// The compliance tags selected by a summary.
///
/// Each summary flag maps to a fixed set of tag headers when true; two
/// rows also contribute a fallback tag when false (`gmp-direct` when the
/// solution is not GxP-indirect, `impact` when it is not non-ERES). The
/// GxP-indirect row selects both the indirect and direct tags together
/// (intentional over-inclusion). Privacy contributes the first matching
/// tag only; the three privacy flags are mutually exclusive by
/// construction.
pub fn selected_compliance_tags(summary: &Summary) -> BTreeSet<&'static str> {
    let mut tags = BTreeSet::new();

    if summary.non_gxp {
        tags.insert(TAG_NON_GXP);
    }
    if summary.glp {
        tags.insert(TAG_GLP_GCP);
    }
    if summary.gcp {
        tags.insert(TAG_GLP_GCP);
    }
    if summary.gvp {
        tags.insert(TAG_GPVP);
    }
    if summary.sox {
        tags.insert(TAG_SOX);
    }
    if summary.gxp_indirect {
        tags.insert(TAG_GMP_INDIRECT);
        tags.insert(TAG_GMP_DIRECT);
    } else {
        tags.insert(TAG_GMP_DIRECT);
    }
    if summary.non_eres {
        tags.insert(TAG_ERES_NO_IMPACT);
    } else {
        tags.insert(TAG_ERES_IMPACT);
    }

    // First matching privacy tag wins.
    if summary.high_privacy {
        tags.insert(TAG_HIGH_PRIVACY);
    } else if summary.medium_privacy {
        tags.insert(TAG_MEDIUM_PRIVACY);
    } else if summary.low_privacy {
        tags.insert(TAG_LOW_PRIVACY);
    }

    tags
}

/// The compliance tag matching a rating, if any. `NoComplianceRisk` has
/// no tag; baseline requirements contribute nothing for it.
pub fn rating_tag(rating: CriticalityRating) -> Option<&'static str> {
    match rating {
        CriticalityRating::Significant => Some("significant"),
        CriticalityRating::Moderate => Some("moderate"),
        CriticalityRating::Minimal => Some("minimal"),
        CriticalityRating::NoComplianceRisk => None,
    }
}

/// Resolve the applicable requirement set for one assessment.
///
/// Deterministic: a fixed catalog snapshot, hosting type, rating, and
/// summary always yield the same ordered set, sorted ascending by
/// control identifier with no duplicates.
///
/// # Errors
///
/// Returns [`ResolveError::UnsupportedHostingType`] when `hosting` is
/// `None`.
pub fn resolve_requirements<'a>(
    catalog: &'a Catalog,
    hosting: Option<HostingType>,
    rating: &Rating,
    summary: &Summary,
) -> Result<Vec<&'a Requirement>, ResolveError> {
    let hosting = hosting.ok_or(ResolveError::UnsupportedHostingType)?;
    let selected = selected_compliance_tags(summary);
    let rating_tag = rating_tag(rating.rating);

    let mut requirements: Vec<&Requirement> = catalog
        .requirements
        .iter()
        .filter(|req| req.applicability.matches(hosting))
        .filter(|req| {
            let baseline_hit = rating_tag.is_some_and(|tag| req.baseline && req.has_tag(tag));
            let tag_hit = req
                .compliance_tags
                .iter()
                .any(|tag| selected.contains(tag.as_str()));
            baseline_hit || tag_hit
        })
        .collect();

    requirements.sort_by(|a, b| a.control_id.cmp(&b.control_id));
    requirements.dedup_by(|a, b| a.control_id == b.control_id);

    tracing::debug!(
        hosting = %hosting,
        rating = %rating.rating,
        selected_tags = selected.len(),
        resolved = requirements.len(),
        "requirements resolved"
    );

    Ok(requirements)
}
