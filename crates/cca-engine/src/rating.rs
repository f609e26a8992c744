//! # Rating Derivation
//!
//! Maps a derived [`Summary`] onto exactly one [`CriticalityRating`]
//! through an ordered precedence cascade; the first matching branch wins.
//! Totality comes from the trailing catch-all; exclusivity comes from
//! the return type.

use serde::{Deserialize, Serialize};

use cca_core::CriticalityRating;

use crate::summary::Summary;

/// The derived criticality rating plus the reviewer's justification
/// comment. The comment is user text; derivation never touches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// The single active rating.
    pub rating: CriticalityRating,
    /// Free-text justification, expected when the rating is
    /// `NoComplianceRisk`.
    #[serde(default)]
    pub comment: String,
}

impl Rating {
    /// The rating sheet's flag view: `(key, selected)` for each of the
    /// four flags, in sheet order. Exactly one entry is true.
    pub fn flags(&self) -> [(&'static str, bool); 4] {
        [
            (
                "rating_significant",
                self.rating == CriticalityRating::Significant,
            ),
            ("rating_moderate", self.rating == CriticalityRating::Moderate),
            ("rating_minimal", self.rating == CriticalityRating::Minimal),
            (
                "rating_no_compliance_risk",
                self.rating == CriticalityRating::NoComplianceRisk,
            ),
        ]
    }

    /// Serialize to the rating sheet's boundary map: the four flags plus
    /// `rating_comment`.
    pub fn to_flags_value(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (key, selected) in self.flags() {
            map.insert(key.to_string(), serde_json::Value::Bool(selected));
        }
        map.insert(
            "rating_comment".to_string(),
            serde_json::Value::String(self.comment.clone()),
        );
        serde_json::Value::Object(map)
    }
}

/// Derive the criticality rating from a summary.
///
/// Evaluated as an ordered cascade; the first matching branch wins.
pub fn derive_rating(summary: &Summary) -> Rating {
    Rating {
        rating: classify(summary),
        comment: String::new(),
    }
}

fn classify(summary: &Summary) -> CriticalityRating {
    if summary.non_gxp
        && summary.no_privacy
        && summary.non_sox
        && (summary.business_impact_low || summary.no_business_impact())
        && summary.no_data_classification()
    {
        CriticalityRating::NoComplianceRisk
    } else if summary.gmp
        || summary.gcp
        || summary.glp
        || summary.gvp
        || summary.data_classification_secret
    {
        CriticalityRating::Significant
    } else if summary.gxp_indirect
        || summary.sox
        || summary.high_privacy
        || summary.medium_privacy
        || summary.data_classification_internal
        || summary.data_classification_restricted
        || summary.business_impact_high
    {
        CriticalityRating::Moderate
    } else if summary.non_gxp
        || summary.low_privacy
        || summary.non_sox
        || summary.data_classification_public
        || summary.business_impact_medium
    {
        CriticalityRating::Minimal
    } else {
        // Nothing matched. The rating sheet defines stricter conditions
        // for "no compliance risk" (non-GxP AND no privacy AND non-SOX
        // AND low business impact); the cascade keeps it as the
        // fallback so the rating stays total.
        CriticalityRating::NoComplianceRisk
    }
}
