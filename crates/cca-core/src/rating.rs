//! # Criticality Rating Scale
//!
//! The four mutually exclusive criticality ratings. Representing the
//! rating as an enum (rather than four booleans) makes the
//! "exactly one rating" invariant impossible to violate; the
//! derivation cascade in `cca-engine` returns one variant, total over
//! all summary inputs.

use serde::{Deserialize, Serialize};

/// The overall compliance criticality of a solution.
///
/// Ordered from most to least critical. The derivation cascade checks
/// `NoComplianceRisk` first (strict all-of conditions), then
/// `Significant`, `Moderate`, `Minimal`, and falls back to
/// `NoComplianceRisk` when nothing matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriticalityRating {
    /// GxP-direct impact or SECRET data classification.
    Significant,
    /// GxP-indirect, SOX, high/medium privacy, INTERNAL or RESTRICTED
    /// data, or high business impact.
    Moderate,
    /// Non-GxP, low privacy, non-SOX, PUBLIC data, or medium business
    /// impact.
    Minimal,
    /// No compliance risk; requires justification in the rating comment.
    NoComplianceRisk,
}

impl CriticalityRating {
    /// All ratings, in cascade-precedence order for display.
    pub fn all() -> &'static [CriticalityRating] {
        &[
            Self::Significant,
            Self::Moderate,
            Self::Minimal,
            Self::NoComplianceRisk,
        ]
    }

    /// The canonical string name of this rating.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Significant => "significant",
            Self::Moderate => "moderate",
            Self::Minimal => "minimal",
            Self::NoComplianceRisk => "no_compliance_risk",
        }
    }

    /// Human-readable label as shown on the rating sheet.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Significant => "Significant",
            Self::Moderate => "Moderate",
            Self::Minimal => "Minimal",
            Self::NoComplianceRisk => "No Compliance Risk",
        }
    }
}

impl std::fmt::Display for CriticalityRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_serde_uses_snake_case() {
        let json = serde_json::to_string(&CriticalityRating::NoComplianceRisk).unwrap();
        assert_eq!(json, "\"no_compliance_risk\"");
        let back: CriticalityRating = serde_json::from_str("\"significant\"").unwrap();
        assert_eq!(back, CriticalityRating::Significant);
    }

    #[test]
    fn rating_all_covers_four_variants() {
        assert_eq!(CriticalityRating::all().len(), 4);
    }

    #[test]
    fn rating_display_matches_as_str() {
        for rating in CriticalityRating::all() {
            assert_eq!(format!("{rating}"), rating.as_str());
        }
    }
}
