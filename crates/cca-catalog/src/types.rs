//! # Catalog Entities
//!
//! Requirements, compliance tags, and reference policies. Entities are
//! plain values; the catalog is seeded by the import (or a test
//! fixture) and treated as immutable during resolution.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use cca_core::{ControlId, HostingType};

// ---------------------------------------------------------------------------
// Applicability
// ---------------------------------------------------------------------------

/// Which solution shapes a requirement applies to.
///
/// A requirement may carry several flags. Hosting types map onto these
/// flags during resolution: on-premises → `analytical_instruments`;
/// third-party, website, and SaaS → `saas_application`; PaaS and IaaS →
/// their own flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicability {
    /// Organizational process requirement (not tied to a solution shape).
    pub organization: bool,
    /// On-premises / analytical instrument deployments.
    pub analytical_instruments: bool,
    /// SaaS-delivered applications (also websites and third-party hosting).
    pub saas_application: bool,
    /// Platform-as-a-Service deployments.
    pub paas: bool,
    /// Infrastructure-as-a-Service deployments.
    pub iaas_infrastructure: bool,
}

impl Applicability {
    /// Whether a requirement with this applicability matches the given
    /// hosting type.
    pub fn matches(&self, hosting: HostingType) -> bool {
        match hosting {
            HostingType::OnPremises => self.analytical_instruments,
            HostingType::ThirdParty | HostingType::Website | HostingType::Saas => {
                self.saas_application
            }
            HostingType::Paas => self.paas,
            HostingType::Iaas => self.iaas_infrastructure,
        }
    }
}

// ---------------------------------------------------------------------------
// Requirement
// ---------------------------------------------------------------------------

/// One citation identifier a requirement carries under a reference
/// policy (e.g., `AC-2` under NIST SP800-53 R5).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// The citation identifier.
    pub identifier: String,
    /// Normalized header name of the policy the citation belongs to.
    pub policy: String,
}

/// A control requirement from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// The control identifier; orders the resolved set.
    pub control_id: ControlId,
    /// Requirement category name (import column, informational).
    pub category: String,
    /// The control statement.
    pub control_statement: String,
    /// The requirement statement shown on the worksheet.
    pub requirement_statement: String,
    /// Guidance for testing the control.
    pub test_guidance: String,
    /// Which solution shapes this requirement applies to.
    pub applicability: Applicability,
    /// Baseline requirements are included for their rating's tag even
    /// without explicit tag selection.
    pub baseline: bool,
    /// Common-solution note shown on the worksheets.
    pub common_solution: String,
    /// Normalized header names of the compliance tags this requirement
    /// carries.
    pub compliance_tags: BTreeSet<String>,
    /// Citations under reference policies.
    pub references: Vec<ReferenceEntry>,
}

impl Requirement {
    /// Create an empty requirement with the given control identifier.
    pub fn new(control_id: ControlId) -> Self {
        Self {
            control_id,
            category: String::new(),
            control_statement: String::new(),
            requirement_statement: String::new(),
            test_guidance: String::new(),
            applicability: Applicability::default(),
            baseline: false,
            common_solution: String::new(),
            compliance_tags: BTreeSet::new(),
            references: Vec::new(),
        }
    }

    /// Whether this requirement carries the given compliance tag.
    pub fn has_tag(&self, header_name: &str) -> bool {
        self.compliance_tags.contains(header_name)
    }

    /// The deduplicated, sorted citation identifiers this requirement
    /// carries under the given policy.
    pub fn references_under(&self, policy_header: &str) -> BTreeSet<&str> {
        self.references
            .iter()
            .filter(|r| r.policy == policy_header)
            .map(|r| r.identifier.as_str())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Compliance & ReferencePolicy
// ---------------------------------------------------------------------------

/// A named compliance tag grouping requirements (e.g., "SOX",
/// "High Privacy", "Minimal").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compliance {
    /// Display name from the source table.
    pub name: String,
    /// Normalized lookup key (e.g., `high_privacy`).
    pub header_name: String,
    /// Compliance category name from the source table.
    pub category: String,
    /// Header names of the reference policies surfaced for this tag.
    pub reference_policies: BTreeSet<String>,
}

/// A reference policy whose citations may annotate the worksheets
/// (e.g., "NIST SP800-53 R5").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencePolicy {
    /// Display name, used as the worksheet column title.
    pub name: String,
    /// Normalized lookup key (e.g., `nist_sp800-53_r5`).
    pub header_name: String,
    /// Reference category name from the source table.
    pub category: String,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// An immutable catalog snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// All requirements, sorted by control identifier.
    pub requirements: Vec<Requirement>,
    /// All compliance tags, in source-table order.
    pub compliances: Vec<Compliance>,
    /// All reference policies, in source-table order.
    pub reference_policies: Vec<ReferencePolicy>,
}

impl Catalog {
    /// Look up a compliance tag by its normalized header name.
    pub fn compliance(&self, header_name: &str) -> Option<&Compliance> {
        self.compliances.iter().find(|c| c.header_name == header_name)
    }

    /// Look up a reference policy by its normalized header name.
    pub fn policy(&self, header_name: &str) -> Option<&ReferencePolicy> {
        self.reference_policies
            .iter()
            .find(|p| p.header_name == header_name)
    }

    /// The reference policies linked to any of the given compliance
    /// tags, deduplicated, in catalog policy order.
    pub fn policies_linked_to(&self, compliance_headers: &[&str]) -> Vec<&ReferencePolicy> {
        let linked: BTreeSet<&str> = self
            .compliances
            .iter()
            .filter(|c| compliance_headers.contains(&c.header_name.as_str()))
            .flat_map(|c| c.reference_policies.iter().map(String::as_str))
            .collect();
        self.reference_policies
            .iter()
            .filter(|p| linked.contains(p.header_name.as_str()))
            .collect()
    }

    /// Link a reference policy to a compliance tag, creating the
    /// association used by reference annotation. No-op when the tag is
    /// unknown.
    pub fn link_reference_policy(&mut self, compliance_header: &str, policy_header: &str) {
        if let Some(compliance) = self
            .compliances
            .iter_mut()
            .find(|c| c.header_name == compliance_header)
        {
            compliance
                .reference_policies
                .insert(policy_header.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requirement(control_id: &str) -> Requirement {
        Requirement::new(ControlId::new(control_id).unwrap())
    }

    #[test]
    fn applicability_maps_hosting_types() {
        let saas_only = Applicability {
            saas_application: true,
            ..Default::default()
        };
        assert!(saas_only.matches(HostingType::Saas));
        assert!(saas_only.matches(HostingType::Website));
        assert!(saas_only.matches(HostingType::ThirdParty));
        assert!(!saas_only.matches(HostingType::OnPremises));
        assert!(!saas_only.matches(HostingType::Paas));
        assert!(!saas_only.matches(HostingType::Iaas));

        let on_prem = Applicability {
            analytical_instruments: true,
            ..Default::default()
        };
        assert!(on_prem.matches(HostingType::OnPremises));
        assert!(!on_prem.matches(HostingType::Saas));
    }

    #[test]
    fn references_under_dedupes_and_sorts() {
        let mut req = requirement("CTRL_AM-001");
        for (identifier, policy) in [
            ("AC-2", "nist_sp800-53_r5"),
            ("AC-1", "nist_sp800-53_r5"),
            ("AC-2", "nist_sp800-53_r5"),
            ("IAM-02", "cloud_controls_matrix_v_4.0"),
        ] {
            req.references.push(ReferenceEntry {
                identifier: identifier.into(),
                policy: policy.into(),
            });
        }
        let nist: Vec<&str> = req.references_under("nist_sp800-53_r5").into_iter().collect();
        assert_eq!(nist, ["AC-1", "AC-2"]);
        assert!(req.references_under("unknown_policy").is_empty());
    }

    #[test]
    fn policies_linked_to_follows_catalog_order() {
        let mut catalog = Catalog {
            compliances: vec![
                Compliance {
                    name: "High Privacy".into(),
                    header_name: "high_privacy".into(),
                    category: "Privacy".into(),
                    reference_policies: BTreeSet::new(),
                },
                Compliance {
                    name: "Medium Privacy".into(),
                    header_name: "medium_privacy".into(),
                    category: "Privacy".into(),
                    reference_policies: BTreeSet::new(),
                },
            ],
            reference_policies: vec![
                ReferencePolicy {
                    name: "GDPR Articles".into(),
                    header_name: "gdpr_articles".into(),
                    category: "Privacy".into(),
                },
                ReferencePolicy {
                    name: "Privacy Shield".into(),
                    header_name: "privacy_shield".into(),
                    category: "Privacy".into(),
                },
            ],
            ..Default::default()
        };
        catalog.link_reference_policy("high_privacy", "privacy_shield");
        catalog.link_reference_policy("medium_privacy", "gdpr_articles");
        catalog.link_reference_policy("medium_privacy", "privacy_shield");

        let linked = catalog.policies_linked_to(&["high_privacy", "medium_privacy"]);
        let names: Vec<&str> = linked.iter().map(|p| p.header_name.as_str()).collect();
        // Catalog order, deduplicated.
        assert_eq!(names, ["gdpr_articles", "privacy_shield"]);
    }

    #[test]
    fn link_reference_policy_unknown_tag_is_noop() {
        let mut catalog = Catalog::default();
        catalog.link_reference_policy("missing", "policy");
        assert!(catalog.compliances.is_empty());
    }
}
