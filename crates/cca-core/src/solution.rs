//! # Solution Metadata Enumerations
//!
//! How a solution is hosted, what kind of solution it is, and how
//! configurable it is. Hosting type is the only one of the three that
//! influences requirement resolution; the other two are descriptive
//! metadata carried through to the generated reports.

use serde::{Deserialize, Serialize};

/// How the assessed solution is hosted and delivered.
///
/// Requirement resolution maps each hosting type onto one of the
/// catalog's applicability flags; see `cca-engine`. Several hosting
/// types intentionally share the SaaS applicability flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostingType {
    /// Hosted by a third party.
    ThirdParty,
    /// Hosted on-premises (including analytical instruments).
    OnPremises,
    /// Public website.
    Website,
    /// Software as a Service.
    Saas,
    /// Platform as a Service.
    Paas,
    /// Infrastructure as a Service.
    Iaas,
}

impl HostingType {
    /// All hosting types, in questionnaire order.
    pub fn all() -> &'static [HostingType] {
        &[
            Self::ThirdParty,
            Self::OnPremises,
            Self::Website,
            Self::Saas,
            Self::Paas,
            Self::Iaas,
        ]
    }

    /// The canonical string name of this hosting type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThirdParty => "third_party",
            Self::OnPremises => "on_premises",
            Self::Website => "website",
            Self::Saas => "saas",
            Self::Paas => "paas",
            Self::Iaas => "iaas",
        }
    }

    /// Human-readable label as shown on the questionnaire.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ThirdParty => "Third Party Hosting",
            Self::OnPremises => "On-Premises",
            Self::Website => "Website (Public)",
            Self::Saas => "Software As a Service (SaaS)",
            Self::Paas => "Platform As a Service (PaaS)",
            Self::Iaas => "Infrastructure As a Service (IaaS)",
        }
    }
}

impl std::fmt::Display for HostingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of solution being assessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolutionType {
    /// An application.
    Application,
    /// An infrastructure platform.
    Infrastructure,
    /// Middleware.
    Middleware,
    /// None of the above; requires a free-text description.
    Other,
}

impl SolutionType {
    /// The canonical string name of this solution type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Infrastructure => "infrastructure",
            Self::Middleware => "middleware",
            Self::Other => "other",
        }
    }

    /// Human-readable label as shown on the questionnaire.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Application => "Application",
            Self::Infrastructure => "Infrastructure Platform",
            Self::Middleware => "Middleware",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for SolutionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How configurable the assessed solution is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolutionClassification {
    /// Custom-built.
    Custom,
    /// Configurable off-the-shelf.
    Configurable,
    /// Non-configurable (out-of-the-box).
    NonConfigurable,
}

impl SolutionClassification {
    /// The canonical string name of this classification.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Custom => "custom",
            Self::Configurable => "configurable",
            Self::NonConfigurable => "non_configurable",
        }
    }

    /// Human-readable label as shown on the questionnaire.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Custom => "Custom",
            Self::Configurable => "Configurable",
            Self::NonConfigurable => "Non-configurable (out-of-the-box)",
        }
    }
}

impl std::fmt::Display for SolutionClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
