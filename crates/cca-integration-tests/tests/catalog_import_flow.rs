//! Catalog import → store swap → resolution, including the hosting
//! mapping across the SaaS-flag family.

use cca_catalog::import::{COMPLIANCE_BAND, REFERENCE_BAND};
use cca_catalog::CatalogStore;
use cca_core::{CriticalityRating, HostingType};
use cca_engine::{resolve_requirements, Rating, Summary};

const WIDTH: usize = 50;

fn header_rows() -> Vec<Vec<String>> {
    let mut categories = vec![String::new(); WIDTH];
    let mut names = vec![String::new(); WIDTH];

    for (idx, name) in [
        (0, "Category"),
        (1, "Control Requirement ID"),
        (2, "Control Statement"),
        (3, "Requirement Statement"),
        (4, "Organization"),
        (5, "Analytical Instruments"),
        (6, "SaaS Application"),
        (7, "PaaS"),
        (8, "IaaS Infrastructure"),
        (27, "Baseline"),
        (48, "Common Solution"),
        (49, "Test Guidance"),
    ] {
        names[idx] = name.to_string();
    }

    categories[COMPLIANCE_BAND.start] = "Regulatory".to_string();
    for (offset, idx) in COMPLIANCE_BAND.enumerate() {
        names[idx] = match offset {
            0 => "Non-GxP".to_string(),
            1 => "Minimal".to_string(),
            _ => format!("Tag {offset}"),
        };
    }
    categories[REFERENCE_BAND.start] = "Frameworks".to_string();
    for (offset, idx) in REFERENCE_BAND.enumerate() {
        names[idx] = format!("Policy {offset}");
    }

    vec![categories, names]
}

fn data_row(control_id: &str, saas: bool, on_prem: bool) -> Vec<String> {
    let mut row = vec![String::new(); WIDTH];
    row[0] = "Access Management".to_string();
    row[1] = control_id.to_string();
    row[2] = "Control".to_string();
    row[3] = "Requirement".to_string();
    if saas {
        row[6] = "x".to_string();
    }
    if on_prem {
        row[5] = "x".to_string();
    }
    row[COMPLIANCE_BAND.start] = "x".to_string(); // non-gxp tag
    row
}

fn non_impact_summary() -> Summary {
    Summary {
        non_gxp: true,
        non_sox: true,
        non_eres: true,
        no_privacy: true,
        ..Default::default()
    }
}

#[test]
fn imported_catalog_resolves_by_hosting_family() {
    let mut rows = header_rows();
    rows.push(data_row("CTRL_AM-001", true, false));
    rows.push(data_row("CTRL_AM-002", false, true));

    let store = CatalogStore::default();
    store.import(&rows).unwrap();
    let catalog = store.snapshot();

    let rating = Rating {
        rating: CriticalityRating::Minimal,
        comment: String::new(),
    };
    let summary = non_impact_summary();

    // The SaaS-flagged requirement is visible to the whole SaaS family.
    for hosting in [HostingType::Website, HostingType::ThirdParty, HostingType::Saas] {
        let resolved =
            resolve_requirements(&catalog, Some(hosting), &rating, &summary).unwrap();
        let ids: Vec<&str> = resolved.iter().map(|r| r.control_id.as_str()).collect();
        assert_eq!(ids, ["CTRL_AM-001"], "hosting {hosting}");
    }

    // On-premises maps onto the analytical-instruments flag.
    let resolved =
        resolve_requirements(&catalog, Some(HostingType::OnPremises), &rating, &summary).unwrap();
    let ids: Vec<&str> = resolved.iter().map(|r| r.control_id.as_str()).collect();
    assert_eq!(ids, ["CTRL_AM-002"]);

    // PaaS matches neither requirement.
    let resolved =
        resolve_requirements(&catalog, Some(HostingType::Paas), &rating, &summary).unwrap();
    assert!(resolved.is_empty());
}

#[test]
fn failed_import_preserves_the_serving_snapshot() {
    let mut rows = header_rows();
    rows.push(data_row("CTRL_AM-001", true, false));

    let store = CatalogStore::default();
    store.import(&rows).unwrap();
    assert_eq!(store.snapshot().requirements.len(), 1);

    // A malformed table (blank control id) fails the import atomically.
    let mut bad = header_rows();
    bad.push(data_row("", true, false));
    assert!(store.import(&bad).is_err());
    assert_eq!(store.snapshot().requirements.len(), 1);
}
