//! # Positional Source-Table Import
//!
//! Builds a [`Catalog`] from an already-parsed cell grid with the fixed
//! source layout: two header rows (band categories above, column names
//! below), a compliance-tag column band, a reference-policy column band,
//! and named columns for the requirement fields. The column-to-entity
//! mapping is positional for the bands, a known constraint of the
//! source format; the band ranges below are the single source of truth
//! for the layout.
//!
//! The import is atomic: it either produces a complete catalog or fails
//! without side effects (`CatalogStore::import` keeps the previous
//! snapshot on failure).

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;

use thiserror::Error;

use cca_core::ControlId;

use crate::types::{Catalog, Compliance, ReferenceEntry, ReferencePolicy, Requirement};

/// Columns holding the compliance-tag band (18 tags).
pub const COMPLIANCE_BAND: Range<usize> = 9..27;

/// Columns holding the reference-policy band (20 policies).
pub const REFERENCE_BAND: Range<usize> = 28..48;

/// Number of header rows before the data rows.
const HEADER_ROWS: usize = 2;

/// Errors raised by the source-table import.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// Fewer than the two required header rows.
    #[error("source table is empty: expected two header rows")]
    EmptyTable,

    /// A row is narrower than the fixed band layout requires.
    #[error("row {row} has {len} columns, expected at least {expected}")]
    RowTooShort {
        /// Zero-based row index.
        row: usize,
        /// Actual cell count.
        len: usize,
        /// Minimum cell count the layout requires.
        expected: usize,
    },

    /// A required named column is missing from the header row.
    #[error("required column {name:?} not found in the header row")]
    MissingColumn {
        /// The normalized column name that was looked up.
        name: &'static str,
    },

    /// A band column has an empty header cell.
    #[error("column {column} in the {band} band has an empty header")]
    MissingHeader {
        /// Zero-based column index.
        column: usize,
        /// Which band the column belongs to.
        band: &'static str,
    },

    /// The first band column carries no category to inherit.
    #[error("column {column} in the {band} band has no category")]
    MissingCategory {
        /// Zero-based column index.
        column: usize,
        /// Which band the column belongs to.
        band: &'static str,
    },

    /// A data row has an empty control identifier.
    #[error("row {row}: invalid control identifier")]
    InvalidControlId {
        /// Zero-based row index.
        row: usize,
    },
}

/// Normalize a header cell into a lookup key: trim, lowercase, spaces
/// and slashes to underscores.
pub fn format_header(raw: &str) -> String {
    raw.trim().replace([' ', '/'], "_").to_lowercase()
}

fn is_marked(cell: &str) -> bool {
    cell.trim() == "x"
}

/// Import a parsed source table into a fresh catalog.
///
/// # Errors
///
/// Returns an [`ImportError`] on any layout violation; no partial
/// catalog is ever produced.
pub fn import_source_table(rows: &[Vec<String>]) -> Result<Catalog, ImportError> {
    if rows.len() < HEADER_ROWS {
        return Err(ImportError::EmptyTable);
    }
    let min_width = REFERENCE_BAND.end;
    for (row, cells) in rows.iter().enumerate() {
        if cells.len() < min_width {
            return Err(ImportError::RowTooShort {
                row,
                len: cells.len(),
                expected: min_width,
            });
        }
    }

    let band_categories = &rows[0];
    let headers = &rows[1];
    let normalized: Vec<String> = headers.iter().map(|h| format_header(h)).collect();
    let column = |name: &'static str| -> Result<usize, ImportError> {
        normalized
            .iter()
            .position(|h| h == name)
            .ok_or(ImportError::MissingColumn { name })
    };

    let category_col = column("category")?;
    let control_id_col = column("control_requirement_id")?;
    let control_statement_col = column("control_statement")?;
    let requirement_statement_col = column("requirement_statement")?;
    let organization_col = column("organization")?;
    let analytical_col = column("analytical_instruments")?;
    let saas_col = column("saas_application")?;
    let paas_col = column("paas")?;
    let iaas_col = column("iaas_infrastructure")?;
    let baseline_col = column("baseline")?;
    let common_solution_col = column("common_solution")?;
    let test_guidance_col = column("test_guidance")?;

    let compliances = read_band(
        band_categories,
        headers,
        COMPLIANCE_BAND,
        "compliance",
        |name, header_name, category| Compliance {
            name,
            header_name,
            category,
            reference_policies: BTreeSet::new(),
        },
    )?;
    let reference_policies = read_band(
        band_categories,
        headers,
        REFERENCE_BAND,
        "reference",
        |name, header_name, category| ReferencePolicy {
            name,
            header_name,
            category,
        },
    )?;

    let mut by_control: BTreeMap<ControlId, Requirement> = BTreeMap::new();
    for (row_idx, cells) in rows.iter().enumerate().skip(HEADER_ROWS) {
        let control_id = ControlId::new(&cells[control_id_col])
            .map_err(|_| ImportError::InvalidControlId { row: row_idx })?;

        let mut requirement = Requirement::new(control_id.clone());
        requirement.category = cells[category_col].trim().to_string();
        requirement.control_statement = cells[control_statement_col].trim().to_string();
        requirement.requirement_statement = cells[requirement_statement_col].trim().to_string();
        requirement.test_guidance = cells[test_guidance_col].trim().to_string();
        requirement.common_solution = cells[common_solution_col].trim().to_string();
        requirement.applicability.organization = is_marked(&cells[organization_col]);
        requirement.applicability.analytical_instruments = is_marked(&cells[analytical_col]);
        requirement.applicability.saas_application = is_marked(&cells[saas_col]);
        requirement.applicability.paas = is_marked(&cells[paas_col]);
        requirement.applicability.iaas_infrastructure = is_marked(&cells[iaas_col]);
        requirement.baseline = is_marked(&cells[baseline_col]);

        // Tag membership: any non-empty cell under a compliance column.
        for idx in COMPLIANCE_BAND {
            if !cells[idx].trim().is_empty() {
                requirement
                    .compliance_tags
                    .insert(compliances[idx - COMPLIANCE_BAND.start].header_name.clone());
            }
        }

        // Citations: newline-separated identifiers under policy columns.
        for idx in REFERENCE_BAND {
            let policy = &reference_policies[idx - REFERENCE_BAND.start].header_name;
            for line in cells[idx].lines() {
                let identifier = line.trim();
                if !identifier.is_empty() {
                    requirement.references.push(ReferenceEntry {
                        identifier: identifier.to_string(),
                        policy: policy.clone(),
                    });
                }
            }
        }
        requirement.references.sort();
        requirement.references.dedup();

        // Duplicate control ids: last row wins, matching the
        // get-or-create-then-overwrite behavior of the source process.
        by_control.insert(control_id, requirement);
    }

    tracing::debug!(
        requirements = by_control.len(),
        compliances = compliances.len(),
        reference_policies = reference_policies.len(),
        "source table imported"
    );

    Ok(Catalog {
        requirements: by_control.into_values().collect(),
        compliances,
        reference_policies,
    })
}

/// Read one header band, carrying the category forward across columns
/// with an empty category cell.
fn read_band<T>(
    band_categories: &[String],
    headers: &[String],
    band: Range<usize>,
    band_name: &'static str,
    build: impl Fn(String, String, String) -> T,
) -> Result<Vec<T>, ImportError> {
    let mut entries = Vec::new();
    let mut current_category: Option<String> = None;
    for idx in band {
        let category_cell = band_categories[idx].trim();
        if !category_cell.is_empty() {
            current_category = Some(category_cell.to_string());
        }
        let Some(category) = current_category.clone() else {
            return Err(ImportError::MissingCategory {
                column: idx,
                band: band_name,
            });
        };
        let name = headers[idx].trim();
        if name.is_empty() {
            return Err(ImportError::MissingHeader {
                column: idx,
                band: band_name,
            });
        }
        entries.push(build(name.to_string(), format_header(name), category));
    }
    Ok(entries)
}
