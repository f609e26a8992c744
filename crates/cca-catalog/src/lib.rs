//! # cca-catalog — Requirement Catalog
//!
//! The read-mostly reference catalog that requirement resolution draws
//! from: control requirements with applicability flags and baseline
//! markers, compliance tags grouping them, and reference policies whose
//! citation identifiers annotate the generated worksheets.
//!
//! ## Shape
//!
//! - [`Catalog`] is an immutable snapshot with lookup helpers. The
//!   resolution engine only reads it.
//! - [`CatalogStore`] wraps the current snapshot behind a
//!   `parking_lot::RwLock<Arc<_>>`, so concurrent resolutions share one
//!   snapshot while an import swaps in a new one atomically.
//! - [`import::import_source_table`] builds a snapshot from a
//!   positionally-laid-out cell grid (the parsed source spreadsheet).
//!   The column layout is positional, not named, a known constraint
//!   documented at the band constants.

pub mod import;
pub mod store;
pub mod types;

// Re-export primary types.
pub use import::{import_source_table, ImportError};
pub use store::CatalogStore;
pub use types::{Applicability, Catalog, Compliance, ReferenceEntry, ReferencePolicy, Requirement};
