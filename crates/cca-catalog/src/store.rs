//! # Catalog Store
//!
//! The process-wide handle to the current catalog snapshot. Readers
//! clone an `Arc` and keep resolving against a consistent snapshot even
//! while an import swaps in a replacement.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::import::{import_source_table, ImportError};
use crate::types::Catalog;

/// Shared, swap-on-import catalog handle.
#[derive(Debug, Default)]
pub struct CatalogStore {
    inner: RwLock<Arc<Catalog>>,
}

impl CatalogStore {
    /// Create a store holding the given snapshot.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            inner: RwLock::new(Arc::new(catalog)),
        }
    }

    /// The current snapshot. Cheap; holds no lock after returning.
    pub fn snapshot(&self) -> Arc<Catalog> {
        self.inner.read().clone()
    }

    /// Atomically replace the current snapshot.
    pub fn replace(&self, catalog: Catalog) {
        tracing::info!(
            requirements = catalog.requirements.len(),
            compliances = catalog.compliances.len(),
            reference_policies = catalog.reference_policies.len(),
            "catalog snapshot replaced"
        );
        *self.inner.write() = Arc::new(catalog);
    }

    /// Import a source table and swap it in. The previous snapshot stays
    /// in place when the import fails.
    ///
    /// # Errors
    ///
    /// Returns the [`ImportError`] from [`import_source_table`].
    pub fn import(&self, rows: &[Vec<String>]) -> Result<(), ImportError> {
        let catalog = import_source_table(rows)?;
        self.replace(catalog);
        Ok(())
    }
}
