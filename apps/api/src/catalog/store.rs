use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use anyhow::{Context, Result};
use tracing::info;

use crate::catalog::models::JobCatalog;

/// Holds the current catalog snapshot behind a single swappable reference.
///
/// Readers clone the `Arc` and keep a consistent snapshot for as long as they
/// need it; `replace` swaps the whole snapshot, never mutating one in place.
pub struct CatalogStore {
    current: RwLock<Arc<JobCatalog>>,
}

impl CatalogStore {
    pub fn new(catalog: JobCatalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// Loads the static catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job catalog '{}'", path.display()))?;
        let catalog = JobCatalog::from_json(&json)
            .with_context(|| format!("Failed to parse job catalog '{}'", path.display()))?;

        info!(
            "Loaded job catalog from {} ({} postings)",
            path.display(),
            catalog.posting_count()
        );
        Ok(Self::new(catalog))
    }

    pub fn snapshot(&self) -> Arc<JobCatalog> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn replace(&self, catalog: JobCatalog) {
        let next = Arc::new(catalog);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = next;
    }
}
