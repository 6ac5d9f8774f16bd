use std::sync::Arc;

use crate::analysis::ResumeAnalyzer;
use crate::catalog::CatalogStore;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<ResumeAnalyzer>,
    /// Current job catalog snapshot; swapped wholesale by the refresher.
    pub catalog: Arc<CatalogStore>,
    pub config: Config,
}
