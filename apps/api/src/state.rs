use std::sync::Arc;

use crate::catalog::{CatalogStore, TechnologyProvider};
use crate::scanner::YearClock;
use crate::submission::SubmissionRelay;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Merged technology catalog. Refreshed in place from `catalog_provider`.
    pub catalog: CatalogStore,
    pub catalog_provider: Arc<dyn TechnologyProvider>,
    /// Default "current year" when a request does not pin one.
    pub clock: Arc<dyn YearClock>,
    /// Present only when a GitHub token is configured.
    pub relay: Option<SubmissionRelay>,
}
