use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::technology::Technology;

/// In-memory catalog shared by all handlers.
///
/// Scans take a cheap `Arc` snapshot and never hold the lock while scanning;
/// a refresh swaps the whole list at once.
#[derive(Clone, Default)]
pub struct CatalogStore {
    inner: Arc<RwLock<Arc<Vec<Technology>>>>,
}

impl CatalogStore {
    pub fn new(technologies: Vec<Technology>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(technologies))),
        }
    }

    pub async fn snapshot(&self) -> Arc<Vec<Technology>> {
        self.inner.read().await.clone()
    }

    /// Replaces the catalog and returns the new size.
    pub async fn replace(&self, technologies: Vec<Technology>) -> usize {
        let count = technologies.len();
        *self.inner.write().await = Arc::new(technologies);
        count
    }
}
