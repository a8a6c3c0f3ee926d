//! Catalog loader: pulls the category-partitioned technology lists and merges them.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::catalog::merge::merge_last_wins;
use crate::errors::AppError;
use crate::models::technology::Technology;

/// Category label and file name of every upstream list, in merge order.
pub const DEFAULT_SOURCES: &[(&str, &str)] = &[
    ("AI/ML", "ai-ml.json"),
    ("Backend", "backend.json"),
    ("Build Tools", "build-tools.json"),
    ("CSS", "css.json"),
    ("Database", "databases.json"),
    ("DevOps", "devops.json"),
    ("Frontend", "frontend.json"),
    ("Language", "languages.json"),
    ("Mobile", "mobile.json"),
    ("Package Manager", "package-managers.json"),
    ("Testing", "testing.json"),
    ("Web", "web.json"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSource {
    pub category: String,
    pub url: String,
}

/// Builds the default source list rooted at `base_url`.
pub fn default_sources(base_url: &str) -> Vec<CatalogSource> {
    let base = base_url.trim_end_matches('/');
    DEFAULT_SOURCES
        .iter()
        .map(|(category, file)| CatalogSource {
            category: category.to_string(),
            url: format!("{base}/{file}"),
        })
        .collect()
}

/// Record shape of the upstream JSON lists.
#[derive(Debug, Clone, Deserialize)]
pub struct ExternalTech {
    pub tool_name: String,
    pub year: i32,
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub link: String,
}

impl ExternalTech {
    pub fn into_technology(self, category: &str) -> Technology {
        let alias = Some(self.alias.trim().to_string()).filter(|a| !a.is_empty());
        Technology {
            category: category.to_string(),
            link: self.link,
            ..Technology::new(self.tool_name, self.year).with_aliases(alias)
        }
    }
}

/// Anything that can produce a flat, deduplicated catalog.
/// `AppState` holds an `Arc<dyn TechnologyProvider>` so tests can swap in a fixed list.
#[async_trait]
pub trait TechnologyProvider: Send + Sync {
    async fn load(&self) -> Result<Vec<Technology>, AppError>;
}

/// Fetches every configured source over HTTP.
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    sources: Vec<CatalogSource>,
}

impl CatalogClient {
    pub fn new(sources: Vec<CatalogSource>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, sources })
    }

    async fn fetch_source(&self, source: &CatalogSource) -> Result<Vec<Technology>, AppError> {
        let response = self.client.get(&source.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Catalog(format!(
                "{} returned {status}",
                source.url
            )));
        }
        let records: Vec<ExternalTech> = response.json().await?;
        Ok(records
            .into_iter()
            .map(|record| record.into_technology(&source.category))
            .collect())
    }
}

#[async_trait]
impl TechnologyProvider for CatalogClient {
    /// Failing sources are logged and contribute nothing; the rest still load.
    async fn load(&self) -> Result<Vec<Technology>, AppError> {
        let fetches = self.sources.iter().map(|source| self.fetch_source(source));
        let results = join_all(fetches).await;

        let mut batches = Vec::with_capacity(results.len());
        for (source, result) in self.sources.iter().zip(results) {
            match result {
                Ok(batch) => batches.push(batch),
                Err(e) => warn!("Failed to fetch {} from {}: {e}", source.category, source.url),
            }
        }

        let catalog = merge_last_wins(batches);
        info!(
            "Catalog loaded: {} technologies from {} sources",
            catalog.len(),
            self.sources.len()
        );
        Ok(catalog)
    }
}

/// Serves a fixed list. Used when the catalog is supplied in-process.
pub struct StaticProvider(pub Vec<Technology>);

#[async_trait]
impl TechnologyProvider for StaticProvider {
    async fn load(&self) -> Result<Vec<Technology>, AppError> {
        Ok(self.0.clone())
    }
}
