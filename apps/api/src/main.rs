mod catalog;
mod config;
mod errors;
mod models;
mod routes;
mod scanner;
mod state;
mod submission;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::{default_sources, CatalogClient, CatalogStore, StaticProvider, TechnologyProvider};
use crate::config::Config;
use crate::models::technology::Technology;
use crate::routes::build_router;
use crate::scanner::{FixedYearClock, SystemYearClock, YearClock};
use crate::state::AppState;
use crate::submission::SubmissionRelay;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Release Check API v{}", env!("CARGO_PKG_VERSION"));

    let timeout = Duration::from_secs(config.http_timeout_secs);

    // Catalog: a local file when configured, otherwise the upstream category lists
    let catalog_provider: Arc<dyn TechnologyProvider> = match &config.catalog_file {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read CATALOG_FILE '{path}'"))?;
            let technologies: Vec<Technology> = serde_json::from_str(&raw)
                .with_context(|| format!("CATALOG_FILE '{path}' is not a technology list"))?;
            info!("Using local catalog file {path}");
            Arc::new(StaticProvider(technologies))
        }
        None => Arc::new(CatalogClient::new(
            default_sources(&config.catalog_base_url),
            timeout,
        )?),
    };

    let technologies = catalog_provider.load().await?;
    if technologies.is_empty() {
        warn!("Catalog is empty; scans will find nothing until a refresh succeeds");
    }
    let catalog = CatalogStore::new(technologies);

    let clock: Arc<dyn YearClock> = match config.current_year {
        Some(year) => {
            info!("Current year pinned to {year}");
            Arc::new(FixedYearClock(year))
        }
        None => Arc::new(SystemYearClock),
    };

    let relay = match &config.github_token {
        Some(token) => {
            info!("Submission relay enabled for {}", config.submission_repo);
            Some(SubmissionRelay::new(
                token.clone(),
                &config.submission_repo,
                timeout,
            )?)
        }
        None => {
            info!("GITHUB_TOKEN not set; submission relay disabled");
            None
        }
    };

    let state = AppState {
        catalog,
        catalog_provider,
        clock,
        relay,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
