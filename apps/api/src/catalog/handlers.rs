//! Axum route handlers for the Technology API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::search::{search, SearchOutcome};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub count: usize,
}

/// GET /api/v1/technologies?q=
///
/// Lists technologies matching `q`. A query like "react 12" also returns a
/// quick verdict on whether 12 years of React is possible.
pub async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchOutcome>, AppError> {
    let catalog = state.catalog.snapshot().await;
    let outcome = search(&catalog, &params.q, state.clock.current_year());
    Ok(Json(outcome))
}

/// POST /api/v1/technologies/refresh
///
/// Reloads the catalog from its provider and swaps it in.
pub async fn handle_refresh(
    State(state): State<AppState>,
) -> Result<Json<RefreshResponse>, AppError> {
    let technologies = state.catalog_provider.load().await?;
    if technologies.is_empty() {
        return Err(AppError::Catalog(
            "refresh produced an empty catalog; keeping the current one".to_string(),
        ));
    }
    let count = state.catalog.replace(technologies).await;
    info!("Catalog refreshed: {count} technologies");
    Ok(Json(RefreshResponse { count }))
}
