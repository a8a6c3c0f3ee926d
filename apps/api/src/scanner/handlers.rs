//! Axum route handlers for the JD scanning API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::scanner::{correct, locate, ChangelogEntry, ParsedRequirement};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub jd_text: String,
    /// Judge claims as of this year instead of the server's clock.
    #[serde(default)]
    pub current_year: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub requirements: Vec<ParsedRequirement>,
    pub invalid_count: usize,
    pub current_year: i32,
}

#[derive(Debug, Serialize)]
pub struct CorrectResponse {
    pub requirements: Vec<ParsedRequirement>,
    pub corrected_text: String,
    pub changelog: Vec<ChangelogEntry>,
    pub current_year: i32,
}

impl ScanRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.jd_text.trim().is_empty() {
            return Err(AppError::Validation("jd_text cannot be empty".to_string()));
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jd/analyze
///
/// Finds every technology experience claim in a job description and flags
/// the ones longer than the technology has existed.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    request.validate()?;

    let current_year = request
        .current_year
        .unwrap_or_else(|| state.clock.current_year());
    let catalog = state.catalog.snapshot().await;
    let requirements = locate(&request.jd_text, &catalog, current_year);
    let invalid_count = requirements.iter().filter(|r| !r.is_valid).count();

    Ok(Json(AnalyzeResponse {
        requirements,
        invalid_count,
        current_year,
    }))
}

/// POST /api/v1/jd/correct
///
/// Analyzes the job description and rewrites impossible durations to the
/// maximum possible, returning the corrected text and a changelog.
pub async fn handle_correct(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<CorrectResponse>, AppError> {
    request.validate()?;

    let current_year = request
        .current_year
        .unwrap_or_else(|| state.clock.current_year());
    let catalog = state.catalog.snapshot().await;
    let requirements = locate(&request.jd_text, &catalog, current_year);
    let correction = correct(&request.jd_text, &requirements);

    Ok(Json(CorrectResponse {
        requirements,
        corrected_text: correction.corrected_text,
        changelog: correction.changelog,
        current_year,
    }))
}
