use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::state::AppState;
use crate::submission::relay::TechnologySubmission;

/// POST /api/v1/technologies/submit
///
/// Forwards a proposed catalog entry to the catalog maintainers.
pub async fn handle_submit(
    State(state): State<AppState>,
    Json(submission): Json<TechnologySubmission>,
) -> Result<Json<Value>, AppError> {
    submission.validate()?;
    let relay = state.relay.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable("submissions are not enabled on this server".to_string())
    })?;
    relay.submit(&submission).await?;
    Ok(Json(json!({ "ok": true })))
}
