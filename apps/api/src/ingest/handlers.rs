use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::ingest::candidates::import_candidates;
use crate::ingest::jobs::import_jobs;
use crate::ingest::report::IngestReport;
use crate::state::AppState;

/// POST /api/v1/jobs/import
/// Body is the raw CSV text.
pub async fn handle_import_jobs(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<IngestReport>, AppError> {
    let report = import_jobs(state.store.as_ref(), &body).await?;
    Ok(Json(report))
}

/// POST /api/v1/candidates/import
pub async fn handle_import_candidates(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<IngestReport>, AppError> {
    let report = import_candidates(
        state.store.as_ref(),
        &body,
        &state.config.application_id_prefix,
    )
    .await?;
    Ok(Json(report))
}
