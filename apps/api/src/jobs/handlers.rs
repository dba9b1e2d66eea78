use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::jobs::service;
use crate::models::job::{JobDraft, JobQuery, JobRow, JobUpdate};
use crate::state::AppState;

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(draft): Json<JobDraft>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    let row = service::create_job(state.store.as_ref(), &draft).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobQuery>,
) -> Result<Json<Vec<JobRow>>, AppError> {
    let rows = service::list_jobs(state.store.as_ref(), &query).await?;
    Ok(Json(rows))
}

/// PATCH /api/v1/jobs/:id
pub async fn handle_update_job(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<JobUpdate>,
) -> Result<Json<JobRow>, AppError> {
    let row = service::update_job(state.store.as_ref(), id, &update).await?;
    Ok(Json(row))
}
