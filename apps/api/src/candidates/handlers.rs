use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::candidates::grouping::GroupedCandidate;
use crate::candidates::service;
use crate::errors::AppError;
use crate::models::application::{
    ApplicationQuery, ApplicationRow, ApplicationUpdate, CandidateDraft,
};
use crate::models::user::UserRoleRow;
use crate::state::AppState;

/// POST /api/v1/candidates
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    Json(draft): Json<CandidateDraft>,
) -> Result<(StatusCode, Json<ApplicationRow>), AppError> {
    let row = service::create_application(
        state.store.as_ref(),
        &draft,
        &state.config.application_id_prefix,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    Query(query): Query<ApplicationQuery>,
) -> Result<Json<Vec<ApplicationRow>>, AppError> {
    let rows = service::list_applications(state.store.as_ref(), &query).await?;
    Ok(Json(rows))
}

/// PATCH /api/v1/candidates/:id
pub async fn handle_update_candidate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<ApplicationUpdate>,
) -> Result<Json<ApplicationRow>, AppError> {
    let row = service::update_application(state.store.as_ref(), id, &update).await?;
    Ok(Json(row))
}

/// GET /api/v1/candidates/grouped
pub async fn handle_grouped_candidates(
    State(state): State<AppState>,
) -> Result<Json<Vec<GroupedCandidate>>, AppError> {
    let groups = service::list_grouped(state.store.as_ref()).await?;
    Ok(Json(groups))
}

/// GET /api/v1/users/:user_id/roles
pub async fn handle_user_roles(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<UserRoleRow>>, AppError> {
    let roles = service::list_roles(state.store.as_ref(), user_id).await?;
    Ok(Json(roles))
}
