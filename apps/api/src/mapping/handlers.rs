use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::mapping::filters::{ScreeningCandidate, ScreeningFilters, ScreeningQuery};
use crate::mapping::service;
use crate::models::application::ApplicationRow;
use crate::models::matching::MatchResultRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StartMappingRequest {
    pub ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct StartMappingResponse {
    pub updated: u64,
}

/// GET /api/v1/cv-mapping/results
pub async fn handle_list_results(
    State(state): State<AppState>,
) -> Result<Json<Vec<MatchResultRow>>, AppError> {
    let results = service::list_results(state.store.as_ref()).await?;
    Ok(Json(results))
}

/// GET /api/v1/cv-mapping/pending
pub async fn handle_list_pending(
    State(state): State<AppState>,
) -> Result<Json<Vec<ApplicationRow>>, AppError> {
    let pending = service::list_pending(state.store.as_ref()).await?;
    Ok(Json(pending))
}

/// POST /api/v1/cv-mapping/start
pub async fn handle_start_mapping(
    State(state): State<AppState>,
    Json(req): Json<StartMappingRequest>,
) -> Result<Json<StartMappingResponse>, AppError> {
    let updated = service::start_mapping(state.store.as_ref(), &req.ids).await?;
    Ok(Json(StartMappingResponse { updated }))
}

/// GET /api/v1/cv-mapping/screening
pub async fn handle_screening_candidates(
    State(state): State<AppState>,
    Query(query): Query<ScreeningQuery>,
) -> Result<Json<Vec<ScreeningCandidate>>, AppError> {
    let filters = ScreeningFilters::from_query(&query).map_err(AppError::Validation)?;
    let candidates = service::screening_candidates(state.store.as_ref(), &filters).await?;
    Ok(Json(candidates))
}
