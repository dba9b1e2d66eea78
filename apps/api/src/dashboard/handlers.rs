use axum::{extract::State, Json};

use crate::dashboard::stats::{self, Analytics, DashboardStats};
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/v1/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, AppError> {
    let stats = stats::dashboard_stats(state.store.as_ref()).await?;
    Ok(Json(stats))
}

/// GET /api/v1/analytics
pub async fn handle_analytics(State(state): State<AppState>) -> Result<Json<Analytics>, AppError> {
    let analytics = stats::analytics(state.store.as_ref()).await?;
    Ok(Json(analytics))
}
