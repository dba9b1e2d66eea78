use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::screening::service::{self, ScreeningView};
use crate::state::AppState;

/// GET /api/v1/screenings
pub async fn handle_list_screenings(
    State(state): State<AppState>,
) -> Result<Json<Vec<ScreeningView>>, AppError> {
    let views = service::list_screenings(state.store.as_ref()).await?;
    Ok(Json(views))
}
