pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::candidates::handlers as candidates;
use crate::dashboard::handlers as dashboard;
use crate::ingest::handlers as ingest;
use crate::jobs::handlers as jobs;
use crate::mapping::handlers as mapping;
use crate::screening::handlers as screening;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs
        .route(
            "/api/v1/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route("/api/v1/jobs/:id", patch(jobs::handle_update_job))
        .route("/api/v1/jobs/import", post(ingest::handle_import_jobs))
        // Candidates
        .route(
            "/api/v1/candidates",
            get(candidates::handle_list_candidates).post(candidates::handle_create_candidate),
        )
        .route(
            "/api/v1/candidates/grouped",
            get(candidates::handle_grouped_candidates),
        )
        .route(
            "/api/v1/candidates/import",
            post(ingest::handle_import_candidates),
        )
        .route(
            "/api/v1/candidates/:id",
            patch(candidates::handle_update_candidate),
        )
        .route(
            "/api/v1/users/:user_id/roles",
            get(candidates::handle_user_roles),
        )
        // CV mapping
        .route("/api/v1/cv-mapping/results", get(mapping::handle_list_results))
        .route("/api/v1/cv-mapping/pending", get(mapping::handle_list_pending))
        .route("/api/v1/cv-mapping/start", post(mapping::handle_start_mapping))
        .route(
            "/api/v1/cv-mapping/screening",
            get(mapping::handle_screening_candidates),
        )
        // Screening and dashboards
        .route("/api/v1/screenings", get(screening::handle_list_screenings))
        .route("/api/v1/dashboard", get(dashboard::handle_dashboard))
        .route("/api/v1/analytics", get(dashboard::handle_analytics))
        .layer(body_limit)
        .with_state(state)
}
