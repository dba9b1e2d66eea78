use tracing::info;

use crate::errors::AppError;
use crate::ingest::validation::{is_http_url, validate_job_draft, JD_URL_REASON};
use crate::models::job::{JobDraft, JobQuery, JobRow, JobUpdate};
use crate::store::RecordStore;

/// Creates one job from the form, with the same rules as an uploaded row.
pub async fn create_job(store: &dyn RecordStore, draft: &JobDraft) -> Result<JobRow, AppError> {
    let job = validate_job_draft(draft).map_err(AppError::Validation)?;

    if store.find_job_by_role_code(&job.role_code).await?.is_some() {
        return Err(AppError::Duplicate(format!(
            "Job data with Role Code \"{}\" already exists. Please use a different Role Code.",
            job.role_code
        )));
    }

    let row = store.insert_job(&job).await?;
    info!("Created job {} ({})", row.role_code, row.status);
    Ok(row)
}

/// Overwrites the editable fields of a job. A JD URL, when given, must still be http(s).
pub async fn update_job(
    store: &dyn RecordStore,
    id: i64,
    update: &JobUpdate,
) -> Result<JobRow, AppError> {
    if let Some(url) = update.jd_url.as_deref().filter(|u| !u.trim().is_empty()) {
        if !is_http_url(url) {
            return Err(AppError::Validation(JD_URL_REASON.to_string()));
        }
    }

    let row = store.update_job(id, update).await?;
    info!("Updated job {} ({})", row.role_code, row.status);
    Ok(row)
}

pub async fn list_jobs(store: &dyn RecordStore, query: &JobQuery) -> Result<Vec<JobRow>, AppError> {
    Ok(store.list_jobs(query).await?)
}
