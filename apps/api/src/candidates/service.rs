use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::candidates::grouping::{group_by_contact, GroupedCandidate};
use crate::errors::AppError;
use crate::ingest::validation::validate_candidate_draft;
use crate::models::application::{
    ApplicationQuery, ApplicationRow, ApplicationUpdate, CandidateDraft,
};
use crate::models::user::UserRoleRow;
use crate::store::RecordStore;

/// Synthesizes an application ID: `<prefix>_<role code or UNKNOWN>_<unix secs>`,
/// with a `_<row>` suffix for bulk rows so IDs issued in the same second differ.
pub fn application_id(
    prefix: &str,
    role_code: Option<&str>,
    issued_at: i64,
    row: Option<usize>,
) -> String {
    let role = role_code
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or("UNKNOWN");
    match row {
        Some(n) => format!("{prefix}_{role}_{issued_at}_{n}"),
        None => format!("{prefix}_{role}_{issued_at}"),
    }
}

/// Creates one application from the form. A repeated (contact number, role code)
/// pair is rejected before the write.
pub async fn create_application(
    store: &dyn RecordStore,
    draft: &CandidateDraft,
    id_prefix: &str,
) -> Result<ApplicationRow, AppError> {
    let id = application_id(
        id_prefix,
        draft.role_code.as_deref(),
        Utc::now().timestamp(),
        None,
    );
    let mut app = validate_candidate_draft(draft, id).map_err(AppError::Validation)?;

    if let Some(key) = app.key() {
        if store
            .find_application(&key.contact_number, &key.role_code)
            .await?
            .is_some()
        {
            return Err(AppError::Duplicate(format!(
                "Candidate with Contact Number \"{}\" and Role Code \"{}\" already exists",
                key.contact_number, key.role_code
            )));
        }
    }

    if app.job_applied.is_none() {
        if let Some(code) = app.role_code.as_deref() {
            app.job_applied = store
                .find_job_by_role_code(code)
                .await?
                .and_then(|job| job.role_name);
        }
    }

    let row = store.insert_application(&app).await?;
    info!("Created application {}", app.application_id);
    Ok(row)
}

pub async fn update_application(
    store: &dyn RecordStore,
    id: i64,
    update: &ApplicationUpdate,
) -> Result<ApplicationRow, AppError> {
    let name_present = update
        .fields
        .candidate_name
        .as_deref()
        .is_some_and(|n| !n.trim().is_empty());
    if !name_present {
        return Err(AppError::Validation("Missing Candidate Name".to_string()));
    }

    let row = store.update_application(id, update).await?;
    info!("Updated application {id}");
    Ok(row)
}

pub async fn list_applications(
    store: &dyn RecordStore,
    query: &ApplicationQuery,
) -> Result<Vec<ApplicationRow>, AppError> {
    Ok(store.list_applications(query).await?)
}

/// Fetches applications and match scores together, then groups by contact.
pub async fn list_grouped(store: &dyn RecordStore) -> Result<Vec<GroupedCandidate>, AppError> {
    let all = ApplicationQuery::default();
    let (applications, match_results) = tokio::try_join!(
        store.list_applications(&all),
        store.list_match_results(),
    )?;
    Ok(group_by_contact(&applications, &match_results))
}

pub async fn list_roles(
    store: &dyn RecordStore,
    user_id: Uuid,
) -> Result<Vec<UserRoleRow>, AppError> {
    let roles = store.list_roles(user_id).await?;
    if roles.is_empty() {
        warn!("User {user_id} has no role assignments; row-level checks will hide every record");
    }
    Ok(roles)
}
