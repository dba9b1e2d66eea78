use std::collections::HashMap;

use tracing::info;

use crate::errors::AppError;
use crate::mapping::filters::{ScreeningCandidate, ScreeningFilters};
use crate::models::application::{ApplicationQuery, ApplicationRow, JdMappingStatus};
use crate::models::matching::MatchResultRow;
use crate::store::RecordStore;

pub async fn list_results(store: &dyn RecordStore) -> Result<Vec<MatchResultRow>, AppError> {
    Ok(store.list_match_results().await?)
}

/// Applications the matcher has not picked up yet.
pub async fn list_pending(store: &dyn RecordStore) -> Result<Vec<ApplicationRow>, AppError> {
    let query = ApplicationQuery {
        jd_mapping: Some(JdMappingStatus::NotStarted),
    };
    Ok(store.list_applications(&query).await?)
}

/// Tags the selected applications as started. Returns the number tagged.
pub async fn start_mapping(store: &dyn RecordStore, ids: &[i64]) -> Result<u64, AppError> {
    if ids.is_empty() {
        return Err(AppError::Validation(
            "Select at least one candidate to start CV mapping".to_string(),
        ));
    }

    let updated = store.set_jd_mapping(ids, JdMappingStatus::Started).await?;
    info!("Marked {updated} candidate(s) as {}", JdMappingStatus::Started);
    Ok(updated)
}

/// Joins each application with its score by application ID. Blank scores are
/// skipped and the newest remaining result per application wins.
pub fn join_scores(
    applications: Vec<ApplicationRow>,
    results: &[MatchResultRow],
) -> Vec<ScreeningCandidate> {
    let mut newest: HashMap<&str, &MatchResultRow> = HashMap::new();
    for r in results {
        let Some(id) = r.application_id.as_deref() else {
            continue;
        };
        if r.score.as_deref().map_or(true, str::is_empty) {
            continue;
        }
        newest
            .entry(id)
            .and_modify(|kept| {
                if r.created_at > kept.created_at {
                    *kept = r;
                }
            })
            .or_insert(r);
    }
    let scores: HashMap<&str, &str> = newest
        .into_iter()
        .filter_map(|(id, r)| Some((id, r.score.as_deref()?)))
        .collect();

    applications
        .into_iter()
        .map(|app| {
            let score = app
                .application_id
                .as_deref()
                .and_then(|id| scores.get(id))
                .map(|s| s.to_string());
            ScreeningCandidate {
                id: app.id,
                application_id: app.application_id,
                candidate_name: app.candidate_name,
                role_code: app.role_code,
                job_applied: app.job_applied,
                email: app.email,
                jd_mapping: app.jd_mapping,
                score,
            }
        })
        .collect()
}

/// Scored candidates narrowed by `filters`. Applications and scores are fetched together.
pub async fn screening_candidates(
    store: &dyn RecordStore,
    filters: &ScreeningFilters,
) -> Result<Vec<ScreeningCandidate>, AppError> {
    let query = ApplicationQuery {
        jd_mapping: filters.jd_mapping,
    };
    let (applications, results) = tokio::try_join!(
        store.list_applications(&query),
        store.list_match_results(),
    )?;
    Ok(filters.apply(&join_scores(applications, &results)))
}
