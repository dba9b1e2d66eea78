use std::collections::HashMap;

use chrono::Utc;
use tracing::info;

use crate::candidates::service::application_id;
use crate::errors::AppError;
use crate::ingest::columns::{CandidateField, ColumnMap};
use crate::ingest::csv::{parse_document, CsvRow};
use crate::ingest::dedup::{DuplicateGuard, DuplicateKind};
use crate::ingest::report::{IngestReport, RowOutcome, RowStatus};
use crate::ingest::validation::validate_candidate_draft;
use crate::ingest::{ImportPlan, IngestError};
use crate::models::application::{ApplicationQuery, ApplicationRow, CandidateDraft, NewApplication};
use crate::models::job::{JobQuery, JobRow};
use crate::store::RecordStore;

/// Store snapshot and ID settings a candidate upload is evaluated against.
pub struct CandidateImportContext<'a> {
    pub existing: &'a [ApplicationRow],
    pub jobs: &'a [JobRow],
    pub id_prefix: &'a str,
    /// Unix seconds shared by every ID issued in this upload.
    pub issued_at: i64,
}

fn candidate_draft(columns: &ColumnMap<CandidateField>, row: &CsvRow) -> CandidateDraft {
    CandidateDraft {
        role_code: columns.get(row, CandidateField::RoleCode),
        candidate_name: columns.get(row, CandidateField::CandidateName),
        email: columns.get(row, CandidateField::Email),
        contact_number: columns.get(row, CandidateField::ContactNumber),
        experience_years: columns.get(row, CandidateField::ExperienceYears),
        relevant_experience_years: columns.get(row, CandidateField::RelevantExperienceYears),
        notice_period: columns.get(row, CandidateField::NoticePeriod),
        current_ctc: columns.get(row, CandidateField::CurrentCtc),
        expected_ctc: columns.get(row, CandidateField::ExpectedCtc),
        current_location: columns.get(row, CandidateField::CurrentLocation),
        resume_url: columns.get(row, CandidateField::ResumeUrl),
        job_applied: columns.get(row, CandidateField::JobApplied),
        skills: columns.get(row, CandidateField::Skills),
        documents: columns.get(row, CandidateField::Documents),
    }
}

/// Classifies every row of a candidate upload. Accepted rows get a synthesized
/// application ID and, when their role code names a known job, that job's
/// role name as the applied role.
pub fn plan_candidate_import(
    text: &str,
    ctx: &CandidateImportContext<'_>,
) -> Result<ImportPlan<NewApplication>, IngestError> {
    let document = parse_document(text).ok_or(IngestError::EmptyFile)?;
    let columns = ColumnMap::<CandidateField>::resolve(&document.headers)?;

    let role_names: HashMap<&str, &str> = ctx
        .jobs
        .iter()
        .filter_map(|j| Some((j.role_code.trim(), j.role_name.as_deref()?)))
        .collect();
    let mut guard = DuplicateGuard::new(ctx.existing.iter().filter_map(ApplicationRow::key));

    let mut accepted = Vec::new();
    let mut outcomes = Vec::with_capacity(document.rows.len());

    for row in &document.rows {
        let draft = candidate_draft(&columns, row);
        let id = application_id(
            ctx.id_prefix,
            draft.role_code.as_deref(),
            ctx.issued_at,
            Some(row.number),
        );

        let mut app = match validate_candidate_draft(&draft, id) {
            Ok(app) => app,
            Err(reason) => {
                outcomes.push(RowOutcome::rejected(row.number, RowStatus::Invalid, reason));
                continue;
            }
        };

        if let Some(key) = app.key() {
            let duplicate = guard.check(&key).map(|kind| match kind {
                DuplicateKind::InFile => (RowStatus::DuplicateInFile, "in this CSV file"),
                DuplicateKind::InStore => (RowStatus::AlreadyExists, "in database"),
            });
            if let Some((status, place)) = duplicate {
                outcomes.push(RowOutcome::rejected(
                    row.number,
                    status,
                    format!(
                        "Contact Number \"{}\" and Role Code \"{}\" already exist {place}",
                        key.contact_number, key.role_code
                    ),
                ));
                continue;
            }
            guard.record(key);
        }

        if let Some(name) = app.role_code.as_deref().and_then(|c| role_names.get(c)) {
            app.job_applied = Some(name.to_string());
        }
        accepted.push(app);
        outcomes.push(RowOutcome::accepted(row.number));
    }

    Ok(ImportPlan {
        accepted,
        outcomes,
        ignored_headers: columns.ignored,
        document,
    })
}

/// Validates a candidate upload and writes the accepted rows in one batch.
pub async fn import_candidates(
    store: &dyn RecordStore,
    text: &str,
    id_prefix: &str,
) -> Result<IngestReport, AppError> {
    let all_applications = ApplicationQuery::default();
    let all_jobs = JobQuery::default();
    let (existing, jobs) = tokio::try_join!(
        store.list_applications(&all_applications),
        store.list_jobs(&all_jobs),
    )?;

    let ctx = CandidateImportContext {
        existing: &existing,
        jobs: &jobs,
        id_prefix,
        issued_at: Utc::now().timestamp(),
    };
    let plan = plan_candidate_import(text, &ctx)?;
    plan.log_rejections("Candidate");
    plan.ensure_rows()?;

    let inserted = store.insert_applications(&plan.accepted).await?;
    let report = plan.into_report(inserted);
    info!(
        "Candidate upload finished: {} inserted, {} invalid, {} duplicate",
        report.inserted, report.summary.invalid, report.summary.duplicates
    );
    Ok(report)
}
