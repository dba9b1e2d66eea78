use tracing::info;

use crate::errors::AppError;
use crate::ingest::columns::{ColumnMap, JobField};
use crate::ingest::csv::{parse_document, CsvRow};
use crate::ingest::dedup::{DuplicateGuard, DuplicateKind};
use crate::ingest::report::{IngestReport, RowOutcome, RowStatus};
use crate::ingest::validation::validate_job_draft;
use crate::ingest::{ImportPlan, IngestError};
use crate::models::job::{JobDraft, JobQuery, JobRow, NewJob};
use crate::store::RecordStore;

fn job_draft(columns: &ColumnMap<JobField>, row: &CsvRow) -> JobDraft {
    JobDraft {
        role_code: columns.get(row, JobField::RoleCode),
        role_name: columns.get(row, JobField::RoleName),
        status: columns.get(row, JobField::Status),
        location: columns.get(row, JobField::Location),
        jd_url: columns.get(row, JobField::JdUrl),
        current_updates: columns.get(row, JobField::CurrentUpdates),
        minimum_experience: columns.get(row, JobField::MinimumExperience),
        duration: columns.get(row, JobField::Duration),
        monthly_ctc: columns.get(row, JobField::MonthlyCtc),
        skills: columns.get(row, JobField::Skills),
    }
}

/// Classifies every row of a job upload against the jobs already in the store.
pub fn plan_job_import(text: &str, existing: &[JobRow]) -> Result<ImportPlan<NewJob>, IngestError> {
    let document = parse_document(text).ok_or(IngestError::EmptyFile)?;
    let columns = ColumnMap::<JobField>::resolve(&document.headers)?;
    let mut guard = DuplicateGuard::new(existing.iter().map(|j| j.role_code.trim().to_string()));

    let mut accepted = Vec::new();
    let mut outcomes = Vec::with_capacity(document.rows.len());

    for row in &document.rows {
        let outcome = match validate_job_draft(&job_draft(&columns, row)) {
            Err(reason) => RowOutcome::rejected(row.number, RowStatus::Invalid, reason),
            Ok(job) => match guard.check(&job.role_code) {
                Some(DuplicateKind::InFile) => RowOutcome::rejected(
                    row.number,
                    RowStatus::DuplicateInFile,
                    format!("Role Code \"{}\" already exists in this CSV file", job.role_code),
                ),
                Some(DuplicateKind::InStore) => RowOutcome::rejected(
                    row.number,
                    RowStatus::AlreadyExists,
                    format!("Role Code \"{}\" already exists in database", job.role_code),
                ),
                None => {
                    guard.record(job.role_code.clone());
                    accepted.push(job);
                    RowOutcome::accepted(row.number)
                }
            },
        };
        outcomes.push(outcome);
    }

    Ok(ImportPlan {
        accepted,
        outcomes,
        ignored_headers: columns.ignored,
        document,
    })
}

/// Validates a job upload and writes the accepted rows in one batch.
pub async fn import_jobs(store: &dyn RecordStore, text: &str) -> Result<IngestReport, AppError> {
    let existing = store.list_jobs(&JobQuery::default()).await?;

    let plan = plan_job_import(text, &existing)?;
    plan.log_rejections("Job");
    plan.ensure_rows()?;

    let inserted = store.insert_jobs(&plan.accepted).await?;
    let report = plan.into_report(inserted);
    info!(
        "Job upload finished: {} inserted, {} invalid, {} duplicate",
        report.inserted, report.summary.invalid, report.summary.duplicates
    );
    Ok(report)
}
