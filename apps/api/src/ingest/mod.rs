//! CSV Ingestion Pipeline.
//!
//! An upload is parsed, every row is classified (required fields, format,
//! duplicate within the file, duplicate in the store; first failure wins), and
//! only then are the accepted rows written with one all-or-nothing bulk insert.
//! Planning is pure so it can be tested without a store.

pub mod candidates;
pub mod columns;
pub mod csv;
pub mod dedup;
pub mod handlers;
pub mod jobs;
pub mod report;
pub mod validation;

use thiserror::Error;
use tracing::warn;

use crate::ingest::csv::CsvDocument;
use crate::ingest::report::{render_result_csv, IngestReport, IngestSummary, RowOutcome, RowStatus};

/// File-level failures. Row-level problems are reported as outcomes instead.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("The uploaded file is empty")]
    EmptyFile,

    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("No rows to insert ({invalid} invalid, {duplicates} duplicate)")]
    NoRowsToInsert { invalid: usize, duplicates: usize },
}

/// Evaluated upload: the rows to write and one outcome per data row.
#[derive(Debug)]
pub struct ImportPlan<T> {
    pub accepted: Vec<T>,
    pub outcomes: Vec<RowOutcome>,
    pub ignored_headers: Vec<String>,
    document: CsvDocument,
}

impl<T> ImportPlan<T> {
    pub fn summary(&self) -> IngestSummary {
        IngestSummary::tally(&self.outcomes)
    }

    /// Fails when nothing survived validation, before the store is contacted.
    pub fn ensure_rows(&self) -> Result<(), IngestError> {
        if self.accepted.is_empty() {
            let summary = self.summary();
            return Err(IngestError::NoRowsToInsert {
                invalid: summary.invalid,
                duplicates: summary.duplicates,
            });
        }
        Ok(())
    }

    pub fn log_rejections(&self, kind: &str) {
        for outcome in &self.outcomes {
            if outcome.status != RowStatus::Accepted {
                warn!(
                    "{kind} upload row {} skipped ({}): {}",
                    outcome.row_number,
                    outcome.status.label(),
                    outcome.reason
                );
            }
        }
        if !self.ignored_headers.is_empty() {
            warn!(
                "{kind} upload ignored unrecognized columns: {}",
                self.ignored_headers.join(", ")
            );
        }
    }

    pub fn into_report(self, inserted: u64) -> IngestReport {
        let summary = self.summary();
        let result_csv = render_result_csv(&self.document, &self.outcomes);
        IngestReport {
            inserted,
            summary,
            outcomes: self.outcomes,
            ignored_headers: self.ignored_headers,
            result_csv,
        }
    }
}
