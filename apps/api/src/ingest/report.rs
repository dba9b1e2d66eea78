use serde::Serialize;

use crate::ingest::csv::CsvDocument;

pub const ACCEPTED_REASON: &str = "Successfully inserted";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RowStatus {
    Accepted,
    Invalid,
    DuplicateInFile,
    AlreadyExists,
}

impl RowStatus {
    pub fn label(self) -> &'static str {
        match self {
            RowStatus::Accepted => "ACCEPTED",
            RowStatus::Invalid => "INVALID",
            RowStatus::DuplicateInFile => "DUPLICATE_IN_FILE",
            RowStatus::AlreadyExists => "ALREADY_EXISTS",
        }
    }

    /// Color hint shown next to the label in the exported file.
    pub fn color(self) -> &'static str {
        match self {
            RowStatus::Accepted => "GREEN",
            RowStatus::Invalid => "RED",
            RowStatus::DuplicateInFile | RowStatus::AlreadyExists => "YELLOW",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowOutcome {
    pub row_number: usize,
    pub status: RowStatus,
    pub reason: String,
}

impl RowOutcome {
    pub fn accepted(row_number: usize) -> Self {
        Self {
            row_number,
            status: RowStatus::Accepted,
            reason: ACCEPTED_REASON.to_string(),
        }
    }

    pub fn rejected(row_number: usize, status: RowStatus, reason: impl Into<String>) -> Self {
        Self {
            row_number,
            status,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub accepted: usize,
    pub invalid: usize,
    pub duplicates: usize,
}

impl IngestSummary {
    pub fn tally(outcomes: &[RowOutcome]) -> Self {
        outcomes.iter().fold(Self::default(), |mut s, o| {
            match o.status {
                RowStatus::Accepted => s.accepted += 1,
                RowStatus::Invalid => s.invalid += 1,
                RowStatus::DuplicateInFile | RowStatus::AlreadyExists => s.duplicates += 1,
            }
            s
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub inserted: u64,
    pub summary: IngestSummary,
    pub outcomes: Vec<RowOutcome>,
    pub ignored_headers: Vec<String>,
    pub result_csv: String,
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Renders the downloadable per-row result file: three leading columns (row
/// number, status with color hint, reason) followed by the row's own values.
/// `outcomes` must hold one entry per document row, in order.
pub fn render_result_csv(document: &CsvDocument, outcomes: &[RowOutcome]) -> String {
    let mut lines = Vec::with_capacity(document.rows.len() + 1);

    let mut header = vec![quote("Row Number"), quote("Status"), quote("Reason")];
    header.extend(document.headers.iter().map(|h| quote(h)));
    lines.push(header.join(","));

    for (row, outcome) in document.rows.iter().zip(outcomes) {
        let status = format!("{} ({})", outcome.status.label(), outcome.status.color());
        let mut cells = vec![
            quote(&outcome.row_number.to_string()),
            quote(&status),
            quote(&outcome.reason),
        ];
        cells.extend(row.values.iter().map(|v| quote(v)));
        lines.push(cells.join(","));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::csv::parse_document;

    #[test]
    fn test_result_csv_layout() {
        let doc = parse_document("Role Code,Role Name\nENG-1,Backend\nENG-1,Data").unwrap();
        let outcomes = vec![
            RowOutcome::accepted(1),
            RowOutcome::rejected(
                2,
                RowStatus::DuplicateInFile,
                "Role Code \"ENG-1\" already exists in this CSV file",
            ),
        ];
        let csv = render_result_csv(&doc, &outcomes);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], r#""Row Number","Status","Reason","Role Code","Role Name""#);
        assert_eq!(
            lines[1],
            r#""1","ACCEPTED (GREEN)","Successfully inserted","ENG-1","Backend""#
        );
        assert_eq!(
            lines[2],
            r#""2","DUPLICATE_IN_FILE (YELLOW)","Role Code ""ENG-1"" already exists in this CSV file","ENG-1","Data""#
        );
    }

    #[test]
    fn test_summary_counts_both_duplicate_kinds() {
        let outcomes = vec![
            RowOutcome::accepted(1),
            RowOutcome::rejected(2, RowStatus::Invalid, "Missing Role Code"),
            RowOutcome::rejected(3, RowStatus::DuplicateInFile, "x"),
            RowOutcome::rejected(4, RowStatus::AlreadyExists, "y"),
        ];
        assert_eq!(
            IngestSummary::tally(&outcomes),
            IngestSummary {
                accepted: 1,
                invalid: 1,
                duplicates: 2,
            }
        );
    }
}
