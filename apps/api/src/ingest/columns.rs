//! Header dictionaries: which upload column feeds which record field.

use std::collections::HashMap;
use std::hash::Hash;

use crate::ingest::csv::CsvRow;
use crate::ingest::IngestError;

/// A typed destination field for an uploaded column.
pub trait Field: Copy + Eq + Hash + 'static {
    const ALL: &'static [Self];

    /// Accepted header spellings, lowercase with single spaces.
    fn aliases(self) -> &'static [&'static str];

    /// Display name used in reasons and error messages.
    fn label(self) -> &'static str;

    /// Whether every row must carry a value for this field.
    fn required(self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobField {
    RoleCode,
    RoleName,
    Status,
    Location,
    JdUrl,
    CurrentUpdates,
    MinimumExperience,
    Duration,
    MonthlyCtc,
    Skills,
}

impl Field for JobField {
    const ALL: &'static [Self] = &[
        JobField::RoleCode,
        JobField::RoleName,
        JobField::Status,
        JobField::Location,
        JobField::JdUrl,
        JobField::CurrentUpdates,
        JobField::MinimumExperience,
        JobField::Duration,
        JobField::MonthlyCtc,
        JobField::Skills,
    ];

    fn aliases(self) -> &'static [&'static str] {
        match self {
            JobField::RoleCode => &["role code"],
            JobField::RoleName => &["role name"],
            JobField::Status => &["status"],
            JobField::Location => &["location"],
            JobField::JdUrl => &[
                "jd url",
                "jd context",
                "job description",
                "brief context about the role (jd)",
            ],
            JobField::CurrentUpdates => &["current updates"],
            JobField::MinimumExperience => &["minimum experience"],
            JobField::Duration => &["duration"],
            JobField::MonthlyCtc => &["candidate monthly ctc", "monthly ctc"],
            JobField::Skills => &["skills"],
        }
    }

    fn label(self) -> &'static str {
        match self {
            JobField::RoleCode => "Role Code",
            JobField::RoleName => "Role Name",
            JobField::Status => "Status",
            JobField::Location => "Location",
            JobField::JdUrl => "JD URL",
            JobField::CurrentUpdates => "Current Updates",
            JobField::MinimumExperience => "Minimum Experience",
            JobField::Duration => "Duration",
            JobField::MonthlyCtc => "Monthly CTC",
            JobField::Skills => "Skills",
        }
    }

    fn required(self) -> bool {
        matches!(
            self,
            JobField::RoleCode | JobField::RoleName | JobField::Location | JobField::JdUrl
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateField {
    /// Recognized so it is not reported as ignored; the value is always replaced.
    ApplicationId,
    RoleCode,
    CandidateName,
    Email,
    ContactNumber,
    ExperienceYears,
    RelevantExperienceYears,
    NoticePeriod,
    CurrentCtc,
    ExpectedCtc,
    CurrentLocation,
    ResumeUrl,
    JobApplied,
    Skills,
    Documents,
}

impl Field for CandidateField {
    const ALL: &'static [Self] = &[
        CandidateField::ApplicationId,
        CandidateField::RoleCode,
        CandidateField::CandidateName,
        CandidateField::Email,
        CandidateField::ContactNumber,
        CandidateField::ExperienceYears,
        CandidateField::RelevantExperienceYears,
        CandidateField::NoticePeriod,
        CandidateField::CurrentCtc,
        CandidateField::ExpectedCtc,
        CandidateField::CurrentLocation,
        CandidateField::ResumeUrl,
        CandidateField::JobApplied,
        CandidateField::Skills,
        CandidateField::Documents,
    ];

    fn aliases(self) -> &'static [&'static str] {
        match self {
            CandidateField::ApplicationId => &["application id"],
            CandidateField::RoleCode => &["role code"],
            CandidateField::CandidateName => &["candidate name"],
            CandidateField::Email => &["candidate email id", "email"],
            CandidateField::ContactNumber => &["candidate contact number", "contact number"],
            CandidateField::ExperienceYears => {
                &["candidate years of experience", "years of experience"]
            }
            CandidateField::RelevantExperienceYears => &[
                "candidate relevant years of experience",
                "relevant years of experience",
            ],
            CandidateField::NoticePeriod => &["notice period"],
            CandidateField::CurrentCtc => &["current ctc"],
            CandidateField::ExpectedCtc => &["salary expectation", "expected ctc"],
            CandidateField::CurrentLocation => &["current location"],
            CandidateField::ResumeUrl => &["resume", "resume url"],
            CandidateField::JobApplied => &["job applied"],
            CandidateField::Skills => &["skills"],
            CandidateField::Documents => &["documents"],
        }
    }

    fn label(self) -> &'static str {
        match self {
            CandidateField::ApplicationId => "Application ID",
            CandidateField::RoleCode => "Role Code",
            CandidateField::CandidateName => "Candidate Name",
            CandidateField::Email => "Email",
            CandidateField::ContactNumber => "Contact Number",
            CandidateField::ExperienceYears => "Years of Experience",
            CandidateField::RelevantExperienceYears => "Relevant Years of Experience",
            CandidateField::NoticePeriod => "Notice Period",
            CandidateField::CurrentCtc => "Current CTC",
            CandidateField::ExpectedCtc => "Salary Expectation",
            CandidateField::CurrentLocation => "Current Location",
            CandidateField::ResumeUrl => "Resume",
            CandidateField::JobApplied => "Job Applied",
            CandidateField::Skills => "Skills",
            CandidateField::Documents => "Documents",
        }
    }

    fn required(self) -> bool {
        self == CandidateField::CandidateName
    }
}

/// Lowercases, maps underscores to spaces and collapses runs of whitespace.
pub fn normalize_header(header: &str) -> String {
    header
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn lookup<F: Field>(normalized: &str) -> Option<F> {
    F::ALL
        .iter()
        .copied()
        .find(|field| field.aliases().contains(&normalized))
}

/// Resolved header row. The first column naming a field wins; every other
/// column is ignored and reported.
#[derive(Debug, Clone)]
pub struct ColumnMap<F: Field> {
    positions: HashMap<F, usize>,
    pub ignored: Vec<String>,
}

impl<F: Field> ColumnMap<F> {
    pub fn resolve(headers: &[String]) -> Result<Self, IngestError> {
        let mut positions = HashMap::new();
        let mut ignored = Vec::new();

        for (index, header) in headers.iter().enumerate() {
            match lookup::<F>(&normalize_header(header)) {
                Some(field) if !positions.contains_key(&field) => {
                    positions.insert(field, index);
                }
                _ => ignored.push(header.clone()),
            }
        }

        let missing: Vec<String> = F::ALL
            .iter()
            .filter(|field| field.required() && !positions.contains_key(*field))
            .map(|field| field.label().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(IngestError::MissingColumns(missing));
        }

        Ok(ColumnMap { positions, ignored })
    }

    /// The row's trimmed value for `field`, `None` when the column is absent or blank.
    pub fn get(&self, row: &CsvRow, field: F) -> Option<String> {
        self.positions
            .get(&field)
            .and_then(|&index| row.cell(index))
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_headers_match_case_and_separator_insensitively() {
        let map = ColumnMap::<JobField>::resolve(&headers(&[
            "ROLE_CODE",
            "Role  Name",
            "location",
            "Brief context about the role (JD)",
        ]))
        .unwrap();
        let row = CsvRow {
            number: 1,
            values: headers(&["ENG-1", "Backend", "Pune", "https://x.com/jd.pdf"]),
        };
        assert_eq!(map.get(&row, JobField::RoleCode).as_deref(), Some("ENG-1"));
        assert_eq!(
            map.get(&row, JobField::JdUrl).as_deref(),
            Some("https://x.com/jd.pdf")
        );
        assert!(map.ignored.is_empty());
    }

    #[test]
    fn test_unknown_headers_are_reported() {
        let map = ColumnMap::<CandidateField>::resolve(&headers(&[
            "Candidate Name",
            "Favourite Colour",
            "candidate name",
        ]))
        .unwrap();
        assert_eq!(map.ignored, vec!["Favourite Colour", "candidate name"]);
    }

    #[test]
    fn test_missing_required_column_fails_fast() {
        let err = ColumnMap::<JobField>::resolve(&headers(&["Role Code", "Role Name"])).unwrap_err();
        match err {
            IngestError::MissingColumns(cols) => assert_eq!(cols, vec!["Location", "JD URL"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_every_alias_is_normalized() {
        for field in JobField::ALL {
            for alias in field.aliases() {
                assert_eq!(normalize_header(alias), *alias);
            }
        }
        for field in CandidateField::ALL {
            for alias in field.aliases() {
                assert_eq!(normalize_header(alias), *alias);
            }
        }
    }
}
