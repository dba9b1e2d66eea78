use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Posting lifecycle. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Active,
    Paused,
    Closed,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Active => "active",
            JobStatus::Paused => "paused",
            JobStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(JobStatus::Active),
            "paused" => Ok(JobStatus::Paused),
            "closed" => Ok(JobStatus::Closed),
            other => Err(format!(
                "Invalid Status \"{other}\" (expected active, paused or closed)"
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub role_code: String,
    pub role_name: Option<String>,
    pub status: String,
    pub location: Option<String>,
    pub jd_url: Option<String>,
    pub current_updates: Option<String>,
    pub minimum_experience: Option<String>,
    pub duration: Option<String>,
    pub monthly_ctc: Option<String>,
    pub skills: Option<String>,
}

/// Unvalidated job input, from the create form or one CSV row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobDraft {
    pub role_code: Option<String>,
    pub role_name: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
    pub jd_url: Option<String>,
    pub current_updates: Option<String>,
    pub minimum_experience: Option<String>,
    pub duration: Option<String>,
    pub monthly_ctc: Option<String>,
    pub skills: Option<String>,
}

/// A validated job, ready for insertion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewJob {
    pub role_code: String,
    pub role_name: String,
    pub status: JobStatus,
    pub location: String,
    pub jd_url: String,
    pub current_updates: Option<String>,
    pub minimum_experience: Option<String>,
    pub duration: Option<String>,
    pub monthly_ctc: Option<String>,
    pub skills: Option<String>,
}

/// Editable fields of an existing job. The role code is immutable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobUpdate {
    pub role_name: Option<String>,
    #[serde(default)]
    pub status: JobStatus,
    pub location: Option<String>,
    pub jd_url: Option<String>,
    pub current_updates: Option<String>,
    pub minimum_experience: Option<String>,
    pub duration: Option<String>,
    pub monthly_ctc: Option<String>,
    pub skills: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobQuery {
    pub status: Option<JobStatus>,
}
