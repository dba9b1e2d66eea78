use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Progress of the external CV-to-JD matching process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JdMappingStatus {
    #[serde(rename = "NOT STARTED")]
    NotStarted,
    #[serde(rename = "STARTED")]
    Started,
    #[serde(rename = "DONE")]
    Done,
}

impl JdMappingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JdMappingStatus::NotStarted => "NOT STARTED",
            JdMappingStatus::Started => "STARTED",
            JdMappingStatus::Done => "DONE",
        }
    }
}

impl fmt::Display for JdMappingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JdMappingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('_', " ").as_str() {
            "NOT STARTED" => Ok(JdMappingStatus::NotStarted),
            "STARTED" => Ok(JdMappingStatus::Started),
            "DONE" => Ok(JdMappingStatus::Done),
            other => Err(format!("Unknown JD mapping status \"{other}\"")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub application_id: Option<String>,
    pub role_code: Option<String>,
    pub candidate_name: Option<String>,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    pub experience_years: Option<String>,
    pub relevant_experience_years: Option<String>,
    pub notice_period: Option<String>,
    pub current_ctc: Option<String>,
    pub expected_ctc: Option<String>,
    pub current_location: Option<String>,
    pub resume_url: Option<String>,
    pub job_applied: Option<String>,
    pub skills: Option<String>,
    pub documents: Option<String>,
    pub jd_mapping: String,
    pub screening_response: Option<String>,
}

impl ApplicationRow {
    /// The (contact number, role code) pair, if both parts are present.
    pub fn key(&self) -> Option<ApplicationKey> {
        ApplicationKey::new(self.contact_number.as_deref(), self.role_code.as_deref())
    }
}

/// Uniqueness key of an application: one candidate may apply once per role.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApplicationKey {
    pub contact_number: String,
    pub role_code: String,
}

impl ApplicationKey {
    pub fn new(contact_number: Option<&str>, role_code: Option<&str>) -> Option<Self> {
        let contact_number = contact_number.map(str::trim).filter(|c| !c.is_empty())?;
        let role_code = role_code.map(str::trim).filter(|r| !r.is_empty())?;
        Some(ApplicationKey {
            contact_number: contact_number.to_string(),
            role_code: role_code.to_string(),
        })
    }
}

/// Unvalidated application input, from the create form or one CSV row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateDraft {
    pub role_code: Option<String>,
    pub candidate_name: Option<String>,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    pub experience_years: Option<String>,
    pub relevant_experience_years: Option<String>,
    pub notice_period: Option<String>,
    pub current_ctc: Option<String>,
    pub expected_ctc: Option<String>,
    pub current_location: Option<String>,
    pub resume_url: Option<String>,
    pub job_applied: Option<String>,
    pub skills: Option<String>,
    pub documents: Option<String>,
}

/// A validated application, ready for insertion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewApplication {
    pub application_id: String,
    pub role_code: Option<String>,
    pub candidate_name: String,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    pub experience_years: Option<String>,
    pub relevant_experience_years: Option<String>,
    pub notice_period: Option<String>,
    pub current_ctc: Option<String>,
    pub expected_ctc: Option<String>,
    pub current_location: Option<String>,
    pub resume_url: Option<String>,
    pub job_applied: Option<String>,
    pub skills: Option<String>,
    pub documents: Option<String>,
}

impl NewApplication {
    pub fn key(&self) -> Option<ApplicationKey> {
        ApplicationKey::new(self.contact_number.as_deref(), self.role_code.as_deref())
    }
}

/// Editable fields of an existing application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationUpdate {
    pub application_id: Option<String>,
    #[serde(flatten)]
    pub fields: CandidateDraft,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationQuery {
    pub jd_mapping: Option<JdMappingStatus>,
}
