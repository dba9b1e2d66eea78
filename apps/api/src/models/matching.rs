use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Output of the external CV-to-JD matcher. Scores are stored as text and only displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MatchResultRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub application_id: Option<String>,
    pub role_code: Option<String>,
    pub score: Option<String>,
    pub missing_skills: Option<String>,
    pub extracted_skills: Option<String>,
    pub jd_summary: Option<String>,
    pub resume_summary: Option<String>,
}
