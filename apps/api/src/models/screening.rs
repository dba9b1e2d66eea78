use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Status literal of a screening batch that is currently running.
pub const QUEUE_STATUS_PROCESSING: &str = "processing";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ScreeningRow {
    pub id: Uuid,
    pub screened_at: Option<DateTime<Utc>>,
    pub application_id: Option<String>,
    pub candidate_name: Option<String>,
    pub role_code: Option<String>,
    pub job_title: Option<String>,
    pub call_status: Option<String>,
    pub call_duration_secs: Option<i32>,
    pub recording_link: Option<String>,
    pub call_score: Option<f64>,
    pub final_score: Option<f64>,
    pub screening_outcome: Option<String>,
    pub screening_summary: Option<String>,
    pub rejection_reason: Option<String>,
}
