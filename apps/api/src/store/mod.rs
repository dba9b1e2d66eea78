//! Record Store Client: typed access to the remote collections.
//!
//! Handlers and services only ever see `dyn RecordStore`. The Postgres backend is
//! used in production; tests run against the in-memory backend, which mirrors the
//! store's uniqueness and all-or-nothing bulk insert semantics.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::application::{
    ApplicationQuery, ApplicationRow, ApplicationUpdate, JdMappingStatus, NewApplication,
};
use crate::models::job::{JobQuery, JobRow, JobUpdate, NewJob};
use crate::models::matching::MatchResultRow;
use crate::models::screening::ScreeningRow;
use crate::models::user::UserRoleRow;

#[cfg(test)]
pub mod memory;
pub mod postgres;

/// Postgres SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport or query failure, passed through as the store reported it.
    #[error("{0}")]
    Database(sqlx::Error),

    #[error("{0}")]
    UniqueViolation(String),

    #[error("{collection} record {id} not found")]
    NotFound {
        collection: &'static str,
        id: i64,
    },
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                return StoreError::UniqueViolation(db_err.message().to_string());
            }
        }
        StoreError::Database(err)
    }
}

/// Named collections that support count-only reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Jobs,
    Applications,
}

impl Collection {
    pub fn table(self) -> &'static str {
        match self {
            Collection::Jobs => "jobs",
            Collection::Applications => "candidate_applications",
        }
    }
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All jobs, newest first.
    async fn list_jobs(&self, query: &JobQuery) -> Result<Vec<JobRow>, StoreError>;

    async fn find_job_by_role_code(&self, role_code: &str) -> Result<Option<JobRow>, StoreError>;

    async fn insert_job(&self, job: &NewJob) -> Result<JobRow, StoreError>;

    /// Inserts every job or none of them. Returns the number of rows written.
    async fn insert_jobs(&self, jobs: &[NewJob]) -> Result<u64, StoreError>;

    async fn update_job(&self, id: i64, update: &JobUpdate) -> Result<JobRow, StoreError>;

    /// All applications, newest first.
    async fn list_applications(
        &self,
        query: &ApplicationQuery,
    ) -> Result<Vec<ApplicationRow>, StoreError>;

    async fn find_application(
        &self,
        contact_number: &str,
        role_code: &str,
    ) -> Result<Option<ApplicationRow>, StoreError>;

    async fn insert_application(
        &self,
        application: &NewApplication,
    ) -> Result<ApplicationRow, StoreError>;

    /// Inserts every application or none of them. Returns the number of rows written.
    async fn insert_applications(&self, applications: &[NewApplication])
        -> Result<u64, StoreError>;

    async fn update_application(
        &self,
        id: i64,
        update: &ApplicationUpdate,
    ) -> Result<ApplicationRow, StoreError>;

    /// Sets the workflow tag on the given applications. Returns rows touched.
    async fn set_jd_mapping(&self, ids: &[i64], status: JdMappingStatus)
        -> Result<u64, StoreError>;

    /// All CV match results, newest first.
    async fn list_match_results(&self) -> Result<Vec<MatchResultRow>, StoreError>;

    /// All screening outcomes, newest first.
    async fn list_screenings(&self) -> Result<Vec<ScreeningRow>, StoreError>;

    async fn count(&self, collection: Collection) -> Result<i64, StoreError>;

    /// Counts screenings whose outcome matches one of `outcomes`, ignoring case.
    async fn count_screenings_with_outcome(&self, outcomes: &[&str]) -> Result<i64, StoreError>;

    async fn count_queue_with_status(&self, status: &str) -> Result<i64, StoreError>;

    async fn list_roles(&self, user_id: Uuid) -> Result<Vec<UserRoleRow>, StoreError>;
}
