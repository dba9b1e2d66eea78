use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;
use uuid::Uuid;

use crate::models::application::{
    ApplicationQuery, ApplicationRow, ApplicationUpdate, JdMappingStatus, NewApplication,
};
use crate::models::job::{JobQuery, JobRow, JobUpdate, NewJob};
use crate::models::matching::MatchResultRow;
use crate::models::screening::ScreeningRow;
use crate::models::user::UserRoleRow;
use crate::store::{Collection, RecordStore, StoreError};

/// Rows per multi-row INSERT statement; keeps bind parameters under the Postgres limit.
const INSERT_CHUNK_ROWS: usize = 1000;

/// Postgres-backed record store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn list_jobs(&self, query: &JobQuery) -> Result<Vec<JobRow>, StoreError> {
        Ok(sqlx::query_as::<_, JobRow>(
            r#"
            SELECT * FROM jobs
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(query.status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find_job_by_role_code(&self, role_code: &str) -> Result<Option<JobRow>, StoreError> {
        Ok(
            sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE role_code = $1 LIMIT 1")
                .bind(role_code)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn insert_job(&self, job: &NewJob) -> Result<JobRow, StoreError> {
        Ok(sqlx::query_as::<_, JobRow>(
            r#"
            INSERT INTO jobs
                (role_code, role_name, status, location, jd_url, current_updates,
                 minimum_experience, duration, monthly_ctc, skills)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&job.role_code)
        .bind(&job.role_name)
        .bind(job.status.as_str())
        .bind(&job.location)
        .bind(&job.jd_url)
        .bind(&job.current_updates)
        .bind(&job.minimum_experience)
        .bind(&job.duration)
        .bind(&job.monthly_ctc)
        .bind(&job.skills)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn insert_jobs(&self, jobs: &[NewJob]) -> Result<u64, StoreError> {
        if jobs.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let mut written = 0;
        for chunk in jobs.chunks(INSERT_CHUNK_ROWS) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO jobs (role_code, role_name, status, location, jd_url, \
                 current_updates, minimum_experience, duration, monthly_ctc, skills) ",
            );
            builder.push_values(chunk, |mut b, job| {
                b.push_bind(&job.role_code)
                    .push_bind(&job.role_name)
                    .push_bind(job.status.as_str())
                    .push_bind(&job.location)
                    .push_bind(&job.jd_url)
                    .push_bind(&job.current_updates)
                    .push_bind(&job.minimum_experience)
                    .push_bind(&job.duration)
                    .push_bind(&job.monthly_ctc)
                    .push_bind(&job.skills);
            });
            written += builder.build().execute(&mut *tx).await?.rows_affected();
        }
        tx.commit().await?;

        info!("Bulk inserted {written} jobs");
        Ok(written)
    }

    async fn update_job(&self, id: i64, update: &JobUpdate) -> Result<JobRow, StoreError> {
        sqlx::query_as::<_, JobRow>(
            r#"
            UPDATE jobs SET
                role_name = $1, status = $2, location = $3, jd_url = $4,
                current_updates = $5, minimum_experience = $6, duration = $7,
                monthly_ctc = $8, skills = $9
            WHERE id = $10
            RETURNING *
            "#,
        )
        .bind(&update.role_name)
        .bind(update.status.as_str())
        .bind(&update.location)
        .bind(&update.jd_url)
        .bind(&update.current_updates)
        .bind(&update.minimum_experience)
        .bind(&update.duration)
        .bind(&update.monthly_ctc)
        .bind(&update.skills)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound {
            collection: Collection::Jobs.table(),
            id,
        })
    }

    async fn list_applications(
        &self,
        query: &ApplicationQuery,
    ) -> Result<Vec<ApplicationRow>, StoreError> {
        Ok(sqlx::query_as::<_, ApplicationRow>(
            r#"
            SELECT * FROM candidate_applications
            WHERE ($1::text IS NULL OR jd_mapping = $1)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(query.jd_mapping.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find_application(
        &self,
        contact_number: &str,
        role_code: &str,
    ) -> Result<Option<ApplicationRow>, StoreError> {
        Ok(sqlx::query_as::<_, ApplicationRow>(
            "SELECT * FROM candidate_applications WHERE contact_number = $1 AND role_code = $2 LIMIT 1",
        )
        .bind(contact_number)
        .bind(role_code)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn insert_application(
        &self,
        application: &NewApplication,
    ) -> Result<ApplicationRow, StoreError> {
        Ok(sqlx::query_as::<_, ApplicationRow>(
            r#"
            INSERT INTO candidate_applications
                (application_id, role_code, candidate_name, email, contact_number,
                 experience_years, relevant_experience_years, notice_period, current_ctc,
                 expected_ctc, current_location, resume_url, job_applied, skills, documents)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(&application.application_id)
        .bind(&application.role_code)
        .bind(&application.candidate_name)
        .bind(&application.email)
        .bind(&application.contact_number)
        .bind(&application.experience_years)
        .bind(&application.relevant_experience_years)
        .bind(&application.notice_period)
        .bind(&application.current_ctc)
        .bind(&application.expected_ctc)
        .bind(&application.current_location)
        .bind(&application.resume_url)
        .bind(&application.job_applied)
        .bind(&application.skills)
        .bind(&application.documents)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn insert_applications(
        &self,
        applications: &[NewApplication],
    ) -> Result<u64, StoreError> {
        if applications.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let mut written = 0;
        for chunk in applications.chunks(INSERT_CHUNK_ROWS) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO candidate_applications (application_id, role_code, candidate_name, \
                 email, contact_number, experience_years, relevant_experience_years, \
                 notice_period, current_ctc, expected_ctc, current_location, resume_url, \
                 job_applied, skills, documents) ",
            );
            builder.push_values(chunk, |mut b, app| {
                b.push_bind(&app.application_id)
                    .push_bind(&app.role_code)
                    .push_bind(&app.candidate_name)
                    .push_bind(&app.email)
                    .push_bind(&app.contact_number)
                    .push_bind(&app.experience_years)
                    .push_bind(&app.relevant_experience_years)
                    .push_bind(&app.notice_period)
                    .push_bind(&app.current_ctc)
                    .push_bind(&app.expected_ctc)
                    .push_bind(&app.current_location)
                    .push_bind(&app.resume_url)
                    .push_bind(&app.job_applied)
                    .push_bind(&app.skills)
                    .push_bind(&app.documents);
            });
            written += builder.build().execute(&mut *tx).await?.rows_affected();
        }
        tx.commit().await?;

        info!("Bulk inserted {written} candidate applications");
        Ok(written)
    }

    async fn update_application(
        &self,
        id: i64,
        update: &ApplicationUpdate,
    ) -> Result<ApplicationRow, StoreError> {
        let fields = &update.fields;
        sqlx::query_as::<_, ApplicationRow>(
            r#"
            UPDATE candidate_applications SET
                application_id = $1, role_code = $2, candidate_name = $3, email = $4,
                contact_number = $5, experience_years = $6, relevant_experience_years = $7,
                notice_period = $8, current_ctc = $9, expected_ctc = $10,
                current_location = $11, resume_url = $12, job_applied = $13,
                skills = $14, documents = $15
            WHERE id = $16
            RETURNING *
            "#,
        )
        .bind(&update.application_id)
        .bind(&fields.role_code)
        .bind(&fields.candidate_name)
        .bind(&fields.email)
        .bind(&fields.contact_number)
        .bind(&fields.experience_years)
        .bind(&fields.relevant_experience_years)
        .bind(&fields.notice_period)
        .bind(&fields.current_ctc)
        .bind(&fields.expected_ctc)
        .bind(&fields.current_location)
        .bind(&fields.resume_url)
        .bind(&fields.job_applied)
        .bind(&fields.skills)
        .bind(&fields.documents)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound {
            collection: Collection::Applications.table(),
            id,
        })
    }

    async fn set_jd_mapping(
        &self,
        ids: &[i64],
        status: JdMappingStatus,
    ) -> Result<u64, StoreError> {
        let result =
            sqlx::query("UPDATE candidate_applications SET jd_mapping = $1 WHERE id = ANY($2)")
                .bind(status.as_str())
                .bind(ids.to_vec())
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected())
    }

    async fn list_match_results(&self) -> Result<Vec<MatchResultRow>, StoreError> {
        Ok(sqlx::query_as::<_, MatchResultRow>(
            "SELECT * FROM cv_match_results ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_screenings(&self) -> Result<Vec<ScreeningRow>, StoreError> {
        Ok(sqlx::query_as::<_, ScreeningRow>(
            "SELECT * FROM screening_outcomes ORDER BY screened_at DESC NULLS LAST",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn count(&self, collection: Collection) -> Result<i64, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM {}", collection.table());
        Ok(sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn count_screenings_with_outcome(&self, outcomes: &[&str]) -> Result<i64, StoreError> {
        let lowered: Vec<String> = outcomes.iter().map(|o| o.to_lowercase()).collect();
        Ok(sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM screening_outcomes WHERE LOWER(TRIM(screening_outcome)) = ANY($1)",
        )
        .bind(lowered)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn count_queue_with_status(&self, status: &str) -> Result<i64, StoreError> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM screening_queue WHERE status = $1")
                .bind(status)
                .fetch_one(&self.pool)
                .await?,
        )
    }

    async fn list_roles(&self, user_id: Uuid) -> Result<Vec<UserRoleRow>, StoreError> {
        Ok(sqlx::query_as::<_, UserRoleRow>(
            "SELECT user_id, role FROM user_roles WHERE user_id = $1 ORDER BY role",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }
}
