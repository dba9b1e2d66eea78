use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::application::{
    ApplicationKey, ApplicationQuery, ApplicationRow, ApplicationUpdate, JdMappingStatus,
    NewApplication,
};
use crate::models::job::{JobQuery, JobRow, JobUpdate, NewJob};
use crate::models::matching::MatchResultRow;
use crate::models::screening::ScreeningRow;
use crate::models::user::UserRoleRow;
use crate::store::{Collection, RecordStore, StoreError};

/// In-memory record store for tests. Enforces the same uniqueness rules as the
/// Postgres schema and applies bulk inserts all-or-nothing.
pub struct MemoryStore {
    pub jobs: Mutex<Vec<JobRow>>,
    pub applications: Mutex<Vec<ApplicationRow>>,
    pub match_results: Mutex<Vec<MatchResultRow>>,
    pub screenings: Mutex<Vec<ScreeningRow>>,
    /// Screening batch queue, as status literals.
    pub queue: Mutex<Vec<String>>,
    pub roles: Mutex<Vec<UserRoleRow>>,
    /// When set, every write fails with a store error.
    pub reject_writes: AtomicBool,
    pub write_calls: AtomicI64,
    next_id: AtomicI64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            jobs: Mutex::new(Vec::new()),
            applications: Mutex::new(Vec::new()),
            match_results: Mutex::new(Vec::new()),
            screenings: Mutex::new(Vec::new()),
            queue: Mutex::new(Vec::new()),
            roles: Mutex::new(Vec::new()),
            reject_writes: AtomicBool::new(false),
            write_calls: AtomicI64::new(0),
            next_id: AtomicI64::new(1),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Each new row is one minute newer than the previous one.
    fn allocate(&self) -> (i64, DateTime<Utc>) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).single().unwrap_or_default();
        (id, base + Duration::minutes(id))
    }

    fn begin_write(&self) -> Result<(), StoreError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::Protocol(
                "permission denied for table".to_string(),
            )));
        }
        Ok(())
    }

    fn job_row(&self, job: &NewJob) -> JobRow {
        let (id, created_at) = self.allocate();
        JobRow {
            id,
            created_at,
            role_code: job.role_code.clone(),
            role_name: Some(job.role_name.clone()),
            status: job.status.as_str().to_string(),
            location: Some(job.location.clone()),
            jd_url: Some(job.jd_url.clone()),
            current_updates: job.current_updates.clone(),
            minimum_experience: job.minimum_experience.clone(),
            duration: job.duration.clone(),
            monthly_ctc: job.monthly_ctc.clone(),
            skills: job.skills.clone(),
        }
    }

    fn application_row(&self, app: &NewApplication) -> ApplicationRow {
        let (id, created_at) = self.allocate();
        ApplicationRow {
            id,
            created_at,
            application_id: Some(app.application_id.clone()),
            role_code: app.role_code.clone(),
            candidate_name: Some(app.candidate_name.clone()),
            email: app.email.clone(),
            contact_number: app.contact_number.clone(),
            experience_years: app.experience_years.clone(),
            relevant_experience_years: app.relevant_experience_years.clone(),
            notice_period: app.notice_period.clone(),
            current_ctc: app.current_ctc.clone(),
            expected_ctc: app.expected_ctc.clone(),
            current_location: app.current_location.clone(),
            resume_url: app.resume_url.clone(),
            job_applied: app.job_applied.clone(),
            skills: app.skills.clone(),
            documents: app.documents.clone(),
            jd_mapping: JdMappingStatus::NotStarted.as_str().to_string(),
            screening_response: None,
        }
    }
}

fn exact_key(contact: &Option<String>, role: &Option<String>) -> Option<(String, String)> {
    Some((contact.clone()?, role.clone()?))
}

fn check_job_codes(existing: &[JobRow], incoming: &[NewJob]) -> Result<(), StoreError> {
    let mut codes: std::collections::HashSet<&str> =
        existing.iter().map(|j| j.role_code.as_str()).collect();
    for job in incoming {
        if !codes.insert(job.role_code.as_str()) {
            return Err(StoreError::UniqueViolation(format!(
                "duplicate key value violates unique constraint \"uq_jobs_role_code\": {}",
                job.role_code
            )));
        }
    }
    Ok(())
}

fn check_application_keys(
    existing: &[ApplicationRow],
    incoming: &[NewApplication],
) -> Result<(), StoreError> {
    let mut keys: std::collections::HashSet<(String, String)> = existing
        .iter()
        .filter_map(|a| exact_key(&a.contact_number, &a.role_code))
        .collect();
    let mut ids: std::collections::HashSet<&str> = existing
        .iter()
        .filter_map(|a| a.application_id.as_deref())
        .collect();
    for app in incoming {
        if !ids.insert(app.application_id.as_str()) {
            return Err(StoreError::UniqueViolation(format!(
                "duplicate key value violates unique constraint \"uq_applications_application_id\": {}",
                app.application_id
            )));
        }
        if let Some(key) = exact_key(&app.contact_number, &app.role_code) {
            if !keys.insert(key) {
                return Err(StoreError::UniqueViolation(
                    "duplicate key value violates unique constraint \"uq_applications_contact_role\""
                        .to_string(),
                ));
            }
        }
    }
    Ok(())
}

fn newest_first<T>(rows: &mut [T], key: impl Fn(&T) -> (DateTime<Utc>, i64)) {
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_jobs(&self, query: &JobQuery) -> Result<Vec<JobRow>, StoreError> {
        let mut rows: Vec<JobRow> = self
            .jobs
            .lock()
            .await
            .iter()
            .filter(|j| query.status.map_or(true, |s| j.status == s.as_str()))
            .cloned()
            .collect();
        newest_first(&mut rows, |j| (j.created_at, j.id));
        Ok(rows)
    }

    async fn find_job_by_role_code(&self, role_code: &str) -> Result<Option<JobRow>, StoreError> {
        Ok(self
            .jobs
            .lock()
            .await
            .iter()
            .find(|j| j.role_code == role_code)
            .cloned())
    }

    async fn insert_job(&self, job: &NewJob) -> Result<JobRow, StoreError> {
        self.begin_write()?;
        let mut jobs = self.jobs.lock().await;
        check_job_codes(&jobs, std::slice::from_ref(job))?;
        let row = self.job_row(job);
        jobs.push(row.clone());
        Ok(row)
    }

    async fn insert_jobs(&self, new_jobs: &[NewJob]) -> Result<u64, StoreError> {
        self.begin_write()?;
        let mut jobs = self.jobs.lock().await;
        check_job_codes(&jobs, new_jobs)?;
        for job in new_jobs {
            let row = self.job_row(job);
            jobs.push(row);
        }
        Ok(new_jobs.len() as u64)
    }

    async fn update_job(&self, id: i64, update: &JobUpdate) -> Result<JobRow, StoreError> {
        self.begin_write()?;
        let mut jobs = self.jobs.lock().await;
        let job = jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or(StoreError::NotFound {
                collection: Collection::Jobs.table(),
                id,
            })?;
        job.role_name = update.role_name.clone();
        job.status = update.status.as_str().to_string();
        job.location = update.location.clone();
        job.jd_url = update.jd_url.clone();
        job.current_updates = update.current_updates.clone();
        job.minimum_experience = update.minimum_experience.clone();
        job.duration = update.duration.clone();
        job.monthly_ctc = update.monthly_ctc.clone();
        job.skills = update.skills.clone();
        Ok(job.clone())
    }

    async fn list_applications(
        &self,
        query: &ApplicationQuery,
    ) -> Result<Vec<ApplicationRow>, StoreError> {
        let mut rows: Vec<ApplicationRow> = self
            .applications
            .lock()
            .await
            .iter()
            .filter(|a| query.jd_mapping.map_or(true, |s| a.jd_mapping == s.as_str()))
            .cloned()
            .collect();
        newest_first(&mut rows, |a| (a.created_at, a.id));
        Ok(rows)
    }

    async fn find_application(
        &self,
        contact_number: &str,
        role_code: &str,
    ) -> Result<Option<ApplicationRow>, StoreError> {
        let wanted = ApplicationKey::new(Some(contact_number), Some(role_code));
        Ok(self
            .applications
            .lock()
            .await
            .iter()
            .find(|a| a.key().is_some() && a.key() == wanted)
            .cloned())
    }

    async fn insert_application(
        &self,
        application: &NewApplication,
    ) -> Result<ApplicationRow, StoreError> {
        self.begin_write()?;
        let mut apps = self.applications.lock().await;
        check_application_keys(&apps, std::slice::from_ref(application))?;
        let row = self.application_row(application);
        apps.push(row.clone());
        Ok(row)
    }

    async fn insert_applications(
        &self,
        applications: &[NewApplication],
    ) -> Result<u64, StoreError> {
        self.begin_write()?;
        let mut apps = self.applications.lock().await;
        check_application_keys(&apps, applications)?;
        for app in applications {
            let row = self.application_row(app);
            apps.push(row);
        }
        Ok(applications.len() as u64)
    }

    async fn update_application(
        &self,
        id: i64,
        update: &ApplicationUpdate,
    ) -> Result<ApplicationRow, StoreError> {
        self.begin_write()?;
        let mut apps = self.applications.lock().await;
        let app = apps
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StoreError::NotFound {
                collection: Collection::Applications.table(),
                id,
            })?;
        let fields = update.fields.clone();
        app.application_id = update.application_id.clone();
        app.role_code = fields.role_code;
        app.candidate_name = fields.candidate_name;
        app.email = fields.email;
        app.contact_number = fields.contact_number;
        app.experience_years = fields.experience_years;
        app.relevant_experience_years = fields.relevant_experience_years;
        app.notice_period = fields.notice_period;
        app.current_ctc = fields.current_ctc;
        app.expected_ctc = fields.expected_ctc;
        app.current_location = fields.current_location;
        app.resume_url = fields.resume_url;
        app.job_applied = fields.job_applied;
        app.skills = fields.skills;
        app.documents = fields.documents;
        Ok(app.clone())
    }

    async fn set_jd_mapping(
        &self,
        ids: &[i64],
        status: JdMappingStatus,
    ) -> Result<u64, StoreError> {
        self.begin_write()?;
        let mut touched = 0;
        for app in self.applications.lock().await.iter_mut() {
            if ids.contains(&app.id) {
                app.jd_mapping = status.as_str().to_string();
                touched += 1;
            }
        }
        Ok(touched)
    }

    async fn list_match_results(&self) -> Result<Vec<MatchResultRow>, StoreError> {
        let mut rows = self.match_results.lock().await.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn list_screenings(&self) -> Result<Vec<ScreeningRow>, StoreError> {
        let mut rows = self.screenings.lock().await.clone();
        rows.sort_by(|a, b| b.screened_at.cmp(&a.screened_at));
        Ok(rows)
    }

    async fn count(&self, collection: Collection) -> Result<i64, StoreError> {
        let n = match collection {
            Collection::Jobs => self.jobs.lock().await.len(),
            Collection::Applications => self.applications.lock().await.len(),
        };
        Ok(n as i64)
    }

    async fn count_screenings_with_outcome(&self, outcomes: &[&str]) -> Result<i64, StoreError> {
        let n = self
            .screenings
            .lock()
            .await
            .iter()
            .filter_map(|s| s.screening_outcome.as_deref())
            .filter(|o| outcomes.iter().any(|w| w.eq_ignore_ascii_case(o.trim())))
            .count();
        Ok(n as i64)
    }

    async fn count_queue_with_status(&self, status: &str) -> Result<i64, StoreError> {
        let n = self.queue.lock().await.iter().filter(|s| *s == status).count();
        Ok(n as i64)
    }

    async fn list_roles(&self, user_id: Uuid) -> Result<Vec<UserRoleRow>, StoreError> {
        Ok(self
            .roles
            .lock()
            .await
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}
