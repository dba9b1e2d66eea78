use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use tracing::info;

struct Migration {
    id: i32,
    description: &'static str,
    sql: &'static str,
}

/// Schema migrations, applied in order. Never edit an applied entry; append a new one.
const MIGRATIONS: &[Migration] = &[
    Migration {
        id: 1,
        description: "recruiting collections",
        sql: r#"
CREATE TABLE IF NOT EXISTS jobs (
    id                 BIGSERIAL PRIMARY KEY,
    created_at         TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    role_code          TEXT NOT NULL,
    role_name          TEXT,
    status             TEXT NOT NULL DEFAULT 'active',
    location           TEXT,
    jd_url             TEXT,
    current_updates    TEXT,
    minimum_experience TEXT,
    duration           TEXT,
    monthly_ctc        TEXT,
    skills             TEXT
);

CREATE TABLE IF NOT EXISTS candidate_applications (
    id                        BIGSERIAL PRIMARY KEY,
    created_at                TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    application_id            TEXT,
    role_code                 TEXT,
    candidate_name            TEXT,
    email                     TEXT,
    contact_number            TEXT,
    experience_years          TEXT,
    relevant_experience_years TEXT,
    notice_period             TEXT,
    current_ctc               TEXT,
    expected_ctc              TEXT,
    current_location          TEXT,
    resume_url                TEXT,
    job_applied               TEXT,
    skills                    TEXT,
    documents                 TEXT,
    jd_mapping                TEXT NOT NULL DEFAULT 'NOT STARTED',
    screening_response        TEXT
);

CREATE TABLE IF NOT EXISTS cv_match_results (
    id               UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    created_at       TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    application_id   TEXT,
    role_code        TEXT,
    score            TEXT,
    missing_skills   TEXT,
    extracted_skills TEXT,
    jd_summary       TEXT,
    resume_summary   TEXT
);

CREATE TABLE IF NOT EXISTS screening_outcomes (
    id                 UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    screened_at        TIMESTAMPTZ,
    application_id     TEXT,
    candidate_name     TEXT,
    role_code          TEXT,
    job_title          TEXT,
    call_status        TEXT,
    call_duration_secs INTEGER,
    recording_link     TEXT,
    call_score         DOUBLE PRECISION,
    final_score        DOUBLE PRECISION,
    screening_outcome  TEXT,
    screening_summary  TEXT,
    rejection_reason   TEXT
);

CREATE TABLE IF NOT EXISTS screening_queue (
    id             UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    created_at     TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    application_id TEXT,
    role_code      TEXT,
    status         TEXT
);

CREATE TABLE IF NOT EXISTS user_roles (
    user_id UUID NOT NULL,
    role    TEXT NOT NULL,
    PRIMARY KEY (user_id, role)
);
"#,
    },
    Migration {
        id: 2,
        description: "uniqueness of role codes and (contact, role code) pairs",
        sql: r#"
DO $$
BEGIN
    IF NOT EXISTS (SELECT 1 FROM pg_constraint WHERE conname = 'uq_jobs_role_code') THEN
        ALTER TABLE jobs ADD CONSTRAINT uq_jobs_role_code UNIQUE (role_code);
    END IF;
    IF NOT EXISTS (SELECT 1 FROM pg_constraint WHERE conname = 'uq_applications_application_id') THEN
        ALTER TABLE candidate_applications
            ADD CONSTRAINT uq_applications_application_id UNIQUE (application_id);
    END IF;
    IF NOT EXISTS (SELECT 1 FROM pg_constraint WHERE conname = 'uq_applications_contact_role') THEN
        ALTER TABLE candidate_applications
            ADD CONSTRAINT uq_applications_contact_role UNIQUE (contact_number, role_code);
    END IF;
END $$;

CREATE INDEX IF NOT EXISTS idx_applications_jd_mapping ON candidate_applications (jd_mapping);
CREATE INDEX IF NOT EXISTS idx_match_results_application ON cv_match_results (application_id, role_code);
"#,
    },
];

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Applies every migration not yet recorded in `schema_migrations`.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            id          INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await
    .context("failed to create schema_migrations")?;

    for migration in MIGRATIONS {
        let already_applied: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM schema_migrations WHERE id = $1)")
                .bind(migration.id)
                .fetch_one(pool)
                .await?;

        if already_applied {
            continue;
        }

        let mut tx = pool.begin().await?;
        (&mut *tx)
            .execute(migration.sql)
            .await
            .with_context(|| format!("migration {} failed", migration.id))?;
        sqlx::query("INSERT INTO schema_migrations (id, description) VALUES ($1, $2)")
            .bind(migration.id)
            .bind(migration.description)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        info!(
            id = migration.id,
            description = migration.description,
            "applied migration"
        );
    }

    Ok(())
}
