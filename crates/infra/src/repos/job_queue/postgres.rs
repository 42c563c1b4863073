use super::IJobQueue;
use sqlx::{types::Uuid, FromRow, PgPool};
use todo_schedule_domain::{JobGroup, JobName, ReminderJobPayload, ScheduledJob, ID};

pub struct PostgresJobQueue {
    pool: PgPool,
}

impl PostgresJobQueue {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct JobRaw {
    job_uid: Uuid,
    job_name: String,
    job_group: String,
    entry_uid: Option<i64>,
    title: Option<String>,
    description: Option<String>,
    run_at: i64,
    attempts: i32,
}

impl From<JobRaw> for ScheduledJob {
    fn from(job: JobRaw) -> Self {
        ScheduledJob {
            id: job.job_uid,
            name: job.job_name.into(),
            group: job.job_group.into(),
            payload: ReminderJobPayload {
                entry_id: job.entry_uid.map(ID::new),
                title: job.title,
                description: job.description,
            },
            run_at: job.run_at,
            attempts: job.attempts,
        }
    }
}

#[async_trait::async_trait]
impl IJobQueue for PostgresJobQueue {
    async fn submit(&self, job: &ScheduledJob) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminder_jobs
            (job_uid, job_name, job_group, entry_uid, title, description, run_at, attempts)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (job_name) DO UPDATE SET
                job_uid = EXCLUDED.job_uid,
                job_group = EXCLUDED.job_group,
                entry_uid = EXCLUDED.entry_uid,
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                run_at = EXCLUDED.run_at,
                attempts = EXCLUDED.attempts
            "#,
        )
        .bind(job.id)
        .bind(job.name.as_str())
        .bind(job.group.as_str())
        .bind(job.payload.entry_id.map(|id| id.inner()))
        .bind(&job.payload.title)
        .bind(&job.payload.description)
        .bind(job.run_at)
        .bind(job.attempts)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn cancel_by_name(&self, name: &JobName) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM reminder_jobs WHERE job_name = $1")
            .bind(name.as_str())
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    async fn cancel_by_group(&self, group: &JobGroup) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM reminder_jobs WHERE job_group = $1")
            .bind(group.as_str())
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    async fn cancel_by_group_prefix(&self, prefix: &str) -> anyhow::Result<u64> {
        // `LIKE` would treat the underscore in the prefixes as a wildcard
        let res = sqlx::query(
            "DELETE FROM reminder_jobs WHERE left(job_group, char_length($1)) = $1",
        )
        .bind(prefix)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected())
    }

    async fn claim_due(&self, now: i64, lease_until: i64) -> anyhow::Result<Vec<ScheduledJob>> {
        let jobs: Vec<JobRaw> = sqlx::query_as(
            r#"
            UPDATE reminder_jobs AS j
            SET run_at = $2, attempts = j.attempts + 1
            WHERE j.run_at <= $1
            RETURNING *
            "#,
        )
        .bind(now)
        .bind(lease_until)
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs.into_iter().map(|job| job.into()).collect())
    }

    async fn complete(&self, job_id: &Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM reminder_jobs WHERE job_uid = $1")
            .bind(job_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn reschedule(&self, job_id: &Uuid, run_at: i64) -> anyhow::Result<()> {
        sqlx::query("UPDATE reminder_jobs SET run_at = $2 WHERE job_uid = $1")
            .bind(job_id)
            .bind(run_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_by_name(&self, name: &JobName) -> anyhow::Result<Option<ScheduledJob>> {
        let job: Option<JobRaw> =
            sqlx::query_as("SELECT * FROM reminder_jobs AS j WHERE j.job_name = $1")
                .bind(name.as_str())
                .fetch_optional(&self.pool)
                .await?;
        Ok(job.map(|job| job.into()))
    }

    async fn find_by_group(&self, group: &JobGroup) -> anyhow::Result<Vec<ScheduledJob>> {
        let jobs: Vec<JobRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminder_jobs AS j
            WHERE j.job_group = $1
            ORDER BY j.run_at ASC
            "#,
        )
        .bind(group.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs.into_iter().map(|job| job.into()).collect())
    }
}
