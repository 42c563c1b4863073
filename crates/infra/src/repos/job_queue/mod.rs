mod inmemory;
mod postgres;

pub use inmemory::InMemoryJobQueue;
pub use postgres::PostgresJobQueue;
use todo_schedule_domain::{JobGroup, JobName, ScheduledJob, Uuid};

/// Durable queue of delayed reminder jobs.
///
/// At most one job is pending per `JobName`. Jobs are executed at least
/// once: a claimed job is only leased and becomes due again if it is
/// neither completed nor rescheduled before the lease runs out.
#[async_trait::async_trait]
pub trait IJobQueue: Send + Sync {
    /// Inserts the job, replacing a pending job with the same name
    async fn submit(&self, job: &ScheduledJob) -> anyhow::Result<()>;
    async fn cancel_by_name(&self, name: &JobName) -> anyhow::Result<u64>;
    async fn cancel_by_group(&self, group: &JobGroup) -> anyhow::Result<u64>;
    async fn cancel_by_group_prefix(&self, prefix: &str) -> anyhow::Result<u64>;
    /// Leases every job with `run_at <= now` until `lease_until` and
    /// increments its attempt counter. Returns the leased jobs.
    async fn claim_due(&self, now: i64, lease_until: i64) -> anyhow::Result<Vec<ScheduledJob>>;
    /// Removes the given job submission. A job that has been replaced
    /// since it was claimed is left untouched.
    async fn complete(&self, job_id: &Uuid) -> anyhow::Result<()>;
    async fn reschedule(&self, job_id: &Uuid, run_at: i64) -> anyhow::Result<()>;
    async fn find_by_name(&self, name: &JobName) -> anyhow::Result<Option<ScheduledJob>>;
    async fn find_by_group(&self, group: &JobGroup) -> anyhow::Result<Vec<ScheduledJob>>;
}

#[cfg(test)]
mod tests {
    use crate::{setup_context, TodoContext};
    use todo_schedule_domain::{
        JobGroup, JobName, ReminderJobPayload, ScheduledJob, ID, REMINDER_JOB_PREFIX,
    };

    async fn create_contexts() -> Vec<TodoContext> {
        let mut ctxs = vec![TodoContext::create_inmemory()];
        if std::env::var("DATABASE_URL").is_ok() {
            ctxs.push(setup_context().await);
        }
        ctxs
    }

    fn job_factory(entry_id: i64, remind_at: i64) -> ScheduledJob {
        let entry_id = ID::new(entry_id);
        ScheduledJob::new(
            JobName::reminder(entry_id, remind_at),
            JobGroup::reminders(entry_id),
            ReminderJobPayload {
                entry_id: Some(entry_id),
                title: Some("Title".into()),
                description: None,
            },
            remind_at,
        )
    }

    #[tokio::test]
    #[serial_test::serial]
    async fn submit_replaces_by_name() {
        for ctx in create_contexts().await {
            let jobs = &ctx.repos.jobs;
            jobs.cancel_by_group_prefix("").await.unwrap();

            let first = job_factory(1, 1000);
            let second = job_factory(1, 1000);
            jobs.submit(&first).await.unwrap();
            jobs.submit(&second).await.unwrap();

            let pending = jobs.find_by_group(&JobGroup::reminders(ID::new(1))).await.unwrap();
            assert_eq!(pending.len(), 1);
            assert_eq!(pending[0].id, second.id);
        }
    }

    #[tokio::test]
    #[serial_test::serial]
    async fn cancels_by_name_group_and_prefix() {
        for ctx in create_contexts().await {
            let jobs = &ctx.repos.jobs;
            jobs.cancel_by_group_prefix("").await.unwrap();

            jobs.submit(&job_factory(1, 1000)).await.unwrap();
            jobs.submit(&job_factory(1, 2000)).await.unwrap();
            jobs.submit(&job_factory(12, 1000)).await.unwrap();
            jobs.submit(&job_factory(2, 1000)).await.unwrap();

            let removed = jobs
                .cancel_by_name(&JobName::reminder(ID::new(1), 2000))
                .await
                .unwrap();
            assert_eq!(removed, 1);
            let removed = jobs
                .cancel_by_group(&JobGroup::reminders(ID::new(1)))
                .await
                .unwrap();
            assert_eq!(removed, 1);
            // Group of entry 12 is not affected by cancelling entry 1
            assert_eq!(
                jobs.find_by_group(&JobGroup::reminders(ID::new(12)))
                    .await
                    .unwrap()
                    .len(),
                1
            );

            let removed = jobs.cancel_by_group_prefix(REMINDER_JOB_PREFIX).await.unwrap();
            assert_eq!(removed, 2);
        }
    }

    #[tokio::test]
    #[serial_test::serial]
    async fn claims_due_jobs_with_lease() {
        for ctx in create_contexts().await {
            let jobs = &ctx.repos.jobs;
            jobs.cancel_by_group_prefix("").await.unwrap();

            let due = job_factory(1, 1000);
            let later = job_factory(1, 5000);
            jobs.submit(&due).await.unwrap();
            jobs.submit(&later).await.unwrap();

            let claimed = jobs.claim_due(1000, 3000).await.unwrap();
            assert_eq!(claimed.len(), 1);
            assert_eq!(claimed[0].id, due.id);
            assert_eq!(claimed[0].attempts, 1);
            assert_eq!(claimed[0].run_at, 3000);

            // Leased, so not claimable again until the lease runs out
            assert!(jobs.claim_due(2000, 4000).await.unwrap().is_empty());
            let reclaimed = jobs.claim_due(3000, 6000).await.unwrap();
            assert_eq!(reclaimed.len(), 1);
            assert_eq!(reclaimed[0].attempts, 2);

            jobs.complete(&due.id).await.unwrap();
            assert!(jobs.find_by_name(&due.name).await.unwrap().is_none());

            jobs.reschedule(&later.id, 100).await.unwrap();
            let claimed = jobs.claim_due(100, 200).await.unwrap();
            assert_eq!(claimed.len(), 1);
            assert_eq!(claimed[0].id, later.id);
        }
    }

    #[tokio::test]
    #[serial_test::serial]
    async fn complete_keeps_replacement() {
        for ctx in create_contexts().await {
            let jobs = &ctx.repos.jobs;
            jobs.cancel_by_group_prefix("").await.unwrap();

            let job = job_factory(3, 1000);
            jobs.submit(&job).await.unwrap();
            let claimed = jobs.claim_due(1000, 2000).await.unwrap();
            assert_eq!(claimed.len(), 1);

            let replacement = job_factory(3, 1000);
            jobs.submit(&replacement).await.unwrap();
            jobs.complete(&job.id).await.unwrap();

            let pending = jobs.find_by_name(&job.name).await.unwrap().unwrap();
            assert_eq!(pending.id, replacement.id);
            assert_eq!(pending.attempts, 0);
        }
    }
}
