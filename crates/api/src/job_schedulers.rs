use crate::{reminder::deliver_reminder::DeliverReminderUseCase, shared::usecase::execute};
use actix_web::rt::time::interval;
use std::time::Duration;
use todo_schedule_domain::ScheduledJob;
use todo_schedule_infra::TodoContext;
use tracing::{error, warn};

/// Delay before the next execution of a job that failed `attempts` times
pub fn get_retry_delay(backoff_millis: i64, attempts: i32) -> i64 {
    let exponent = (attempts.max(1) - 1).min(16) as u32;
    backoff_millis * 2_i64.pow(exponent)
}

pub fn start_reminder_job_runner(ctx: TodoContext) {
    actix_web::rt::spawn(async move {
        let poll_interval = Duration::from_millis(ctx.config.job_poll_interval_millis.max(1) as u64);
        let mut poll_interval = interval(poll_interval);
        loop {
            poll_interval.tick().await;
            run_due_jobs(&ctx).await;
        }
    });
}

/// Executes every job that is due. Returns the number of jobs executed.
pub async fn run_due_jobs(ctx: &TodoContext) -> usize {
    let now = ctx.sys.get_timestamp_millis();
    let lease_until = now + ctx.config.job_lease_millis;
    let jobs = match ctx.repos.jobs.claim_due(now, lease_until).await {
        Ok(jobs) => jobs,
        Err(e) => {
            error!("Unable to claim due reminder jobs. Err: {:?}", e);
            return 0;
        }
    };

    let count = jobs.len();
    for job in jobs {
        run_job(job, ctx).await;
    }
    count
}

async fn run_job(job: ScheduledJob, ctx: &TodoContext) {
    let usecase = DeliverReminderUseCase {
        payload: job.payload.clone(),
    };
    if let Err(e) = execute(usecase, ctx).await {
        if e.is_retryable() {
            if job.attempts < ctx.config.job_max_attempts {
                let run_at = ctx.sys.get_timestamp_millis()
                    + get_retry_delay(ctx.config.job_retry_backoff_millis, job.attempts);
                if let Err(e) = ctx.repos.jobs.reschedule(&job.id, run_at).await {
                    // The lease runs out and the job is retried anyway
                    error!("Unable to reschedule job: {}. Err: {:?}", job.name, e);
                }
                return;
            }
            warn!(
                "Giving up on job: {} after {} attempts",
                job.name, job.attempts
            );
        }
    }

    if let Err(e) = ctx.repos.jobs.complete(&job.id).await {
        error!("Unable to complete job: {}. Err: {:?}", job.name, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::schedule_reminders;
    use crate::shared::testing::{insert_entry, setup, HOUR, MINUTE, NOW};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use todo_schedule_domain::{
        notification_id_for, Entry, EntryQuery, JobGroup, Status, ID,
    };
    use todo_schedule_infra::IEntryRepo;

    #[test]
    fn retry_delay_doubles() {
        assert_eq!(get_retry_delay(30, 0), 30);
        assert_eq!(get_retry_delay(30, 1), 30);
        assert_eq!(get_retry_delay(30, 2), 60);
        assert_eq!(get_retry_delay(30, 3), 120);
    }

    /// Entry store that fails to read the first `failures` times
    struct FlakyEntryRepo {
        inner: Arc<dyn IEntryRepo>,
        failures: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl IEntryRepo for FlakyEntryRepo {
        async fn upsert(&self, e: &Entry) -> anyhow::Result<Entry> {
            self.inner.upsert(e).await
        }
        async fn find(&self, entry_id: ID) -> anyhow::Result<Option<Entry>> {
            let remaining = self.failures.load(Ordering::SeqCst);
            if remaining > 0 {
                self.failures.store(remaining - 1, Ordering::SeqCst);
                return Err(anyhow::anyhow!("unavailable"));
            }
            self.inner.find(entry_id).await
        }
        async fn update_status(&self, entry_id: ID, status: Status, updated: i64) -> anyhow::Result<bool> {
            self.inner.update_status(entry_id, status, updated).await
        }
        async fn delete(&self, entry_id: ID) -> anyhow::Result<Option<Entry>> {
            self.inner.delete(entry_id).await
        }
        async fn delete_all(&self) -> anyhow::Result<u64> {
            self.inner.delete_all().await
        }
        async fn find_by_query(&self, query: &EntryQuery) -> anyhow::Result<Vec<Entry>> {
            self.inner.find_by_query(query).await
        }
        async fn find_upcoming(&self, limit: usize) -> anyhow::Result<Vec<Entry>> {
            self.inner.find_upcoming(limit).await
        }
        async fn search(&self, text: &str) -> anyhow::Result<Vec<Entry>> {
            self.inner.search(text).await
        }
    }

    #[actix_web::main]
    #[test]
    async fn runs_jobs_when_due() {
        let test = setup();
        let ctx = &test.ctx;
        let e = insert_entry(ctx, "Read paper", HOUR, &[15]).await;
        schedule_reminders(&e, ctx).await;

        assert_eq!(run_due_jobs(ctx).await, 0);
        test.sys.set(NOW + 45 * MINUTE);
        assert_eq!(run_due_jobs(ctx).await, 1);

        assert!(test.notifier.get_shown(notification_id_for(e.id)).is_some());
        let pending = ctx
            .repos
            .jobs
            .find_by_group(&JobGroup::reminders(e.id))
            .await
            .unwrap();
        assert!(pending.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn done_entry_fires_without_notification() {
        let test = setup();
        let ctx = &test.ctx;
        let e = insert_entry(ctx, "Pay rent", HOUR, &[15, 30]).await;
        schedule_reminders(&e, ctx).await;
        ctx.repos
            .entries
            .update_status(e.id, Status::Done, NOW)
            .await
            .unwrap();

        test.sys.set(NOW + HOUR);
        assert_eq!(run_due_jobs(ctx).await, 2);
        assert_eq!(test.notifier.show_calls(), 0);
    }

    #[actix_web::main]
    #[test]
    async fn retries_storage_failures_with_backoff() {
        let mut test = setup();
        let e = insert_entry(&test.ctx, "Pay rent", HOUR, &[15]).await;
        test.ctx.repos.entries = Arc::new(FlakyEntryRepo {
            inner: test.ctx.repos.entries.clone(),
            failures: AtomicUsize::new(1),
        });
        let ctx = &test.ctx;
        schedule_reminders(&e, ctx).await;

        test.sys.set(NOW + 45 * MINUTE);
        assert_eq!(run_due_jobs(ctx).await, 1);
        assert_eq!(test.notifier.show_calls(), 0);
        let pending = ctx
            .repos
            .jobs
            .find_by_group(&JobGroup::reminders(e.id))
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(
            pending[0].run_at,
            NOW + 45 * MINUTE + ctx.config.job_retry_backoff_millis
        );

        test.sys.set(pending[0].run_at);
        assert_eq!(run_due_jobs(ctx).await, 1);
        assert_eq!(test.notifier.show_calls(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn gives_up_after_max_attempts() {
        let mut test = setup();
        let e = insert_entry(&test.ctx, "Pay rent", HOUR, &[15]).await;
        test.ctx.repos.entries = Arc::new(FlakyEntryRepo {
            inner: test.ctx.repos.entries.clone(),
            failures: AtomicUsize::new(100),
        });
        let ctx = &test.ctx;
        schedule_reminders(&e, ctx).await;

        test.sys.set(NOW + 45 * MINUTE);
        let mut executions = 0;
        for _ in 0..10 {
            executions += run_due_jobs(ctx).await;
            // Far beyond any backoff
            test.sys.advance(24 * HOUR);
        }

        assert_eq!(executions as i32, ctx.config.job_max_attempts);
        assert_eq!(test.notifier.show_calls(), 0);
        let pending = ctx
            .repos
            .jobs
            .find_by_group(&JobGroup::reminders(e.id))
            .await
            .unwrap();
        assert!(pending.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn runs_leased_job_again_when_runner_died() {
        let test = setup();
        let ctx = &test.ctx;
        let e = insert_entry(ctx, "Pay rent", HOUR, &[15]).await;
        schedule_reminders(&e, ctx).await;

        // Claimed by a runner that never completes the job
        test.sys.set(NOW + 45 * MINUTE);
        let lease_until = NOW + 45 * MINUTE + ctx.config.job_lease_millis;
        let claimed = ctx
            .repos
            .jobs
            .claim_due(NOW + 45 * MINUTE, lease_until)
            .await
            .unwrap();
        assert_eq!(claimed.len(), 1);
        assert_eq!(run_due_jobs(ctx).await, 0);

        test.sys.set(lease_until);
        assert_eq!(run_due_jobs(ctx).await, 1);
        assert_eq!(test.notifier.show_calls(), 1);
    }
}
