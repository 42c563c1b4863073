use super::IJobQueue;
use crate::repos::shared::inmemory_repo::*;
use std::sync::Mutex;
use todo_schedule_domain::{JobGroup, JobName, ScheduledJob, Uuid};

pub struct InMemoryJobQueue {
    jobs: Mutex<Vec<ScheduledJob>>,
}

impl InMemoryJobQueue {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryJobQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IJobQueue for InMemoryJobQueue {
    async fn submit(&self, job: &ScheduledJob) -> anyhow::Result<()> {
        replace_or_insert(job, &self.jobs, |pending| pending.name == job.name);
        Ok(())
    }

    async fn cancel_by_name(&self, name: &JobName) -> anyhow::Result<u64> {
        Ok(find_and_delete_by(&self.jobs, |job| job.name == *name).len() as u64)
    }

    async fn cancel_by_group(&self, group: &JobGroup) -> anyhow::Result<u64> {
        Ok(find_and_delete_by(&self.jobs, |job| job.group == *group).len() as u64)
    }

    async fn cancel_by_group_prefix(&self, prefix: &str) -> anyhow::Result<u64> {
        Ok(find_and_delete_by(&self.jobs, |job| job.group.has_prefix(prefix)).len() as u64)
    }

    async fn claim_due(&self, now: i64, lease_until: i64) -> anyhow::Result<Vec<ScheduledJob>> {
        Ok(update_many(
            &self.jobs,
            |job| job.run_at <= now,
            |job| {
                job.run_at = lease_until;
                job.attempts += 1;
            },
        ))
    }

    async fn complete(&self, job_id: &Uuid) -> anyhow::Result<()> {
        find_and_delete_by(&self.jobs, |job| job.id == *job_id);
        Ok(())
    }

    async fn reschedule(&self, job_id: &Uuid, run_at: i64) -> anyhow::Result<()> {
        update_many(&self.jobs, |job| job.id == *job_id, |job| job.run_at = run_at);
        Ok(())
    }

    async fn find_by_name(&self, name: &JobName) -> anyhow::Result<Option<ScheduledJob>> {
        Ok(find_one_by(&self.jobs, |job| job.name == *name))
    }

    async fn find_by_group(&self, group: &JobGroup) -> anyhow::Result<Vec<ScheduledJob>> {
        let mut jobs = find_by(&self.jobs, |job| job.group == *group);
        jobs.sort_by_key(|job| job.run_at);
        Ok(jobs)
    }
}
