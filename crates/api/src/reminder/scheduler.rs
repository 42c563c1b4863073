use todo_schedule_domain::{
    Entry, JobGroup, JobName, ReminderJobPayload, ScheduledJob, ID, REMINDER_JOB_PREFIX,
    SNOOZE_JOB_PREFIX,
};
use todo_schedule_infra::TodoContext;
use tracing::{error, warn};

/// Makes the job queue hold exactly one pending job for every reminder of
/// the `Entry` that is still in the future, and none for past or removed
/// reminders.
///
/// Failures are logged and not returned, there is nothing the caller
/// could do about them.
#[tracing::instrument(name = "Scheduling reminders", skip_all, fields(entry_id = %entry.id))]
pub async fn schedule_reminders(entry: &Entry, ctx: &TodoContext) {
    if !entry.is_persisted() {
        warn!("Unable to schedule reminders for an entry that is not persisted");
        return;
    }

    cancel_reminders(entry.id, ctx).await;

    let group = JobGroup::reminders(entry.id);
    let now = ctx.sys.get_timestamp_millis();
    for reminder in &entry.reminders {
        // Past reminders are never scheduled
        if reminder.delay_from(now) <= 0 {
            continue;
        }
        let job = ScheduledJob::new(
            JobName::reminder(entry.id, reminder.remind_at),
            group.clone(),
            ReminderJobPayload {
                entry_id: Some(entry.id),
                title: Some(entry.title.clone()),
                description: entry.description.clone(),
            },
            reminder.remind_at,
        );
        if let Err(e) = ctx.repos.jobs.submit(&job).await {
            error!("Unable to submit reminder job: {}. Err: {:?}", job.name, e);
        }
    }
}

/// Cancels every pending reminder job of the `Entry`
pub async fn cancel_reminders(entry_id: ID, ctx: &TodoContext) {
    if let Err(e) = ctx
        .repos
        .jobs
        .cancel_by_group(&JobGroup::reminders(entry_id))
        .await
    {
        error!(
            "Unable to cancel reminder jobs for entry: {}. Err: {:?}",
            entry_id, e
        );
    }
}

/// Cancels the pending snoozed reminder of the `Entry`, if any
pub async fn cancel_snooze(entry_id: ID, ctx: &TodoContext) {
    if let Err(e) = ctx.repos.jobs.cancel_by_name(&JobName::snooze(entry_id)).await {
        error!(
            "Unable to cancel snooze job for entry: {}. Err: {:?}",
            entry_id, e
        );
    }
}

/// Cancels every pending reminder and snooze job
pub async fn cancel_all_reminders(ctx: &TodoContext) {
    for prefix in [REMINDER_JOB_PREFIX, SNOOZE_JOB_PREFIX].iter() {
        if let Err(e) = ctx.repos.jobs.cancel_by_group_prefix(prefix).await {
            error!("Unable to cancel jobs with prefix: {}. Err: {:?}", prefix, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::testing::{insert_entry, setup, HOUR, MINUTE, NOW};
    use todo_schedule_domain::{Entry, EntryType, ReminderOffset};

    #[actix_web::main]
    #[test]
    async fn schedules_one_job_per_future_reminder() {
        let ctx = setup().ctx;
        let e = insert_entry(&ctx, "Read paper", HOUR, &[15]).await;

        schedule_reminders(&e, &ctx).await;

        let jobs = ctx
            .repos
            .jobs
            .find_by_group(&JobGroup::reminders(e.id))
            .await
            .unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].name, JobName::reminder(e.id, NOW + 45 * MINUTE));
        assert_eq!(jobs[0].run_at - NOW, 45 * MINUTE);
        assert_eq!(jobs[0].payload.entry_id, Some(e.id));
        assert_eq!(jobs[0].payload.title.as_deref(), Some("Read paper"));
    }

    #[actix_web::main]
    #[test]
    async fn never_schedules_past_reminders() {
        let ctx = setup().ctx;
        // Reminders at now - 30 minutes, exactly now and now + 20 minutes
        let e = insert_entry(&ctx, "Shift", 30 * MINUTE, &[60, 30, 10]).await;

        schedule_reminders(&e, &ctx).await;

        let jobs = ctx
            .repos
            .jobs
            .find_by_group(&JobGroup::reminders(e.id))
            .await
            .unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].run_at, NOW + 20 * MINUTE);
    }

    #[actix_web::main]
    #[test]
    async fn rescheduling_replaces_instead_of_duplicating() {
        let ctx = setup().ctx;
        let e = insert_entry(&ctx, "Essay", 2 * HOUR, &[15, 60]).await;

        schedule_reminders(&e, &ctx).await;
        schedule_reminders(&e, &ctx).await;

        let jobs = ctx
            .repos
            .jobs
            .find_by_group(&JobGroup::reminders(e.id))
            .await
            .unwrap();
        assert_eq!(jobs.len(), 2);
    }

    #[actix_web::main]
    #[test]
    async fn rescheduling_drops_removed_reminders() {
        let ctx = setup().ctx;
        let mut e = insert_entry(&ctx, "Essay", 2 * HOUR, &[15, 60]).await;
        schedule_reminders(&e, &ctx).await;

        e.set_reminder_offsets(&[ReminderOffset(30)]);
        let e = ctx.repos.entries.upsert(&e).await.unwrap();
        schedule_reminders(&e, &ctx).await;

        let jobs = ctx
            .repos
            .jobs
            .find_by_group(&JobGroup::reminders(e.id))
            .await
            .unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].run_at, NOW + 90 * MINUTE);
    }

    #[actix_web::main]
    #[test]
    async fn ignores_unpersisted_entry() {
        let ctx = setup().ctx;
        let mut e = Entry::new(EntryType::Event, "Party".into(), NOW);
        e.start_at = Some(NOW + HOUR);
        e.set_reminder_offsets(&[ReminderOffset(15)]);

        schedule_reminders(&e, &ctx).await;

        let claimed = ctx.repos.jobs.claim_due(NOW + 2 * HOUR, NOW + 3 * HOUR).await.unwrap();
        assert!(claimed.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn cancels_group_of_entry_only() {
        let ctx = setup().ctx;
        let e1 = insert_entry(&ctx, "One", HOUR, &[15]).await;
        let e2 = insert_entry(&ctx, "Two", HOUR, &[15]).await;
        schedule_reminders(&e1, &ctx).await;
        schedule_reminders(&e2, &ctx).await;

        cancel_reminders(e1.id, &ctx).await;

        let claimed = ctx.repos.jobs.claim_due(NOW + HOUR, NOW + 2 * HOUR).await.unwrap();
        assert_eq!(claimed.len(), 1);
        assert_eq!(claimed[0].payload.entry_id, Some(e2.id));
    }

    #[actix_web::main]
    #[test]
    async fn cancels_all_reminders_and_snoozes() {
        let ctx = setup().ctx;
        let e = insert_entry(&ctx, "One", HOUR, &[15]).await;
        schedule_reminders(&e, &ctx).await;
        let snooze = ScheduledJob::new(
            JobName::snooze(e.id),
            JobGroup::snooze(e.id),
            ReminderJobPayload {
                entry_id: Some(e.id),
                title: None,
                description: None,
            },
            NOW + 10 * MINUTE,
        );
        ctx.repos.jobs.submit(&snooze).await.unwrap();

        cancel_all_reminders(&ctx).await;

        let claimed = ctx.repos.jobs.claim_due(NOW + HOUR, NOW + 2 * HOUR).await.unwrap();
        assert!(claimed.is_empty());
    }
}
