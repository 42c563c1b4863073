use crate::shared::usecase::UseCase;
use todo_schedule_domain::{JobGroup, JobName, ReminderJobPayload, ScheduledJob, ID};
use todo_schedule_infra::TodoContext;
use tracing::error;

/// The user pressed "snooze" on a reminder notification. The reminder
/// is shown again after the snooze delay, replacing an earlier snooze
/// of the same `Entry`.
///
/// The snoozed reminder only lives in the job queue, it is not stored
/// as a `Reminder` of the `Entry`.
#[derive(Debug)]
pub struct SnoozeUseCase {
    pub entry_id: ID,
    pub title: Option<String>,
    pub notification_id: i32,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    MissingEntryId,
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SnoozeUseCase {
    type Response = ScheduledJob;

    type Error = UseCaseError;

    const NAME: &'static str = "Snooze";

    async fn execute(&mut self, ctx: &TodoContext) -> Result<Self::Response, Self::Error> {
        if let Err(e) = ctx.notifier.cancel(self.notification_id).await {
            error!(
                "Unable to cancel notification: {}. Err: {:?}",
                self.notification_id, e
            );
        }

        if self.entry_id.is_unset() {
            return Err(UseCaseError::MissingEntryId);
        }

        let run_at = ctx.sys.get_timestamp_millis() + ctx.config.snooze_millis;
        let job = ScheduledJob::new(
            JobName::snooze(self.entry_id),
            JobGroup::snooze(self.entry_id),
            ReminderJobPayload {
                entry_id: Some(self.entry_id),
                title: self.title.clone(),
                description: None,
            },
            run_at,
        );
        ctx.repos.jobs.submit(&job).await.map_err(|e| {
            error!("Unable to submit snooze job: {}. Err: {:?}", job.name, e);
            UseCaseError::StorageError
        })?;

        Ok(job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job_schedulers::run_due_jobs;
    use crate::reminder::schedule_reminders;
    use crate::shared::testing::{insert_entry, setup, HOUR, MINUTE, NOW};
    use todo_schedule_domain::{notification_id_for, Notification, Status};
    use todo_schedule_infra::INotifier;

    #[actix_web::main]
    #[test]
    async fn cancels_notification_and_submits_snooze_job() {
        let test = setup();
        let ctx = &test.ctx;
        let entry_id = ID::new(5);
        test.notifier
            .show(&Notification::reminder(entry_id, "Pay rent".into(), None))
            .await
            .unwrap();

        let mut usecase = SnoozeUseCase {
            entry_id,
            title: Some("Pay rent".into()),
            notification_id: 5,
        };
        let job = usecase.execute(ctx).await.unwrap();

        assert!(test.notifier.get_shown(5).is_none());
        assert_eq!(job.name.as_str(), "snooze_5");
        assert_eq!(job.run_at, NOW + 10 * MINUTE);
        assert_eq!(job.payload.entry_id, Some(entry_id));
        assert_eq!(job.payload.title.as_deref(), Some("Pay rent"));
        let pending = ctx
            .repos
            .jobs
            .find_by_name(&JobName::snooze(entry_id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(pending.id, job.id);
    }

    #[actix_web::main]
    #[test]
    async fn second_snooze_replaces_first() {
        let test = setup();
        let ctx = &test.ctx;
        let entry_id = ID::new(5);

        let mut usecase = SnoozeUseCase {
            entry_id,
            title: Some("Pay rent".into()),
            notification_id: 5,
        };
        usecase.execute(ctx).await.unwrap();
        test.sys.advance(3 * MINUTE);
        usecase.execute(ctx).await.unwrap();

        let pending = ctx
            .repos
            .jobs
            .find_by_group(&JobGroup::snooze(entry_id))
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].run_at, NOW + 13 * MINUTE);
    }

    #[actix_web::main]
    #[test]
    async fn snoozed_reminder_is_shown_again_while_open() {
        let test = setup();
        let ctx = &test.ctx;
        let e = insert_entry(ctx, "Pay rent", HOUR, &[]).await;

        let mut usecase = SnoozeUseCase {
            entry_id: e.id,
            title: Some(e.title.clone()),
            notification_id: notification_id_for(e.id),
        };
        usecase.execute(ctx).await.unwrap();

        test.sys.advance(10 * MINUTE);
        assert_eq!(run_due_jobs(ctx).await, 1);
        assert!(test.notifier.get_shown(notification_id_for(e.id)).is_some());
    }

    #[actix_web::main]
    #[test]
    async fn snoozed_reminder_is_suppressed_when_done() {
        let test = setup();
        let ctx = &test.ctx;
        let e = insert_entry(ctx, "Pay rent", HOUR, &[]).await;

        let mut usecase = SnoozeUseCase {
            entry_id: e.id,
            title: Some(e.title.clone()),
            notification_id: notification_id_for(e.id),
        };
        usecase.execute(ctx).await.unwrap();
        ctx.repos
            .entries
            .update_status(e.id, Status::Done, NOW)
            .await
            .unwrap();

        test.sys.advance(10 * MINUTE);
        assert_eq!(run_due_jobs(ctx).await, 1);
        assert_eq!(test.notifier.show_calls(), 0);
    }

    #[actix_web::main]
    #[test]
    async fn editing_entry_keeps_pending_snooze() {
        let test = setup();
        let ctx = &test.ctx;
        let e = insert_entry(ctx, "Pay rent", HOUR, &[15]).await;
        let mut usecase = SnoozeUseCase {
            entry_id: e.id,
            title: None,
            notification_id: notification_id_for(e.id),
        };
        usecase.execute(ctx).await.unwrap();

        schedule_reminders(&e, ctx).await;

        let snooze = ctx.repos.jobs.find_by_name(&JobName::snooze(e.id)).await.unwrap();
        assert!(snooze.is_some());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_unset_entry_id() {
        let test = setup();
        let mut usecase = SnoozeUseCase {
            entry_id: ID::unset(),
            title: None,
            notification_id: 0,
        };
        assert_eq!(
            usecase.execute(&test.ctx).await.unwrap_err(),
            UseCaseError::MissingEntryId
        );
        assert_eq!(test.notifier.cancel_calls(), 1);
    }
}
