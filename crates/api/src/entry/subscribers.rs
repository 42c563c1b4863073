use super::{
    create_entry::CreateEntryUseCase, set_entry_status::SetEntryStatusUseCase,
    update_entry::UpdateEntryUseCase,
};
use crate::reminder::schedule_reminders;
use crate::shared::usecase::Subscriber;
use todo_schedule_domain::Entry;
use todo_schedule_infra::TodoContext;

pub struct ScheduleRemindersOnEntryCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateEntryUseCase> for ScheduleRemindersOnEntryCreated {
    async fn notify(&self, e: &Entry, ctx: &TodoContext) {
        schedule_reminders(e, ctx).await;
    }
}

/// Also runs when the reminders were removed so that stale jobs are cancelled
pub struct ScheduleRemindersOnEntryUpdated;

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateEntryUseCase> for ScheduleRemindersOnEntryUpdated {
    async fn notify(&self, e: &Entry, ctx: &TodoContext) {
        schedule_reminders(e, ctx).await;
    }
}

pub struct ScheduleRemindersOnStatusChanged;

#[async_trait::async_trait(?Send)]
impl Subscriber<SetEntryStatusUseCase> for ScheduleRemindersOnStatusChanged {
    async fn notify(&self, e: &Entry, ctx: &TodoContext) {
        schedule_reminders(e, ctx).await;
    }
}
