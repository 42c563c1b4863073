use crate::shared::usecase::UseCase;
use todo_schedule_domain::{Notification, ReminderJobPayload};
use todo_schedule_infra::{NotifyError, TodoContext};
use tracing::{error, info};

/// Runs when a reminder job fires. Shows a notification if and only if
/// the `Entry` still exists and is open at this instant.
#[derive(Debug)]
pub struct DeliverReminderUseCase {
    pub payload: ReminderJobPayload,
}

#[derive(Debug, PartialEq)]
pub enum DeliveryOutcome {
    Shown,
    SuppressedDone,
    EntryGone,
    /// The user does not allow notifications
    NotPermitted,
    PresentationFailed,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    MissingEntryId,
    StorageError,
}

impl UseCaseError {
    /// Whether running the job again later could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageError)
    }
}

fn non_blank(val: Option<String>) -> Option<String> {
    val.filter(|v| !v.trim().is_empty())
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeliverReminderUseCase {
    type Response = DeliveryOutcome;

    type Error = UseCaseError;

    const NAME: &'static str = "DeliverReminder";

    async fn execute(&mut self, ctx: &TodoContext) -> Result<Self::Response, Self::Error> {
        let entry_id = self
            .payload
            .valid_entry_id()
            .ok_or(UseCaseError::MissingEntryId)?;

        // The job payload might be stale, the store is the source of truth
        let entry = match ctx.repos.entries.find(entry_id).await {
            Ok(Some(entry)) => entry,
            Ok(None) => return Ok(DeliveryOutcome::EntryGone),
            Err(e) => {
                error!("Unable to read entry: {}. Err: {:?}", entry_id, e);
                return Err(UseCaseError::StorageError);
            }
        };
        if entry.is_done() {
            return Ok(DeliveryOutcome::SuppressedDone);
        }

        let title = non_blank(Some(entry.title))
            .or_else(|| non_blank(self.payload.title.clone()))
            .unwrap_or_default();
        let description =
            non_blank(entry.description).or_else(|| non_blank(self.payload.description.clone()));
        let notification = Notification::reminder(entry.id, title, description);

        match ctx.notifier.show(&notification).await {
            Ok(()) => Ok(DeliveryOutcome::Shown),
            Err(NotifyError::PermissionDenied) => {
                info!(
                    "Not permitted to show notification for entry: {}",
                    entry_id
                );
                Ok(DeliveryOutcome::NotPermitted)
            }
            Err(e) => {
                error!(
                    "Unable to show notification for entry: {}. Err: {:?}",
                    entry_id, e
                );
                Ok(DeliveryOutcome::PresentationFailed)
            }
        }
    }
}
