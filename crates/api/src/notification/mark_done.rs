use crate::shared::usecase::UseCase;
use todo_schedule_domain::{Entry, Status, ID};
use todo_schedule_infra::{EntryChange, TodoContext};
use tracing::error;

/// The user pressed "mark done" on a reminder notification.
///
/// Pending reminder jobs of the `Entry` are left alone, they are
/// suppressed when they fire because the `Entry` is done.
#[derive(Debug)]
pub struct MarkDoneUseCase {
    pub entry_id: ID,
    pub notification_id: i32,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl MarkDoneUseCase {
    async fn mark_done(&self, ctx: &TodoContext) -> Result<Option<Entry>, UseCaseError> {
        let mut entry = match ctx.repos.entries.find(self.entry_id).await {
            Ok(Some(entry)) => entry,
            Ok(None) => return Ok(None),
            Err(e) => {
                error!("Unable to read entry: {}. Err: {:?}", self.entry_id, e);
                return Err(UseCaseError::StorageError);
            }
        };
        entry.status = Status::Done;
        entry.updated = ctx.sys.get_timestamp_millis();
        let entry = ctx.repos.entries.upsert(&entry).await.map_err(|e| {
            error!("Unable to mark entry: {} as done. Err: {:?}", self.entry_id, e);
            UseCaseError::StorageError
        })?;
        ctx.entry_feed.publish(EntryChange::Entry(entry.id));
        Ok(Some(entry))
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for MarkDoneUseCase {
    /// `None` if the `Entry` does not exist
    type Response = Option<Entry>;

    type Error = UseCaseError;

    const NAME: &'static str = "MarkDone";

    async fn execute(&mut self, ctx: &TodoContext) -> Result<Self::Response, Self::Error> {
        let res = self.mark_done(ctx).await;

        // Cancelled even if the store write failed
        if let Err(e) = ctx.notifier.cancel(self.notification_id).await {
            error!(
                "Unable to cancel notification: {}. Err: {:?}",
                self.notification_id, e
            );
        }

        res
    }
}
