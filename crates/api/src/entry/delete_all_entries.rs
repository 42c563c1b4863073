use crate::error::TodoScheduleError;
use crate::reminder::cancel_all_reminders;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use todo_schedule_api_structs::delete_all_entries::*;
use todo_schedule_infra::{EntryChange, TodoContext};

pub async fn delete_all_entries_controller(
    ctx: web::Data<TodoContext>,
) -> Result<HttpResponse, TodoScheduleError> {
    execute(DeleteAllEntriesUseCase {}, &ctx)
        .await
        .map(|deleted| HttpResponse::Ok().json(APIResponse { deleted }))
        .map_err(TodoScheduleError::from)
}

/// Wipes every `Entry` together with every pending reminder
#[derive(Debug)]
pub struct DeleteAllEntriesUseCase {}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for TodoScheduleError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteAllEntriesUseCase {
    type Response = u64;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteAllEntries";

    async fn execute(&mut self, ctx: &TodoContext) -> Result<Self::Response, Self::Error> {
        cancel_all_reminders(ctx).await;

        let deleted = ctx
            .repos
            .entries
            .delete_all()
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        ctx.entry_feed.publish(EntryChange::All);

        Ok(deleted)
    }
}
