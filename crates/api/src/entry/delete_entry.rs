use crate::error::TodoScheduleError;
use crate::reminder::{cancel_reminders, cancel_snooze};
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use todo_schedule_api_structs::delete_entry::*;
use todo_schedule_domain::{Entry, ID};
use todo_schedule_infra::{EntryChange, TodoContext};

pub async fn delete_entry_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<TodoContext>,
) -> Result<HttpResponse, TodoScheduleError> {
    let usecase = DeleteEntryUseCase {
        entry_id: path_params.entry_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|entry| HttpResponse::Ok().json(APIResponse::new(entry)))
        .map_err(TodoScheduleError::from)
}

#[derive(Debug)]
pub struct DeleteEntryUseCase {
    pub entry_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for TodoScheduleError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(entry_id) => Self::NotFound(format!(
                "The entry with id: {}, was not found.",
                entry_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteEntryUseCase {
    type Response = Entry;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteEntry";

    async fn execute(&mut self, ctx: &TodoContext) -> Result<Self::Response, Self::Error> {
        cancel_reminders(self.entry_id, ctx).await;
        cancel_snooze(self.entry_id, ctx).await;

        let e = ctx
            .repos
            .entries
            .delete(self.entry_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or(UseCaseError::NotFound(self.entry_id))?;
        ctx.entry_feed.publish(EntryChange::Entry(e.id));

        Ok(e)
    }
}
