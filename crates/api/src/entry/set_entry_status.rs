use super::subscribers::ScheduleRemindersOnStatusChanged;
use crate::error::TodoScheduleError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use todo_schedule_api_structs::set_entry_status::*;
use todo_schedule_domain::{Entry, Status, ID};
use todo_schedule_infra::{EntryChange, TodoContext};

pub async fn set_entry_status_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<TodoContext>,
) -> Result<HttpResponse, TodoScheduleError> {
    let usecase = SetEntryStatusUseCase {
        entry_id: path_params.entry_id,
        status: body.status,
    };

    execute(usecase, &ctx)
        .await
        .map(|entry| HttpResponse::Ok().json(APIResponse::new(entry)))
        .map_err(TodoScheduleError::from)
}

#[derive(Debug)]
pub struct SetEntryStatusUseCase {
    pub entry_id: ID,
    pub status: Status,
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
impl UseCase for SetEntryStatusUseCase {
    type Response = Entry;

    type Error = UseCaseError;

    const NAME: &'static str = "SetEntryStatus";

    async fn execute(&mut self, ctx: &TodoContext) -> Result<Self::Response, Self::Error> {
        let updated = ctx
            .repos
            .entries
            .update_status(self.entry_id, self.status, ctx.sys.get_timestamp_millis())
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if !updated {
            return Err(UseCaseError::NotFound(self.entry_id));
        }
        ctx.entry_feed.publish(EntryChange::Entry(self.entry_id));

        match ctx.repos.entries.find(self.entry_id).await {
            Ok(Some(e)) => Ok(e),
            // Deleted in the meantime
            Ok(None) => Err(UseCaseError::NotFound(self.entry_id)),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(ScheduleRemindersOnStatusChanged)]
    }
}
