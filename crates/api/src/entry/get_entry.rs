use crate::error::TodoScheduleError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use todo_schedule_api_structs::get_entry::*;
use todo_schedule_domain::{Entry, ID};
use todo_schedule_infra::TodoContext;

pub async fn get_entry_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<TodoContext>,
) -> Result<HttpResponse, TodoScheduleError> {
    let usecase = GetEntryUseCase {
        entry_id: path_params.entry_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|entry| HttpResponse::Ok().json(APIResponse::new(entry)))
        .map_err(|e| match e {
            UseCaseError::NotFound(entry_id) => TodoScheduleError::NotFound(format!(
                "The entry with id: {}, was not found.",
                entry_id
            )),
            UseCaseError::StorageError => TodoScheduleError::InternalError,
        })
}

#[derive(Debug)]
pub struct GetEntryUseCase {
    pub entry_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEntryUseCase {
    type Response = Entry;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEntry";

    async fn execute(&mut self, ctx: &TodoContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.entries.find(self.entry_id).await {
            Ok(Some(e)) => Ok(e),
            Ok(None) => Err(UseCaseError::NotFound(self.entry_id)),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}
