use crate::error::TodoScheduleError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use todo_schedule_api_structs::search_entries::*;
use todo_schedule_domain::Entry;
use todo_schedule_infra::TodoContext;

pub async fn search_entries_controller(
    query_params: web::Query<QueryParams>,
    ctx: web::Data<TodoContext>,
) -> Result<HttpResponse, TodoScheduleError> {
    let usecase = SearchEntriesUseCase {
        text: query_params.0.query,
    };

    execute(usecase, &ctx)
        .await
        .map(|entries| HttpResponse::Ok().json(APIResponse::new(entries)))
        .map_err(|_| TodoScheduleError::InternalError)
}

/// Case insensitive search in the title and description of every `Entry`
#[derive(Debug)]
pub struct SearchEntriesUseCase {
    pub text: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SearchEntriesUseCase {
    type Response = Vec<Entry>;

    type Error = UseCaseError;

    const NAME: &'static str = "SearchEntries";

    async fn execute(&mut self, ctx: &TodoContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .entries
            .search(self.text.trim())
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
