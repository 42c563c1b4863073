use crate::error::TodoScheduleError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use todo_schedule_api_structs::get_upcoming_entries::*;
use todo_schedule_domain::Entry;
use todo_schedule_infra::TodoContext;

pub async fn get_upcoming_entries_controller(
    query_params: web::Query<QueryParams>,
    ctx: web::Data<TodoContext>,
) -> Result<HttpResponse, TodoScheduleError> {
    let usecase = GetUpcomingEntriesUseCase {
        limit: query_params.limit,
    };

    execute(usecase, &ctx)
        .await
        .map(|entries| HttpResponse::Ok().json(APIResponse::new(entries)))
        .map_err(|_| TodoScheduleError::InternalError)
}

/// Open entries that have a due or start time, most important first
#[derive(Debug)]
pub struct GetUpcomingEntriesUseCase {
    pub limit: Option<usize>,
}

impl GetUpcomingEntriesUseCase {
    const DEFAULT_LIMIT: usize = 10;
    const MAX_LIMIT: usize = 100;

    fn limit(&self) -> usize {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .min(Self::MAX_LIMIT)
    }
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUpcomingEntriesUseCase {
    type Response = Vec<Entry>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUpcomingEntries";

    async fn execute(&mut self, ctx: &TodoContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .entries
            .find_upcoming(self.limit())
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::testing::{insert_entry, setup, HOUR};
    use todo_schedule_domain::Priority;

    #[test]
    fn limit_is_bounded() {
        assert_eq!(GetUpcomingEntriesUseCase { limit: None }.limit(), 10);
        assert_eq!(GetUpcomingEntriesUseCase { limit: Some(3) }.limit(), 3);
        assert_eq!(GetUpcomingEntriesUseCase { limit: Some(1000) }.limit(), 100);
    }

    #[actix_web::main]
    #[test]
    async fn orders_by_priority_then_time() {
        let test = setup();
        let sooner = insert_entry(&test.ctx, "Sooner", HOUR, &[]).await;
        let mut important = insert_entry(&test.ctx, "Important", 3 * HOUR, &[]).await;
        important.priority = Priority::High;
        test.ctx.repos.entries.upsert(&important).await.unwrap();
        let later = insert_entry(&test.ctx, "Later", 2 * HOUR, &[]).await;

        let usecase = GetUpcomingEntriesUseCase { limit: Some(2) };
        let entries = execute(usecase, &test.ctx).await.unwrap();

        assert_eq!(
            entries.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![important.id, sooner.id]
        );
        assert!(entries.iter().all(|e| e.id != later.id));
    }
}
