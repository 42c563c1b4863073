use crate::error::TodoScheduleError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use todo_schedule_api_structs::list_entries::*;
use todo_schedule_domain::{Entry, EntryQuery};
use todo_schedule_infra::TodoContext;

pub async fn list_entries_controller(
    query_params: web::Query<QueryParams>,
    ctx: web::Data<TodoContext>,
) -> Result<HttpResponse, TodoScheduleError> {
    let usecase = ListEntriesUseCase {
        query: EntryQuery {
            entry_type: query_params.entry_type,
            status: query_params.status,
            priority: query_params.priority,
        },
    };

    execute(usecase, &ctx)
        .await
        .map(|entries| HttpResponse::Ok().json(APIResponse::new(entries)))
        .map_err(|_| TodoScheduleError::InternalError)
}

#[derive(Debug)]
pub struct ListEntriesUseCase {
    pub query: EntryQuery,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ListEntriesUseCase {
    type Response = Vec<Entry>;

    type Error = UseCaseError;

    const NAME: &'static str = "ListEntries";

    async fn execute(&mut self, ctx: &TodoContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .entries
            .find_by_query(&self.query)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::testing::{insert_entry, setup, HOUR};
    use todo_schedule_domain::{Priority, Status};

    #[actix_web::main]
    #[test]
    async fn lists_soonest_first_and_filters() {
        let test = setup();
        let later = insert_entry(&test.ctx, "Later", 2 * HOUR, &[]).await;
        let sooner = insert_entry(&test.ctx, "Sooner", HOUR, &[]).await;
        test.ctx
            .repos
            .entries
            .update_status(later.id, Status::Done, 0)
            .await
            .unwrap();

        let usecase = ListEntriesUseCase {
            query: EntryQuery::default(),
        };
        let entries = execute(usecase, &test.ctx).await.unwrap();
        assert_eq!(
            entries.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![sooner.id, later.id]
        );

        let usecase = ListEntriesUseCase {
            query: EntryQuery {
                status: Some(Status::Open),
                priority: Some(Priority::Med),
                ..Default::default()
            },
        };
        let entries = execute(usecase, &test.ctx).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, sooner.id);
    }
}
