use super::{subscribers::ScheduleRemindersOnEntryCreated, EntryFields, InvalidEntryFields};
use crate::error::TodoScheduleError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use todo_schedule_api_structs::create_entry::*;
use todo_schedule_domain::Entry;
use todo_schedule_infra::{EntryChange, TodoContext};

pub async fn create_entry_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<TodoContext>,
) -> Result<HttpResponse, TodoScheduleError> {
    let body = body.0;
    let usecase = CreateEntryUseCase {
        fields: EntryFields {
            entry_type: body.entry_type,
            title: body.title,
            description: body.description,
            priority: body.priority.unwrap_or_default(),
            start_at: body.start_at,
            end_at: body.end_at,
            due_at: body.due_at,
            location_text: body.location_text,
            tags: body.tags,
            reminder_offsets: body.reminder_offsets,
        },
    };

    execute(usecase, &ctx)
        .await
        .map(|entry| HttpResponse::Created().json(APIResponse::new(entry)))
        .map_err(TodoScheduleError::from)
}

#[derive(Debug)]
pub struct CreateEntryUseCase {
    pub fields: EntryFields,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidFields(InvalidEntryFields),
    StorageError,
}

impl From<UseCaseError> for TodoScheduleError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidFields(e) => Self::BadClientData(e.message()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateEntryUseCase {
    type Response = Entry;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateEntry";

    async fn execute(&mut self, ctx: &TodoContext) -> Result<Self::Response, Self::Error> {
        self.fields.validate().map_err(UseCaseError::InvalidFields)?;

        let mut e = Entry::new(
            self.fields.entry_type,
            self.fields.title.clone(),
            ctx.sys.get_timestamp_millis(),
        );
        self.fields.apply(&mut e);

        let e = ctx
            .repos
            .entries
            .upsert(&e)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        ctx.entry_feed.publish(EntryChange::Entry(e.id));

        Ok(e)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(ScheduleRemindersOnEntryCreated)]
    }
}
