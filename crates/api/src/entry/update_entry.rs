use super::{subscribers::ScheduleRemindersOnEntryUpdated, EntryFields, InvalidEntryFields};
use crate::error::TodoScheduleError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use todo_schedule_api_structs::update_entry::*;
use todo_schedule_domain::{Entry, Status, ID};
use todo_schedule_infra::{EntryChange, TodoContext};

pub async fn update_entry_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<TodoContext>,
) -> Result<HttpResponse, TodoScheduleError> {
    let body = body.0;
    let usecase = UpdateEntryUseCase {
        entry_id: path_params.entry_id,
        status: body.status,
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
        .map(|entry| HttpResponse::Ok().json(APIResponse::new(entry)))
        .map_err(TodoScheduleError::from)
}

/// Replaces the `Entry` as a whole, including its reminders
#[derive(Debug)]
pub struct UpdateEntryUseCase {
    pub entry_id: ID,
    /// Keeps the current status when absent
    pub status: Option<Status>,
    pub fields: EntryFields,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidFields(InvalidEntryFields),
    StorageError,
}

impl From<UseCaseError> for TodoScheduleError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(entry_id) => Self::NotFound(format!(
                "The entry with id: {}, was not found.",
                entry_id
            )),
            UseCaseError::InvalidFields(e) => Self::BadClientData(e.message()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateEntryUseCase {
    type Response = Entry;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateEntry";

    async fn execute(&mut self, ctx: &TodoContext) -> Result<Self::Response, Self::Error> {
        self.fields.validate().map_err(UseCaseError::InvalidFields)?;

        let mut e = match ctx.repos.entries.find(self.entry_id).await {
            Ok(Some(e)) => e,
            Ok(None) => return Err(UseCaseError::NotFound(self.entry_id)),
            Err(_) => return Err(UseCaseError::StorageError),
        };

        self.fields.apply(&mut e);
        if let Some(status) = self.status {
            e.status = status;
        }
        e.updated = ctx.sys.get_timestamp_millis();

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
        vec![Box::new(ScheduleRemindersOnEntryUpdated)]
    }
}
