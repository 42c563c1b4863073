use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use todo_schedule_api_structs::*;
use todo_schedule_domain::{EntryType, Priority, ReminderOffset, Status, ID};

#[derive(Clone)]
pub struct EntryClient {
    base: Arc<BaseClient>,
}

pub struct CreateEntryInput {
    pub entry_type: EntryType,
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub start_at: Option<i64>,
    pub end_at: Option<i64>,
    pub due_at: Option<i64>,
    pub location_text: Option<String>,
    pub tags: Vec<String>,
    pub reminder_offsets: Vec<i64>,
}

impl CreateEntryInput {
    /// A generic to-do due at `due_at` with nothing else set
    pub fn todo<T: Into<String>>(title: T, due_at: Option<i64>) -> Self {
        Self {
            entry_type: EntryType::GenericTodo,
            title: title.into(),
            description: None,
            priority: None,
            start_at: None,
            end_at: None,
            due_at,
            location_text: None,
            tags: Vec::new(),
            reminder_offsets: Vec::new(),
        }
    }
}

pub struct UpdateEntryInput {
    pub entry_id: ID,
    pub entry_type: EntryType,
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub start_at: Option<i64>,
    pub end_at: Option<i64>,
    pub due_at: Option<i64>,
    pub location_text: Option<String>,
    pub tags: Vec<String>,
    pub reminder_offsets: Vec<i64>,
}

#[derive(Default)]
pub struct ListEntriesInput {
    pub entry_type: Option<EntryType>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
}

fn to_offsets(offsets: Vec<i64>) -> Vec<ReminderOffset> {
    offsets.into_iter().map(ReminderOffset).collect()
}

impl EntryClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(&self, input: CreateEntryInput) -> APIResponse<create_entry::APIResponse> {
        let body = create_entry::RequestBody {
            entry_type: input.entry_type,
            title: input.title,
            description: input.description,
            priority: input.priority,
            start_at: input.start_at,
            end_at: input.end_at,
            due_at: input.due_at,
            location_text: input.location_text,
            tags: input.tags,
            reminder_offsets: to_offsets(input.reminder_offsets),
        };
        self.base
            .post(body, "entries".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, entry_id: ID) -> APIResponse<get_entry::APIResponse> {
        self.base
            .get(format!("entries/{}", entry_id), StatusCode::OK)
            .await
    }

    pub async fn update(&self, input: UpdateEntryInput) -> APIResponse<update_entry::APIResponse> {
        let entry_id = input.entry_id;
        let body = update_entry::RequestBody {
            entry_type: input.entry_type,
            title: input.title,
            description: input.description,
            priority: input.priority,
            status: input.status,
            start_at: input.start_at,
            end_at: input.end_at,
            due_at: input.due_at,
            location_text: input.location_text,
            tags: input.tags,
            reminder_offsets: to_offsets(input.reminder_offsets),
        };
        self.base
            .put(body, format!("entries/{}", entry_id), StatusCode::OK)
            .await
    }

    pub async fn set_status(
        &self,
        entry_id: ID,
        status: Status,
    ) -> APIResponse<set_entry_status::APIResponse> {
        let body = set_entry_status::RequestBody { status };
        self.base
            .put(body, format!("entries/{}/status", entry_id), StatusCode::OK)
            .await
    }

    pub async fn delete(&self, entry_id: ID) -> APIResponse<delete_entry::APIResponse> {
        self.base
            .delete(format!("entries/{}", entry_id), StatusCode::OK)
            .await
    }

    pub async fn delete_all(&self) -> APIResponse<delete_all_entries::APIResponse> {
        self.base.delete("entries".into(), StatusCode::OK).await
    }

    pub async fn list(&self, input: ListEntriesInput) -> APIResponse<list_entries::APIResponse> {
        let query = list_entries::QueryParams {
            entry_type: input.entry_type,
            status: input.status,
            priority: input.priority,
        };
        self.base
            .get_with_query("entries".into(), &query, StatusCode::OK)
            .await
    }

    pub async fn upcoming(
        &self,
        limit: Option<usize>,
    ) -> APIResponse<get_upcoming_entries::APIResponse> {
        let query = get_upcoming_entries::QueryParams { limit };
        self.base
            .get_with_query("entries/upcoming".into(), &query, StatusCode::OK)
            .await
    }

    pub async fn search<T: Into<String>>(
        &self,
        query: T,
    ) -> APIResponse<search_entries::APIResponse> {
        let query = search_entries::QueryParams {
            query: query.into(),
        };
        self.base
            .get_with_query("entries/search".into(), &query, StatusCode::OK)
            .await
    }
}
