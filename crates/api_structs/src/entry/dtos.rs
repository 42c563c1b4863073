use serde::{Deserialize, Serialize};
use todo_schedule_domain::{Entry, EntryType, Priority, Reminder, Status, ID};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EntryDTO {
    pub id: ID,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: Status,
    pub start_at: Option<i64>,
    pub end_at: Option<i64>,
    pub due_at: Option<i64>,
    pub location_text: Option<String>,
    pub tags: Vec<String>,
    pub reminders: Vec<Reminder>,
    pub created: i64,
    pub updated: i64,
}

impl EntryDTO {
    pub fn new(e: Entry) -> Self {
        Self {
            id: e.id,
            entry_type: e.entry_type,
            title: e.title,
            description: e.description,
            priority: e.priority,
            status: e.status,
            start_at: e.start_at,
            end_at: e.end_at,
            due_at: e.due_at,
            location_text: e.location_text,
            tags: e.tags,
            reminders: e.reminders,
            created: e.created,
            updated: e.updated,
        }
    }
}
