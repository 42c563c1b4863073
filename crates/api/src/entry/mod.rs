mod create_entry;
mod delete_all_entries;
mod delete_entry;
mod get_entry;
mod get_upcoming_entries;
mod list_entries;
mod search_entries;
mod set_entry_status;
mod subscribers;
mod update_entry;

use actix_web::web;
use create_entry::create_entry_controller;
use delete_all_entries::delete_all_entries_controller;
use delete_entry::delete_entry_controller;
use get_entry::get_entry_controller;
use get_upcoming_entries::get_upcoming_entries_controller;
use list_entries::list_entries_controller;
use search_entries::search_entries_controller;
use set_entry_status::set_entry_status_controller;
use todo_schedule_domain::{Entry, EntryType, Priority, ReminderOffset};
use update_entry::update_entry_controller;

pub use create_entry::CreateEntryUseCase;
pub use delete_all_entries::DeleteAllEntriesUseCase;
pub use delete_entry::DeleteEntryUseCase;
pub use get_entry::GetEntryUseCase;
pub use get_upcoming_entries::GetUpcomingEntriesUseCase;
pub use list_entries::ListEntriesUseCase;
pub use search_entries::SearchEntriesUseCase;
pub use set_entry_status::SetEntryStatusUseCase;
pub use update_entry::UpdateEntryUseCase;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/entries", web::post().to(create_entry_controller));
    cfg.route("/entries", web::get().to(list_entries_controller));
    cfg.route("/entries", web::delete().to(delete_all_entries_controller));
    cfg.route(
        "/entries/upcoming",
        web::get().to(get_upcoming_entries_controller),
    );
    cfg.route("/entries/search", web::get().to(search_entries_controller));

    cfg.route("/entries/{entry_id}", web::get().to(get_entry_controller));
    cfg.route("/entries/{entry_id}", web::put().to(update_entry_controller));
    cfg.route(
        "/entries/{entry_id}",
        web::delete().to(delete_entry_controller),
    );
    cfg.route(
        "/entries/{entry_id}/status",
        web::put().to(set_entry_status_controller),
    );
}

/// The user editable fields of an `Entry`
#[derive(Debug, Clone)]
pub struct EntryFields {
    pub entry_type: EntryType,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub start_at: Option<i64>,
    pub end_at: Option<i64>,
    pub due_at: Option<i64>,
    pub location_text: Option<String>,
    pub tags: Vec<String>,
    pub reminder_offsets: Vec<ReminderOffset>,
}

#[derive(Debug, PartialEq)]
pub enum InvalidEntryFields {
    EmptyTitle,
    InvalidReminderOffset(i64),
}

impl EntryFields {
    pub fn validate(&self) -> Result<(), InvalidEntryFields> {
        if self.title.trim().is_empty() {
            return Err(InvalidEntryFields::EmptyTitle);
        }
        if let Some(offset) = self.reminder_offsets.iter().find(|o| !o.is_valid()) {
            return Err(InvalidEntryFields::InvalidReminderOffset(offset.minutes()));
        }
        Ok(())
    }

    /// Overwrites the fields of the `Entry` and rebuilds its reminders
    pub fn apply(&self, e: &mut Entry) {
        e.entry_type = self.entry_type;
        e.title = self.title.trim().to_string();
        e.description = self
            .description
            .clone()
            .filter(|d| !d.trim().is_empty());
        e.priority = self.priority;
        e.start_at = self.start_at;
        e.end_at = self.end_at;
        e.due_at = self.due_at;
        e.location_text = self.location_text.clone();
        e.tags = self.tags.clone();
        e.set_reminder_offsets(&self.reminder_offsets);
    }
}

impl InvalidEntryFields {
    pub fn message(&self) -> String {
        match self {
            Self::EmptyTitle => "The entry title must not be empty".into(),
            Self::InvalidReminderOffset(offset) => format!(
                "Invalid reminder offset: {}, it must be between 0 and {} minutes",
                offset,
                ReminderOffset::MAX_MINUTES
            ),
        }
    }
}

#[cfg(test)]
pub(crate) fn fields_factory(title: &str, due_at: Option<i64>, offsets: &[i64]) -> EntryFields {
    EntryFields {
        entry_type: EntryType::GenericTodo,
        title: title.into(),
        description: None,
        priority: Priority::Med,
        start_at: None,
        end_at: None,
        due_at,
        location_text: None,
        tags: Vec::new(),
        reminder_offsets: offsets.iter().map(|o| ReminderOffset(*o)).collect(),
    }
}
