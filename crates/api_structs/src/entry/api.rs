use crate::dtos::EntryDTO;
use serde::{Deserialize, Serialize};
use todo_schedule_domain::{Entry, EntryType, Priority, ReminderOffset, Status, ID};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    pub entry: EntryDTO,
}

impl EntryResponse {
    pub fn new(entry: Entry) -> Self {
        Self {
            entry: EntryDTO::new(entry),
        }
    }
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntriesResponse {
    pub entries: Vec<EntryDTO>,
}

impl EntriesResponse {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            entries: entries.into_iter().map(EntryDTO::new).collect(),
        }
    }
}

#[derive(Deserialize)]
pub struct EntryPathParams {
    pub entry_id: ID,
}

pub mod create_entry {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(rename = "type")]
        pub entry_type: EntryType,
        pub title: String,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub priority: Option<Priority>,
        #[serde(default)]
        pub start_at: Option<i64>,
        #[serde(default)]
        pub end_at: Option<i64>,
        #[serde(default)]
        pub due_at: Option<i64>,
        #[serde(default)]
        pub location_text: Option<String>,
        #[serde(default)]
        pub tags: Vec<String>,
        /// Minutes before the due or start time
        #[serde(default)]
        pub reminder_offsets: Vec<ReminderOffset>,
    }

    pub type APIResponse = EntryResponse;
}

pub mod update_entry {
    use super::*;

    pub type PathParams = EntryPathParams;

    /// Replaces every field of the entry
    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(rename = "type")]
        pub entry_type: EntryType,
        pub title: String,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub priority: Option<Priority>,
        #[serde(default)]
        pub status: Option<Status>,
        #[serde(default)]
        pub start_at: Option<i64>,
        #[serde(default)]
        pub end_at: Option<i64>,
        #[serde(default)]
        pub due_at: Option<i64>,
        #[serde(default)]
        pub location_text: Option<String>,
        #[serde(default)]
        pub tags: Vec<String>,
        #[serde(default)]
        pub reminder_offsets: Vec<ReminderOffset>,
    }

    pub type APIResponse = EntryResponse;
}

pub mod set_entry_status {
    use super::*;

    pub type PathParams = EntryPathParams;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub status: Status,
    }

    pub type APIResponse = EntryResponse;
}

pub mod get_entry {
    use super::*;

    pub type PathParams = EntryPathParams;

    pub type APIResponse = EntryResponse;
}

pub mod delete_entry {
    use super::*;

    pub type PathParams = EntryPathParams;

    pub type APIResponse = EntryResponse;
}

pub mod delete_all_entries {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub deleted: u64,
    }
}

pub mod list_entries {
    use super::*;

    #[derive(Serialize, Deserialize, Debug, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        #[serde(rename = "type")]
        pub entry_type: Option<EntryType>,
        pub status: Option<Status>,
        pub priority: Option<Priority>,
    }

    pub type APIResponse = EntriesResponse;
}

pub mod get_upcoming_entries {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub limit: Option<usize>,
    }

    pub type APIResponse = EntriesResponse;
}

pub mod search_entries {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub query: String,
    }

    pub type APIResponse = EntriesResponse;
}
