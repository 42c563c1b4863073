mod base;
mod entry;
mod notification;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
use entry::EntryClient;
pub use entry::{CreateEntryInput, ListEntriesInput, UpdateEntryInput};
use notification::NotificationClient;
pub use notification::NotificationActionInput;
use status::StatusClient;
use std::sync::Arc;
pub use todo_schedule_api_structs::dtos::*;
pub use todo_schedule_domain::{
    notification_id_for, EntryType, NotificationActionKind, Priority, Reminder, ReminderKind,
    Status, ID,
};

// Domain
pub use todo_schedule_api_structs::dtos::EntryDTO as Entry;

/// Todo Schedule Server SDK
///
/// The SDK contains methods for interacting with the Todo Schedule server
/// API.
#[derive(Clone)]
pub struct TodoScheduleSDK {
    pub entry: EntryClient,
    pub notification: NotificationClient,
    pub status: StatusClient,
}

impl TodoScheduleSDK {
    /// `address` is the host of the server, e.g. `http://localhost:5000`
    pub fn new(address: String) -> Self {
        let base = Arc::new(BaseClient::new(format!("{}/api/v1", address)));
        let entry = EntryClient::new(base.clone());
        let notification = NotificationClient::new(base.clone());
        let status = StatusClient::new(base);

        Self {
            entry,
            notification,
            status,
        }
    }
}
