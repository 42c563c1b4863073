use serde::{Deserialize, Serialize};
use todo_schedule_domain::{NotificationActionKind, ID};

pub mod handle_notification_action {
    use super::*;

    /// Sent when the user presses an action button of a reminder notification
    #[derive(Serialize, Deserialize, Debug, Clone)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub action: NotificationActionKind,
        pub entry_id: ID,
        pub notification_id: i32,
        /// Title of the notification, used for the snoozed reminder
        #[serde(default)]
        pub title: Option<String>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub accepted: bool,
    }
}
