use crate::shared::entity::ID;
use serde::{Deserialize, Serialize};

/// Shown when neither the entry nor the job snapshot has a description
pub const DEFAULT_NOTIFICATION_BODY: &str = "Saatnya menyelesaikan tugas ini!";
pub const MARK_DONE_LABEL: &str = "Tandai Selesai";
pub const SNOOZE_LABEL: &str = "Tunda 10 menit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationActionKind {
    MarkDone,
    Snooze,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationAction {
    pub label: String,
    pub action: NotificationActionKind,
}

/// A user visible reminder notification for an `Entry`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Same for every delivery of the same entry so a duplicate
    /// delivery replaces the notification instead of stacking
    pub id: i32,
    pub entry_id: ID,
    pub title: String,
    pub body: String,
    pub actions: Vec<NotificationAction>,
}

impl Notification {
    pub fn reminder(entry_id: ID, title: String, description: Option<String>) -> Self {
        Self {
            id: notification_id_for(entry_id),
            entry_id,
            title,
            body: description.unwrap_or_else(|| DEFAULT_NOTIFICATION_BODY.to_string()),
            actions: vec![
                NotificationAction {
                    label: MARK_DONE_LABEL.into(),
                    action: NotificationActionKind::MarkDone,
                },
                NotificationAction {
                    label: SNOOZE_LABEL.into(),
                    action: NotificationActionKind::Snooze,
                },
            ],
        }
    }
}

pub fn notification_id_for(entry_id: ID) -> i32 {
    (entry_id.inner() % i64::from(i32::MAX)) as i32
}
