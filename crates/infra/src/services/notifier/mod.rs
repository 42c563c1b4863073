mod inmemory;
mod webhook;

pub use inmemory::InMemoryNotifier;
use todo_schedule_domain::Notification;
use tracing::info;
pub use webhook::WebhookNotifier;

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum NotifyError {
    /// The user has not allowed notifications to be shown
    #[error("Not permitted to show notifications")]
    PermissionDenied,
    #[error("Notification presentation unavailable: {0}")]
    Unavailable(String),
}

/// Renders notifications on the user's device. Showing a notification
/// with an id that is already shown replaces it.
#[async_trait::async_trait]
pub trait INotifier: Send + Sync {
    async fn show(&self, notification: &Notification) -> Result<(), NotifyError>;
    async fn cancel(&self, notification_id: i32) -> Result<(), NotifyError>;
}

/// Notifier that only writes the notifications to the log
pub struct LogNotifier {}

#[async_trait::async_trait]
impl INotifier for LogNotifier {
    async fn show(&self, notification: &Notification) -> Result<(), NotifyError> {
        info!(
            notification_id = notification.id,
            entry_id = %notification.entry_id,
            title = %notification.title,
            body = %notification.body,
            "Showing notification"
        );
        Ok(())
    }

    async fn cancel(&self, notification_id: i32) -> Result<(), NotifyError> {
        info!(notification_id, "Cancelling notification");
        Ok(())
    }
}
