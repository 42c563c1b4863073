use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use todo_schedule_api_structs::handle_notification_action;
use todo_schedule_domain::{notification_id_for, NotificationActionKind, ID};

#[derive(Clone)]
pub struct NotificationClient {
    base: Arc<BaseClient>,
}

pub struct NotificationActionInput {
    pub action: NotificationActionKind,
    pub entry_id: ID,
    pub title: Option<String>,
}

impl NotificationClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// The action is handled in the background after the server accepted it
    pub async fn send_action(
        &self,
        input: NotificationActionInput,
    ) -> APIResponse<handle_notification_action::APIResponse> {
        let body = handle_notification_action::RequestBody {
            action: input.action,
            entry_id: input.entry_id,
            notification_id: notification_id_for(input.entry_id),
            title: input.title,
        };
        self.base
            .post(body, "notifications/actions".into(), StatusCode::ACCEPTED)
            .await
    }
}
