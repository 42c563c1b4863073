use super::{INotifier, NotifyError};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use todo_schedule_domain::Notification;
use tracing::error;

const WEBHOOK_KEY_HEADER: &str = "todo-schedule-webhook-key";

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum WebhookPayload<'a> {
    #[serde(rename_all = "camelCase")]
    Show { notification: &'a Notification },
    #[serde(rename_all = "camelCase")]
    Cancel { notification_id: i32 },
}

/// Forwards notifications to an endpoint that renders them on the
/// user's device
pub struct WebhookNotifier {
    client: Client,
    url: String,
    key: String,
}

impl WebhookNotifier {
    pub fn new(url: String, key: String) -> Self {
        Self {
            client: Client::new(),
            url,
            key,
        }
    }

    async fn post(&self, payload: &WebhookPayload<'_>) -> Result<(), NotifyError> {
        let res = self
            .client
            .post(&self.url)
            .header(WEBHOOK_KEY_HEADER, &self.key)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!(
                    "[Network Error] Notification webhook error. Error message: {:?}",
                    e
                );
                NotifyError::Unavailable(e.to_string())
            })?;

        match res.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(NotifyError::PermissionDenied),
            status if status.is_success() => Ok(()),
            status => {
                error!(
                    "[Unexpected Response] Notification webhook responded with status: {}",
                    status
                );
                Err(NotifyError::Unavailable(format!(
                    "Webhook responded with status: {}",
                    status
                )))
            }
        }
    }
}

#[async_trait::async_trait]
impl INotifier for WebhookNotifier {
    async fn show(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.post(&WebhookPayload::Show { notification }).await
    }

    async fn cancel(&self, notification_id: i32) -> Result<(), NotifyError> {
        self.post(&WebhookPayload::Cancel { notification_id }).await
    }
}
