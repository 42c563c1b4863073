use std::str::FromStr;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Postgres connection string. When absent the application runs
    /// with inmemory stores, which is only useful for development and tests.
    pub database_url: Option<String>,
    /// Endpoint that renders notifications on the user's device.
    /// When absent notifications are only written to the log.
    pub notification_webhook_url: Option<String>,
    /// Sent in the `todo-schedule-webhook-key` header to the webhook
    pub notification_webhook_key: String,
    /// How often the reminder job runner looks for due jobs
    pub job_poll_interval_millis: i64,
    /// How long a claimed job is hidden from other runners. A job that
    /// is neither completed nor rescheduled within the lease (e.g. the
    /// process died) becomes due again.
    pub job_lease_millis: i64,
    /// Number of executions of a job before a retryable failure is given up on
    pub job_max_attempts: i32,
    /// Base delay before retrying a failed job, doubled for every attempt
    pub job_retry_backoff_millis: i64,
    /// Delay of the follow up reminder when the user snoozes a notification
    pub snooze_millis: i64,
}

fn env_or<T: FromStr + std::fmt::Display + Copy>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(val) => match val.parse::<T>() {
            Ok(val) => val,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default value: {}.",
                    key, val, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn new() -> Self {
        let port = env_or("PORT", 5000);
        let database_url = std::env::var("DATABASE_URL").ok();
        if database_url.is_none() {
            info!("Did not find DATABASE_URL environment variable. Going to use inmemory stores.");
        }
        let notification_webhook_url = std::env::var("NOTIFICATION_WEBHOOK_URL").ok();
        if notification_webhook_url.is_none() {
            info!("Did not find NOTIFICATION_WEBHOOK_URL environment variable. Notifications will only be logged.");
        }
        let notification_webhook_key =
            std::env::var("NOTIFICATION_WEBHOOK_KEY").unwrap_or_default();

        Self {
            port,
            database_url,
            notification_webhook_url,
            notification_webhook_key,
            job_poll_interval_millis: env_or::<i64>("REMINDER_JOB_POLL_INTERVAL_SECS", 5) * 1000,
            job_lease_millis: env_or::<i64>("REMINDER_JOB_LEASE_SECS", 60 * 10) * 1000,
            job_max_attempts: env_or("REMINDER_JOB_MAX_ATTEMPTS", 3),
            job_retry_backoff_millis: env_or::<i64>("REMINDER_JOB_RETRY_BACKOFF_SECS", 30) * 1000,
            snooze_millis: env_or::<i64>("SNOOZE_MINUTES", 10) * 1000 * 60,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
