mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{IEntryRepo, IJobQueue, Repos};
pub use services::*;
use futures::Stream;
use std::sync::Arc;
use todo_schedule_domain::{Entry, ID};
pub use system::{FakeSys, ISys, RealSys};

#[derive(Clone)]
pub struct TodoContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifier: Arc<dyn INotifier>,
    pub entry_feed: EntryChangeFeed,
}

impl TodoContext {
    async fn create(config: Config) -> anyhow::Result<Self> {
        let repos = match &config.database_url {
            Some(url) => Repos::create_postgres(url).await?,
            None => Repos::create_inmemory(),
        };
        let notifier: Arc<dyn INotifier> = match &config.notification_webhook_url {
            Some(url) => Arc::new(WebhookNotifier::new(
                url.clone(),
                config.notification_webhook_key.clone(),
            )),
            None => Arc::new(LogNotifier {}),
        };
        Ok(Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            notifier,
            entry_feed: EntryChangeFeed::new(),
        })
    }

    /// Context with inmemory stores that only logs notifications
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            notifier: Arc::new(LogNotifier {}),
            entry_feed: EntryChangeFeed::new(),
        }
    }

    /// Live view of the `Entry`, see `EntryChangeFeed::observe`
    pub fn observe_entry(
        &self,
        entry_id: ID,
    ) -> impl Stream<Item = anyhow::Result<Option<Entry>>> {
        self.entry_feed.observe(self.repos.entries.clone(), entry_id)
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> TodoContext {
    TodoContext::create(Config::new())
        .await
        .expect("Postgres credentials must be set and valid")
}
