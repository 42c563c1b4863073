mod entry;
mod job_queue;
mod shared;

pub use entry::{IEntryRepo, InMemoryEntryRepo, PostgresEntryRepo};
pub use job_queue::{IJobQueue, InMemoryJobQueue, PostgresJobQueue};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub entries: Arc<dyn IEntryRepo>,
    pub jobs: Arc<dyn IJobQueue>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        info!("DB EXECUTING MIGRATION ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB EXECUTING MIGRATION ... [done]");

        Ok(Self {
            entries: Arc::new(PostgresEntryRepo::new(pool.clone())),
            jobs: Arc::new(PostgresJobQueue::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            entries: Arc::new(InMemoryEntryRepo::new()),
            jobs: Arc::new(InMemoryJobQueue::new()),
        }
    }
}
