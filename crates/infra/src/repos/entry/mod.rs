mod inmemory;
mod postgres;

pub use inmemory::InMemoryEntryRepo;
pub use postgres::PostgresEntryRepo;
use todo_schedule_domain::{Entry, EntryQuery, Status, ID};

/// The persistent entry store. Every component mutates `Entry`s only
/// through this trait.
#[async_trait::async_trait]
pub trait IEntryRepo: Send + Sync {
    /// Inserts the entry if it has no id yet, otherwise replaces it.
    /// Reminders and tags are replaced as a whole. Returns the stored
    /// entry with its assigned ids.
    async fn upsert(&self, e: &Entry) -> anyhow::Result<Entry>;
    async fn find(&self, entry_id: ID) -> anyhow::Result<Option<Entry>>;
    /// Returns false if there is no entry with the given id
    async fn update_status(&self, entry_id: ID, status: Status, updated: i64)
        -> anyhow::Result<bool>;
    async fn delete(&self, entry_id: ID) -> anyhow::Result<Option<Entry>>;
    async fn delete_all(&self) -> anyhow::Result<u64>;
    async fn find_by_query(&self, query: &EntryQuery) -> anyhow::Result<Vec<Entry>>;
    async fn find_upcoming(&self, limit: usize) -> anyhow::Result<Vec<Entry>>;
    async fn search(&self, text: &str) -> anyhow::Result<Vec<Entry>>;
}
