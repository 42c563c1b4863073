use super::IEntryRepo;
use crate::repos::shared::inmemory_repo::*;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;
use todo_schedule_domain::{
    cmp_for_listing, cmp_for_upcoming, is_upcoming, Entry, EntryQuery, Status, ID,
};

pub struct InMemoryEntryRepo {
    entries: Mutex<Vec<Entry>>,
    next_entry_id: AtomicI64,
    next_reminder_id: AtomicI64,
}

impl InMemoryEntryRepo {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            next_entry_id: AtomicI64::new(1),
            next_reminder_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryEntryRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IEntryRepo for InMemoryEntryRepo {
    async fn upsert(&self, e: &Entry) -> anyhow::Result<Entry> {
        let mut e = e.clone();
        let entry_id = if e.is_persisted() {
            e.id
        } else {
            ID::new(self.next_entry_id.fetch_add(1, Ordering::SeqCst))
        };
        e.assign_id(entry_id);
        for reminder in e.reminders.iter_mut() {
            reminder.id = self.next_reminder_id.fetch_add(1, Ordering::SeqCst);
        }
        replace_or_insert(&e, &self.entries, |stored| stored.id == entry_id);
        Ok(e)
    }

    async fn find(&self, entry_id: ID) -> anyhow::Result<Option<Entry>> {
        Ok(find_one_by(&self.entries, |e| e.id == entry_id))
    }

    async fn update_status(
        &self,
        entry_id: ID,
        status: Status,
        updated: i64,
    ) -> anyhow::Result<bool> {
        let updated_entries = update_many(
            &self.entries,
            |e| e.id == entry_id,
            |e| {
                e.status = status;
                e.updated = updated;
            },
        );
        Ok(!updated_entries.is_empty())
    }

    async fn delete(&self, entry_id: ID) -> anyhow::Result<Option<Entry>> {
        Ok(find_and_delete_by(&self.entries, |e| e.id == entry_id)
            .into_iter()
            .next())
    }

    async fn delete_all(&self) -> anyhow::Result<u64> {
        Ok(find_and_delete_by(&self.entries, |_| true).len() as u64)
    }

    async fn find_by_query(&self, query: &EntryQuery) -> anyhow::Result<Vec<Entry>> {
        let mut entries = find_by(&self.entries, |e| query.matches(e));
        entries.sort_by(cmp_for_listing);
        Ok(entries)
    }

    async fn find_upcoming(&self, limit: usize) -> anyhow::Result<Vec<Entry>> {
        let mut entries = find_by(&self.entries, is_upcoming);
        entries.sort_by(cmp_for_upcoming);
        entries.truncate(limit);
        Ok(entries)
    }

    async fn search(&self, text: &str) -> anyhow::Result<Vec<Entry>> {
        let mut entries = find_by(&self.entries, |e| e.matches_text(text));
        entries.sort_by(|e1, e2| e2.created.cmp(&e1.created));
        Ok(entries)
    }
}
