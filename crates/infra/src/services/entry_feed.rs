use crate::repos::IEntryRepo;
use futures::stream::{self, Stream};
use std::sync::Arc;
use todo_schedule_domain::{Entry, ID};
use tokio::sync::broadcast::{self, error::RecvError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryChange {
    Entry(ID),
    /// Every entry was removed
    All,
}

impl EntryChange {
    fn affects(&self, entry_id: ID) -> bool {
        match self {
            Self::Entry(id) => *id == entry_id,
            Self::All => true,
        }
    }
}

/// Broadcasts which entries were written so that readers can observe
/// an entry instead of polling it
#[derive(Clone)]
pub struct EntryChangeFeed {
    sender: broadcast::Sender<EntryChange>,
}

impl EntryChangeFeed {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(64);
        Self { sender }
    }

    pub fn publish(&self, change: EntryChange) {
        // No receivers is not an error
        let _ = self.sender.send(change);
    }

    /// Yields the current state of the entry and then the re-read entry
    /// after every change to it. `None` means that the entry does not exist.
    pub fn observe(
        &self,
        entries: Arc<dyn IEntryRepo>,
        entry_id: ID,
    ) -> impl Stream<Item = anyhow::Result<Option<Entry>>> {
        // Subscribe before the first read so no change is missed
        let changes = self.sender.subscribe();
        stream::unfold(
            (entries, changes, true),
            move |(entries, mut changes, first)| async move {
                if !first {
                    loop {
                        match changes.recv().await {
                            Ok(change) if change.affects(entry_id) => break,
                            Ok(_) => continue,
                            // Missed some changes, so just re-read
                            Err(RecvError::Lagged(_)) => break,
                            Err(RecvError::Closed) => return None,
                        }
                    }
                }
                let entry = entries.find(entry_id).await;
                Some((entry, (entries, changes, false)))
            },
        )
    }
}

impl Default for EntryChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}
