mod entry_feed;
mod notifier;

pub use entry_feed::{EntryChange, EntryChangeFeed};
pub use notifier::{INotifier, InMemoryNotifier, LogNotifier, NotifyError, WebhookNotifier};
