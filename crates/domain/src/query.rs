use crate::entry::{Entry, EntryType, Priority, Status};
use std::cmp::Ordering;

/// Filters for listing `Entry`s. `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryQuery {
    pub entry_type: Option<EntryType>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
}

impl EntryQuery {
    pub fn matches(&self, e: &Entry) -> bool {
        self.entry_type.map(|t| t == e.entry_type).unwrap_or(true)
            && self.status.map(|s| s == e.status).unwrap_or(true)
            && self.priority.map(|p| p == e.priority).unwrap_or(true)
    }
}

/// Listing order: soonest anchor first (entries without one last),
/// then highest priority, then most recently created
pub fn cmp_for_listing(e1: &Entry, e2: &Entry) -> Ordering {
    let a1 = e1.anchor_instant().unwrap_or(i64::MAX);
    let a2 = e2.anchor_instant().unwrap_or(i64::MAX);
    a1.cmp(&a2)
        .then(e1.priority.rank().cmp(&e2.priority.rank()))
        .then(e2.created.cmp(&e1.created))
}

/// Upcoming order: highest priority first, then soonest anchor
pub fn cmp_for_upcoming(e1: &Entry, e2: &Entry) -> Ordering {
    e1.priority
        .rank()
        .cmp(&e2.priority.rank())
        .then(e1.anchor_instant().cmp(&e2.anchor_instant()))
}

pub fn is_upcoming(e: &Entry) -> bool {
    e.status == Status::Open && e.anchor_instant().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ID;

    fn entry(id: i64, due_at: Option<i64>, priority: Priority, created: i64) -> Entry {
        let mut e = Entry::new(EntryType::GenericTodo, format!("entry {}", id), created);
        e.id = ID::new(id);
        e.due_at = due_at;
        e.priority = priority;
        e
    }

    #[test]
    fn query_matches_on_all_given_fields() {
        let e = entry(1, None, Priority::High, 0);
        assert!(EntryQuery::default().matches(&e));
        let q = EntryQuery {
            priority: Some(Priority::High),
            status: Some(Status::Open),
            ..Default::default()
        };
        assert!(q.matches(&e));
        let q = EntryQuery {
            entry_type: Some(EntryType::Shift),
            ..Default::default()
        };
        assert!(!q.matches(&e));
    }

    #[test]
    fn sorts_for_listing() {
        let mut entries = vec![
            entry(1, None, Priority::High, 10),
            entry(2, Some(200), Priority::Low, 10),
            entry(3, Some(200), Priority::High, 10),
            entry(4, Some(100), Priority::Low, 10),
            entry(5, None, Priority::High, 20),
        ];
        entries.sort_by(cmp_for_listing);
        let ids = entries.iter().map(|e| e.id.inner()).collect::<Vec<_>>();
        assert_eq!(ids, vec![4, 3, 2, 5, 1]);
    }

    #[test]
    fn sorts_for_upcoming() {
        let mut entries = vec![
            entry(1, Some(300), Priority::Low, 0),
            entry(2, Some(200), Priority::High, 0),
            entry(3, Some(100), Priority::High, 0),
        ];
        entries.sort_by(cmp_for_upcoming);
        let ids = entries.iter().map(|e| e.id.inner()).collect::<Vec<_>>();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
