use crate::{
    reminder::{Reminder, ReminderOffset},
    shared::entity::ID,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    #[serde(rename = "TODO")]
    GenericTodo,
    #[serde(rename = "TASK")]
    AcademicTask,
    #[serde(rename = "SHIFT")]
    Shift,
    #[serde(rename = "EVENT")]
    Event,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GenericTodo => "TODO",
            Self::AcademicTask => "TASK",
            Self::Shift => "SHIFT",
            Self::Event => "EVENT",
        }
    }

    pub fn parse(val: &str) -> Option<Self> {
        match val {
            "TODO" => Some(Self::GenericTodo),
            "TASK" => Some(Self::AcademicTask),
            "SHIFT" => Some(Self::Shift),
            "EVENT" => Some(Self::Event),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Med,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Med
    }
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Med => "MED",
            Self::High => "HIGH",
        }
    }

    pub fn parse(val: &str) -> Option<Self> {
        match val {
            "LOW" => Some(Self::Low),
            "MED" => Some(Self::Med),
            "HIGH" => Some(Self::High),
            _ => None,
        }
    }

    /// Lower rank sorts first
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 1,
            Self::Med => 2,
            Self::Low => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Open,
    Done,
}

impl Default for Status {
    fn default() -> Self {
        Self::Open
    }
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Done => "DONE",
        }
    }

    pub fn parse(val: &str) -> Option<Self> {
        match val {
            "OPEN" => Some(Self::Open),
            "DONE" => Some(Self::Done),
            _ => None,
        }
    }
}

/// An `Entry` is a to-do, academic task, work shift or event tracked by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: ID,
    pub entry_type: EntryType,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: Status,
    pub start_at: Option<i64>,
    pub end_at: Option<i64>,
    pub due_at: Option<i64>,
    pub location_text: Option<String>,
    pub tags: Vec<String>,
    /// Ordered by `remind_at`, rebuilt as a whole on every save
    pub reminders: Vec<Reminder>,
    pub created: i64,
    pub updated: i64,
}

impl Entry {
    pub fn new(entry_type: EntryType, title: String, now: i64) -> Self {
        Self {
            id: ID::unset(),
            entry_type,
            title,
            description: None,
            priority: Default::default(),
            status: Default::default(),
            start_at: None,
            end_at: None,
            due_at: None,
            location_text: None,
            tags: Vec::new(),
            reminders: Vec::new(),
            created: now,
            updated: now,
        }
    }

    /// The instant offset based reminders are computed from
    pub fn anchor_instant(&self) -> Option<i64> {
        self.due_at.or(self.start_at)
    }

    pub fn is_persisted(&self) -> bool {
        !self.id.is_unset()
    }

    pub fn is_done(&self) -> bool {
        self.status == Status::Done
    }

    /// The offsets currently selected for this `Entry`
    pub fn reminder_offsets(&self) -> Vec<ReminderOffset> {
        self.reminders
            .iter()
            .filter_map(|r| r.offset_minutes())
            .map(ReminderOffset)
            .collect()
    }

    /// Replaces all reminders with the ones derived from the anchor instant
    /// and the given offsets. Without an anchor instant no reminders are created.
    pub fn set_reminder_offsets(&mut self, offsets: &[ReminderOffset]) {
        self.reminders = match self.anchor_instant() {
            Some(anchor) => {
                let mut reminders: Vec<Reminder> = offsets
                    .iter()
                    .map(|offset| Reminder::from_offset(self.id, anchor, *offset))
                    .collect();
                reminders.sort_by_key(|r| r.remind_at);
                reminders.dedup_by_key(|r| r.remind_at);
                reminders
            }
            None => Vec::new(),
        };
    }

    /// Points every reminder at this entry, used after the store assigns an id
    pub fn assign_id(&mut self, id: ID) {
        self.id = id;
        for reminder in self.reminders.iter_mut() {
            reminder.entry_id = id;
        }
    }

    /// Case insensitive match on title or description
    pub fn matches_text(&self, text: &str) -> bool {
        let needle = text.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self
                .description
                .as_ref()
                .map(|d| d.to_lowercase().contains(&needle))
                .unwrap_or(false)
    }
}
