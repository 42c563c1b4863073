use crate::shared::entity::ID;
use serde::{Deserialize, Serialize};

const MILLIS_PER_MINUTE: i64 = 60 * 1000;

/// A user chosen reminder offset in minutes before the anchor instant
/// of an `Entry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReminderOffset(pub i64);

impl ReminderOffset {
    /// One week
    pub const MAX_MINUTES: i64 = 60 * 24 * 7;

    pub fn minutes(&self) -> i64 {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        self.0 >= 0 && self.0 <= Self::MAX_MINUTES
    }

    /// Saturates at `i64::MIN` for anchors near the start of time
    pub fn remind_at(&self, anchor: i64) -> i64 {
        anchor.saturating_sub(self.0.saturating_mul(MILLIS_PER_MINUTE))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReminderKind {
    /// Derived from the anchor instant of the owning `Entry`
    #[serde(rename_all = "camelCase")]
    OffsetBased { offset_minutes: i64 },
    /// Given directly, e.g. a retry after a snooze
    AdHoc,
}

/// A `Reminder` is a single point in time at which a notification
/// should fire for an `Entry`.
///
/// Two reminders for the same entry with the same `remind_at` are the
/// same reminder as far as job scheduling is concerned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    /// Assigned by the store, `0` until persisted
    pub id: i64,
    /// The `Entry` owning this `Reminder`
    pub entry_id: ID,
    /// Epoch millis at which the notification should fire
    pub remind_at: i64,
    pub kind: ReminderKind,
}

impl Reminder {
    pub fn from_offset(entry_id: ID, anchor: i64, offset: ReminderOffset) -> Self {
        Self {
            id: 0,
            entry_id,
            remind_at: offset.remind_at(anchor),
            kind: ReminderKind::OffsetBased {
                offset_minutes: offset.minutes(),
            },
        }
    }

    pub fn ad_hoc(entry_id: ID, remind_at: i64) -> Self {
        Self {
            id: 0,
            entry_id,
            remind_at,
            kind: ReminderKind::AdHoc,
        }
    }

    pub fn offset_minutes(&self) -> Option<i64> {
        match self.kind {
            ReminderKind::OffsetBased { offset_minutes } => Some(offset_minutes),
            ReminderKind::AdHoc => None,
        }
    }

    /// Milliseconds until this reminder fires, `<= 0` if it is due or past
    pub fn delay_from(&self, now: i64) -> i64 {
        self.remind_at.saturating_sub(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extreme_instants_do_not_overflow() {
        let reminder = Reminder::from_offset(ID::new(1), i64::MIN + 1_000, ReminderOffset(15));
        assert_eq!(reminder.remind_at, i64::MIN);
        assert!(reminder.delay_from(1_600_000_000_000) <= 0);

        let reminder = Reminder::from_offset(ID::new(1), i64::MAX, ReminderOffset(0));
        assert!(reminder.delay_from(-1_000) > 0);
    }

    #[test]
    fn computes_remind_at_from_offset() {
        let anchor = 1_000 * 60 * 60;
        let reminder = Reminder::from_offset(ID::new(1), anchor, ReminderOffset(15));
        assert_eq!(reminder.remind_at, anchor - 15 * 60 * 1000);
        assert_eq!(reminder.offset_minutes(), Some(15));
    }

    #[test]
    fn ad_hoc_reminder_has_no_offset() {
        let reminder = Reminder::ad_hoc(ID::new(1), 500);
        assert_eq!(reminder.offset_minutes(), None);
        assert_eq!(reminder.delay_from(200), 300);
        assert_eq!(reminder.delay_from(500), 0);
    }

    #[test]
    fn validates_offsets() {
        assert!(ReminderOffset(0).is_valid());
        assert!(ReminderOffset(60).is_valid());
        assert!(ReminderOffset(ReminderOffset::MAX_MINUTES).is_valid());
        assert!(!ReminderOffset(-1).is_valid());
        assert!(!ReminderOffset(ReminderOffset::MAX_MINUTES + 1).is_valid());
    }
}
