use crate::shared::entity::ID;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Every reminder job group starts with this prefix
pub const REMINDER_JOB_PREFIX: &str = "reminder_";
/// Every snooze job group starts with this prefix
pub const SNOOZE_JOB_PREFIX: &str = "snooze_";

/// Unique name of a pending job. Submitting a job with a name that is
/// already pending replaces the pending one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobName(String);

impl JobName {
    pub fn reminder(entry_id: ID, remind_at: i64) -> Self {
        Self(format!("{}{}_{}", REMINDER_JOB_PREFIX, entry_id, remind_at))
    }

    pub fn snooze(entry_id: ID) -> Self {
        Self(format!("{}{}", SNOOZE_JOB_PREFIX, entry_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for JobName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl std::fmt::Display for JobName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tag shared by all jobs belonging to one `Entry`, used to cancel
/// them without knowing their fire times
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobGroup(String);

impl JobGroup {
    pub fn reminders(entry_id: ID) -> Self {
        Self(format!("{}{}", REMINDER_JOB_PREFIX, entry_id))
    }

    pub fn snooze(entry_id: ID) -> Self {
        Self(format!("{}{}", SNOOZE_JOB_PREFIX, entry_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl From<String> for JobGroup {
    fn from(group: String) -> Self {
        Self(group)
    }
}

impl std::fmt::Display for JobGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of the `Entry` taken when the job was scheduled. Only used
/// as a fallback for display, the delivery worker re-reads the entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderJobPayload {
    pub entry_id: Option<ID>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl ReminderJobPayload {
    /// The entry id if present and valid
    pub fn valid_entry_id(&self) -> Option<ID> {
        self.entry_id.filter(|id| !id.is_unset())
    }
}

/// One pending delayed invocation of the reminder delivery worker
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledJob {
    /// Identifies this submission. A replacement under the same name
    /// gets a new id.
    pub id: Uuid,
    pub name: JobName,
    pub group: JobGroup,
    pub payload: ReminderJobPayload,
    /// Epoch millis at which the job becomes due
    pub run_at: i64,
    /// Number of times the job has been claimed for execution
    pub attempts: i32,
}

impl ScheduledJob {
    pub fn new(name: JobName, group: JobGroup, payload: ReminderJobPayload, run_at: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            group,
            payload,
            run_at,
            attempts: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_names_are_deterministic() {
        let id = ID::new(1);
        assert_eq!(JobName::reminder(id, 2700000).as_str(), "reminder_1_2700000");
        assert_eq!(JobName::reminder(id, 2700000), JobName::reminder(id, 2700000));
        assert_eq!(JobName::snooze(ID::new(5)).as_str(), "snooze_5");
    }

    #[test]
    fn groups_are_per_entry() {
        assert_eq!(JobGroup::reminders(ID::new(12)).as_str(), "reminder_12");
        assert_ne!(JobGroup::reminders(ID::new(1)), JobGroup::reminders(ID::new(12)));
        assert!(JobGroup::reminders(ID::new(12)).has_prefix(REMINDER_JOB_PREFIX));
        assert!(!JobGroup::snooze(ID::new(12)).has_prefix(REMINDER_JOB_PREFIX));
        assert_eq!(JobGroup::snooze(ID::new(12)).as_str(), "snooze_12");
    }

    #[test]
    fn rejects_unset_entry_id_in_payload() {
        let payload = ReminderJobPayload {
            entry_id: Some(ID::unset()),
            title: None,
            description: None,
        };
        assert_eq!(payload.valid_entry_id(), None);
    }
}
