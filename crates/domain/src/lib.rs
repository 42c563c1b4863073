mod entry;
mod job;
mod notification;
mod query;
mod reminder;
mod shared;

pub use entry::{Entry, EntryType, Priority, Status};
pub use job::{
    JobGroup, JobName, ReminderJobPayload, ScheduledJob, REMINDER_JOB_PREFIX, SNOOZE_JOB_PREFIX,
};
pub use notification::{
    notification_id_for, Notification, NotificationAction, NotificationActionKind,
    DEFAULT_NOTIFICATION_BODY, MARK_DONE_LABEL, SNOOZE_LABEL,
};
pub use query::{cmp_for_listing, cmp_for_upcoming, is_upcoming, EntryQuery};
pub use reminder::{Reminder, ReminderKind, ReminderOffset};
pub use shared::entity::{InvalidIDError, ID};
pub use uuid::Uuid;
