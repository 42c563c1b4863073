pub mod deliver_reminder;
mod scheduler;

pub use scheduler::{cancel_all_reminders, cancel_reminders, cancel_snooze, schedule_reminders};
