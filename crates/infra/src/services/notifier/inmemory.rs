use super::{INotifier, NotifyError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use todo_schedule_domain::Notification;

/// Keeps the currently shown notifications in memory
pub struct InMemoryNotifier {
    shown: Mutex<HashMap<i32, Notification>>,
    show_calls: AtomicUsize,
    cancel_calls: AtomicUsize,
    permission_denied: AtomicBool,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self {
            shown: Mutex::new(HashMap::new()),
            show_calls: AtomicUsize::new(0),
            cancel_calls: AtomicUsize::new(0),
            permission_denied: AtomicBool::new(false),
        }
    }

    /// Simulates the user turning notifications off or on
    pub fn set_permission_denied(&self, denied: bool) {
        self.permission_denied.store(denied, Ordering::SeqCst);
    }

    pub fn get_shown(&self, notification_id: i32) -> Option<Notification> {
        self.shown.lock().unwrap().get(&notification_id).cloned()
    }

    pub fn shown_count(&self) -> usize {
        self.shown.lock().unwrap().len()
    }

    pub fn show_calls(&self) -> usize {
        self.show_calls.load(Ordering::SeqCst)
    }

    pub fn cancel_calls(&self) -> usize {
        self.cancel_calls.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl INotifier for InMemoryNotifier {
    async fn show(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.show_calls.fetch_add(1, Ordering::SeqCst);
        if self.permission_denied.load(Ordering::SeqCst) {
            return Err(NotifyError::PermissionDenied);
        }
        self.shown
            .lock()
            .unwrap()
            .insert(notification.id, notification.clone());
        Ok(())
    }

    async fn cancel(&self, notification_id: i32) -> Result<(), NotifyError> {
        self.cancel_calls.fetch_add(1, Ordering::SeqCst);
        self.shown.lock().unwrap().remove(&notification_id);
        Ok(())
    }
}
