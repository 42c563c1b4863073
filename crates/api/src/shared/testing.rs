use std::sync::Arc;
use todo_schedule_domain::{Entry, EntryType, ReminderOffset};
use todo_schedule_infra::{FakeSys, InMemoryNotifier, TodoContext};

pub const NOW: i64 = 1_600_000_000_000;
pub const MINUTE: i64 = 1000 * 60;
pub const HOUR: i64 = MINUTE * 60;

pub struct TestContext {
    pub ctx: TodoContext,
    pub sys: Arc<FakeSys>,
    pub notifier: Arc<InMemoryNotifier>,
}

/// Inmemory context with a clock frozen at `NOW` and a notifier that
/// remembers what is shown
pub fn setup() -> TestContext {
    let mut ctx = TodoContext::create_inmemory();
    let sys = Arc::new(FakeSys::new(NOW));
    let notifier = Arc::new(InMemoryNotifier::new());
    ctx.sys = sys.clone();
    ctx.notifier = notifier.clone();
    TestContext { ctx, sys, notifier }
}

/// Stores an open entry due `due_in` millis from `NOW`
pub async fn insert_entry(ctx: &TodoContext, title: &str, due_in: i64, offsets: &[i64]) -> Entry {
    let mut e = Entry::new(EntryType::GenericTodo, title.into(), NOW);
    e.due_at = Some(NOW + due_in);
    let offsets = offsets.iter().map(|o| ReminderOffset(*o)).collect::<Vec<_>>();
    e.set_reminder_offsets(&offsets);
    ctx.repos.entries.upsert(&e).await.unwrap()
}
