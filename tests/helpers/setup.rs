use std::sync::Arc;
use todo_schedule_api::Application;
use todo_schedule_infra::{Config, InMemoryNotifier, TodoContext};
use todo_schedule_sdk::TodoScheduleSDK;

pub struct TestApp {
    pub config: Config,
    pub ctx: TodoContext,
    pub notifier: Arc<InMemoryNotifier>,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, TodoScheduleSDK, String) {
    let mut ctx = TodoContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.job_poll_interval_millis = 50;
    ctx.config.snooze_millis = 300;
    let notifier = Arc::new(InMemoryNotifier::new());
    ctx.notifier = notifier.clone();

    let config = ctx.config.clone();
    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp {
        config,
        ctx,
        notifier,
    };
    let sdk = TodoScheduleSDK::new(address.clone());
    (app, sdk, address)
}
