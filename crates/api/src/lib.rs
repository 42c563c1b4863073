mod entry;
mod error;
mod job_schedulers;
mod notification;
mod reminder;
mod shared;
mod status;

use actix_web::{dev::Server, middleware, web, App, HttpServer};
pub use entry::{
    CreateEntryUseCase, DeleteAllEntriesUseCase, DeleteEntryUseCase, EntryFields,
    GetEntryUseCase, GetUpcomingEntriesUseCase, InvalidEntryFields, ListEntriesUseCase,
    SearchEntriesUseCase, SetEntryStatusUseCase, UpdateEntryUseCase,
};
pub use error::TodoScheduleError;
pub use job_schedulers::{run_due_jobs, start_reminder_job_runner};
pub use notification::{
    handle_notification_action, run_notification_action, MarkDoneUseCase, SnoozeUseCase,
};
pub use reminder::deliver_reminder::{DeliverReminderUseCase, DeliveryOutcome};
pub use reminder::{cancel_all_reminders, cancel_reminders, cancel_snooze, schedule_reminders};
pub use shared::usecase::{execute, Subscriber, UseCase};
use std::net::TcpListener;
use todo_schedule_infra::TodoContext;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    entry::configure_routes(cfg);
    notification::configure_routes(cfg);
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: TodoContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        Application::start_job_schedulers(context);

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn start_job_schedulers(context: TodoContext) {
        start_reminder_job_runner(context);
    }

    async fn configure_server(context: TodoContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
