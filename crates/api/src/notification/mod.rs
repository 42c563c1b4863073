mod mark_done;
mod snooze;

use crate::shared::usecase::execute;
use actix_web::{web, HttpResponse};
use futures::FutureExt;
pub use mark_done::MarkDoneUseCase;
pub use snooze::SnoozeUseCase;
use std::panic::AssertUnwindSafe;
use todo_schedule_api_structs::handle_notification_action::*;
use todo_schedule_domain::NotificationActionKind;
use todo_schedule_infra::TodoContext;
use tracing::{error, info_span};
use tracing_futures::Instrument;

async fn handle_notification_action_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<TodoContext>,
) -> HttpResponse {
    handle_notification_action(body.0, ctx.get_ref().clone());
    HttpResponse::Accepted().json(APIResponse { accepted: true })
}

/// Handles the press of a notification action button in the background.
/// Failures are logged and never reach the caller.
pub fn handle_notification_action(action: RequestBody, ctx: TodoContext) {
    let span = info_span!(
        "Notification action",
        action = ?action.action,
        entry_id = %action.entry_id
    );
    actix_web::rt::spawn(
        async move {
            let res = AssertUnwindSafe(run_notification_action(action, &ctx))
                .catch_unwind()
                .await;
            if res.is_err() {
                error!("Notification action handler panicked");
            }
        }
        .instrument(span),
    );
}

/// Errors are logged by `execute`
pub async fn run_notification_action(action: RequestBody, ctx: &TodoContext) {
    match action.action {
        NotificationActionKind::MarkDone => {
            let usecase = MarkDoneUseCase {
                entry_id: action.entry_id,
                notification_id: action.notification_id,
            };
            let _ = execute(usecase, ctx).await;
        }
        NotificationActionKind::Snooze => {
            let usecase = SnoozeUseCase {
                entry_id: action.entry_id,
                title: action.title,
                notification_id: action.notification_id,
            };
            let _ = execute(usecase, ctx).await;
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/notifications/actions",
        web::post().to(handle_notification_action_controller),
    );
}
