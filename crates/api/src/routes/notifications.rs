use axum::routing::{get, post};
use axum::Router;

use crate::handlers::notifications;
use crate::state::AppState;

/// Mounted under `/api/v1/notifications`.
///
/// ```text
/// POST /push            ingest a new notification (ingest token)
/// POST /sync            replace cached views (ingest token)
/// GET  /unread-count    caller's cached unread count
/// GET  /summary         caller's cached summary
/// GET  /list            caller's cached page (?offset&limit&filter)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/push", post(notifications::push_notification))
        .route("/sync", post(notifications::sync_views))
        .route("/unread-count", get(notifications::unread_count))
        .route("/summary", get(notifications::summary))
        .route("/list", get(notifications::list))
}
