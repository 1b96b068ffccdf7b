pub mod dashboard;
pub mod health;
pub mod notifications;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /ws                      WebSocket push channel (?token=)
/// /session                 caller's session
/// /dashboard/...           see routes::dashboard::router
/// /notifications/...       see routes::notifications::router
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .route("/session", get(handlers::session::get_session))
        .nest("/dashboard", dashboard::router())
        .nest("/notifications", notifications::router())
}
