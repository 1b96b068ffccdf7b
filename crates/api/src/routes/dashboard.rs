use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{dashboard, layouts};
use crate::state::AppState;

/// Canonical dashboard page URLs, mounted at the root.
///
/// ```text
/// GET /dashboard/{role}/{section}      render | 308 redirect | 404
/// ```
pub fn page_router() -> Router<AppState> {
    Router::new().route("/dashboard/{role}/{section}", get(dashboard::resolve_dashboard))
}

/// Dashboard API, mounted under `/api/v1/dashboard`.
///
/// ```text
/// GET  /sections                                   caller's sections
/// GET  /widgets                                    caller's widget catalog
/// GET  /layout                                     get or create
/// PUT  /layout                                     sanitize + save
/// POST /layout/reset                               reset to role default
/// POST /layout/widgets/{widget_id}/toggle          enable / disable
/// PUT  /layout/widgets/{widget_id}/settings        replace settings
/// PUT  /layout/breakpoints/{breakpoint}            replace placements
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sections", get(dashboard::list_sections))
        .route("/widgets", get(layouts::list_widgets))
        .route("/layout", get(layouts::get_layout).put(layouts::save_layout))
        .route("/layout/reset", post(layouts::reset_layout))
        .route("/layout/widgets/{widget_id}/toggle", post(layouts::toggle_widget))
        .route(
            "/layout/widgets/{widget_id}/settings",
            put(layouts::update_widget_settings),
        )
        .route(
            "/layout/breakpoints/{breakpoint}",
            put(layouts::update_breakpoint),
        )
}
