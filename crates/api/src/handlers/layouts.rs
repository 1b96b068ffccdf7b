//! Handlers for the caller's dashboard layout and the widget catalog.
//!
//! The layout is keyed by the token's `(tenant, user, role)`. Whole-layout
//! saves go through `sanitize_layout`; the per-widget and per-breakpoint
//! endpoints run a one-shot [`LayoutEditSession`] so they share the
//! editor's validation.

use std::collections::BTreeMap;

use academia_core::layout::{
    sanitize_layout, Breakpoint, BreakpointLayouts, DashboardLayoutState, GridPlacement,
    LayoutEditSession, CURRENT_LAYOUT_VERSION,
};
use academia_core::widgets::{widgets_for_role, GridSize};
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `PUT /dashboard/layout`. Role and version come from the server.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveLayoutRequest {
    pub enabled_widget_ids: Vec<String>,
    #[serde(default)]
    pub layouts: BreakpointLayouts,
    #[serde(default)]
    pub widget_settings: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct ToggleWidgetResponse {
    pub widget_id: String,
    pub enabled: bool,
    pub layout: DashboardLayoutState,
}

/// A widget offered to the caller's role.
#[derive(Debug, Serialize)]
pub struct WidgetInfo {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub default_size: GridSize,
    pub min_size: GridSize,
    pub default_enabled: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboard/layout
pub async fn get_layout(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardLayoutState>>> {
    let layout = state.layouts.get_or_create_layout(&user.layout_key()).await?;
    Ok(Json(DataResponse { data: layout }))
}

/// PUT /api/v1/dashboard/layout
pub async fn save_layout(
    user: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<SaveLayoutRequest>,
) -> AppResult<Json<DataResponse<DashboardLayoutState>>> {
    let key = user.layout_key();
    let submitted = DashboardLayoutState {
        version: CURRENT_LAYOUT_VERSION,
        role: user.role,
        enabled_widget_ids: body.enabled_widget_ids,
        layouts: body.layouts,
        widget_settings: body.widget_settings,
        updated_at: chrono::Utc::now(),
    };
    let saved = state
        .layouts
        .save_layout(&key, sanitize_layout(user.role, submitted))
        .await?;

    tracing::info!(
        key = %key,
        widgets = saved.enabled_widget_ids.len(),
        "Dashboard layout saved"
    );
    Ok(Json(DataResponse { data: saved }))
}

/// POST /api/v1/dashboard/layout/reset
pub async fn reset_layout(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardLayoutState>>> {
    let key = user.layout_key();
    let layout = state.layouts.reset_layout(&key).await?;
    tracing::info!(key = %key, "Dashboard layout reset to default");
    Ok(Json(DataResponse { data: layout }))
}

/// POST /api/v1/dashboard/layout/widgets/{widget_id}/toggle
pub async fn toggle_widget(
    user: AuthUser,
    State(state): State<AppState>,
    Path(widget_id): Path<String>,
) -> AppResult<Json<DataResponse<ToggleWidgetResponse>>> {
    let mut session = LayoutEditSession::open(&state.layouts, user.layout_key()).await?;
    session.begin_edit();
    let enabled = session.toggle_widget(&widget_id)?;
    let layout = session.save(&state.layouts).await?.clone();

    Ok(Json(DataResponse {
        data: ToggleWidgetResponse {
            widget_id,
            enabled,
            layout,
        },
    }))
}

/// PUT /api/v1/dashboard/layout/widgets/{widget_id}/settings
pub async fn update_widget_settings(
    user: AuthUser,
    State(state): State<AppState>,
    Path(widget_id): Path<String>,
    Json(settings): Json<serde_json::Value>,
) -> AppResult<Json<DataResponse<DashboardLayoutState>>> {
    let mut session = LayoutEditSession::open(&state.layouts, user.layout_key()).await?;
    session.begin_edit();
    session.update_widget_settings(&widget_id, settings)?;
    let layout = session.save(&state.layouts).await?.clone();
    Ok(Json(DataResponse { data: layout }))
}

/// PUT /api/v1/dashboard/layout/breakpoints/{breakpoint}
///
/// Body is the placement list the grid reported for that breakpoint.
pub async fn update_breakpoint(
    user: AuthUser,
    State(state): State<AppState>,
    Path(breakpoint): Path<String>,
    Json(placements): Json<Vec<GridPlacement>>,
) -> AppResult<Json<DataResponse<DashboardLayoutState>>> {
    let breakpoint = Breakpoint::ALL
        .into_iter()
        .find(|bp| bp.as_str() == breakpoint)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown breakpoint '{breakpoint}'")))?;

    let mut session = LayoutEditSession::open(&state.layouts, user.layout_key()).await?;
    session.begin_edit();
    session.apply_grid_change(breakpoint, placements)?;
    let layout = session.save(&state.layouts).await?.clone();
    Ok(Json(DataResponse { data: layout }))
}

/// GET /api/v1/dashboard/widgets -- widgets the caller's role may enable.
pub async fn list_widgets(user: AuthUser) -> Json<DataResponse<Vec<WidgetInfo>>> {
    let widgets = widgets_for_role(user.role)
        .into_iter()
        .map(|w| WidgetInfo {
            id: w.id,
            title: w.title,
            description: w.description,
            default_size: w.default_size,
            min_size: w.min_size,
            default_enabled: w.is_default_for(user.role),
        })
        .collect();
    Json(DataResponse { data: widgets })
}
