//! Notification ingest and the caller's cached notification views.
//!
//! Ingest endpoints are service-to-service (see [`RequireIngestToken`]):
//! `push` announces a new notification on the event bus, `sync` replaces
//! cached views with authoritative counts after a full refetch. The read
//! endpoints serve whatever is cached for the signed-in user.

use academia_core::notifications::{
    normalize_push_payload, ListQuery, NotificationPage, NotificationSummary, ReadFilter,
};
use academia_core::notifications::cache::DEFAULT_PAGE_LIMIT;
use academia_core::types::DbId;
use academia_events::PlatformEvent;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::ingest::RequireIngestToken;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /notifications/push`: the raw notification payload with
/// its recipient alongside.
#[derive(Debug, Deserialize)]
pub struct PushNotificationRequest {
    pub tenant_id: DbId,
    pub recipient_user_id: DbId,
    #[serde(flatten)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct PushAccepted {
    pub notification_id: String,
    /// Bus subscribers the event reached.
    pub subscribers: usize,
}

/// Body of `POST /notifications/sync`. Each present view replaces the
/// cached one.
#[derive(Debug, Deserialize)]
pub struct SyncViewsRequest {
    pub tenant_id: DbId,
    pub recipient_user_id: DbId,
    pub unread_count: Option<u64>,
    pub summary: Option<NotificationSummary>,
    #[serde(default)]
    pub pages: Vec<NotificationPage>,
}

#[derive(Debug, Serialize)]
pub struct SyncViewsResponse {
    pub unread_count: bool,
    pub summary: bool,
    pub pages: usize,
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub count: u64,
}

/// Query params for `GET /notifications/list`.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub filter: Option<ReadFilter>,
}

// ---------------------------------------------------------------------------
// Ingest
// ---------------------------------------------------------------------------

/// POST /api/v1/notifications/push
pub async fn push_notification(
    _ingest: RequireIngestToken,
    State(state): State<AppState>,
    Json(body): Json<PushNotificationRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<PushAccepted>>)> {
    let payload = serde_json::Value::Object(body.payload);
    let notification = normalize_push_payload(&payload).ok_or_else(|| {
        AppError::BadRequest("Notification payload has no usable id".into())
    })?;

    let subscribers = state.event_bus.publish(PlatformEvent::notification_created(
        body.tenant_id,
        body.recipient_user_id,
        payload,
    ));
    tracing::info!(
        tenant_id = body.tenant_id,
        user_id = body.recipient_user_id,
        notification_id = %notification.id,
        subscribers,
        "Notification push published"
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(DataResponse {
            data: PushAccepted {
                notification_id: notification.id,
                subscribers,
            },
        }),
    ))
}

/// POST /api/v1/notifications/sync
pub async fn sync_views(
    _ingest: RequireIngestToken,
    State(state): State<AppState>,
    Json(body): Json<SyncViewsRequest>,
) -> AppResult<Json<DataResponse<SyncViewsResponse>>> {
    let owner = (body.tenant_id, body.recipient_user_id);
    let cache = &state.notification_cache;

    let unread_count = body.unread_count.is_some();
    if let Some(count) = body.unread_count {
        cache.replace_unread_count(owner, count).await;
    }
    let summary = body.summary.is_some();
    if let Some(summary) = body.summary {
        cache.replace_summary(owner, summary).await;
    }
    let pages = body.pages.len();
    for mut page in body.pages {
        page.query = ListQuery::new(page.query.offset, page.query.limit, page.query.filter);
        cache.replace_page(owner, page).await;
    }

    Ok(Json(DataResponse {
        data: SyncViewsResponse {
            unread_count,
            summary,
            pages,
        },
    }))
}

// ---------------------------------------------------------------------------
// Cached views
// ---------------------------------------------------------------------------

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    user: AuthUser,
    State(state): State<AppState>,
) -> Json<DataResponse<UnreadCount>> {
    let count = state.notification_cache.unread_count(user.cache_owner()).await;
    Json(DataResponse {
        data: UnreadCount { count },
    })
}

/// GET /api/v1/notifications/summary
pub async fn summary(
    user: AuthUser,
    State(state): State<AppState>,
) -> Json<DataResponse<NotificationSummary>> {
    let summary = state.notification_cache.summary(user.cache_owner()).await;
    Json(DataResponse { data: summary })
}

/// GET /api/v1/notifications/list?offset&limit&filter
pub async fn list(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<DataResponse<NotificationPage>> {
    let query = ListQuery::new(
        params.offset.unwrap_or(0),
        params.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        params.filter.unwrap_or_default(),
    );
    let page = state.notification_cache.page(user.cache_owner(), query).await;
    Json(DataResponse { data: page })
}
