use std::sync::Arc;

use academia_events::{CacheOwner, NotificationCacheSync};
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::ws::manager::WsManager;

/// Browsers cannot set headers on a WebSocket handshake, so the access
/// token travels as `?token=`.
#[derive(Debug, Deserialize)]
pub struct WsAuthQuery {
    pub token: String,
}

/// GET /api/v1/ws?token=... -- authenticate, then upgrade.
///
/// An invalid token is rejected with 401 before the upgrade.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<WsAuthQuery>,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let user = AuthUser::from_token(&query.token, &state.config.jwt)?;
    Ok(ws.on_upgrade(move |socket| {
        handle_socket(socket, user, state.ws_manager, state.notification_cache)
    }))
}

/// Forget one connection. When it was the owner's last, their cached
/// notification views are evicted too. Returns `true` on eviction.
pub async fn release_connection(
    ws_manager: &WsManager,
    notification_cache: &NotificationCacheSync,
    conn_id: &str,
    owner: CacheOwner,
) -> bool {
    ws_manager.remove(conn_id).await;
    if !ws_manager.get_by_user(owner.0, owner.1).await.is_empty() {
        return false;
    }
    notification_cache.evict(owner).await
}

/// Drive one connection: forward queued messages to the sink and read the
/// stream until the client goes away.
async fn handle_socket(
    socket: WebSocket,
    user: AuthUser,
    ws_manager: Arc<WsManager>,
    notification_cache: Arc<NotificationCacheSync>,
) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(
        conn_id = %conn_id,
        tenant_id = user.tenant_id,
        user_id = user.user_id,
        "WebSocket connected"
    );

    let mut rx = ws_manager
        .add(conn_id.clone(), user.tenant_id, user.user_id)
        .await;

    let (mut sink, mut stream) = socket.split();

    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Clients only receive on this channel; inbound frames other than
    // Close are ignored.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    release_connection(&ws_manager, &notification_cache, &conn_id, user.cache_owner()).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}
