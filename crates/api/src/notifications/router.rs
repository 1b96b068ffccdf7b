//! Event-to-socket routing.
//!
//! [`NotificationRouter`] subscribes to the event bus and forwards every
//! `notification.created` event to the recipient's open WebSocket
//! connections as a `notification:new` message.

use std::sync::Arc;

use academia_core::notifications::{normalize_push_payload, Notification, WS_NOTIFICATION_NEW};
use academia_events::PlatformEvent;
use axum::extract::ws::Message;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::ws::WsManager;

/// Wire shape of a pushed notification.
#[derive(Debug, Serialize)]
pub struct PushMessage<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub payload: &'a Notification,
}

pub struct NotificationRouter {
    ws_manager: Arc<WsManager>,
}

impl NotificationRouter {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run until the bus closes.
    pub async fn run(self, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    self.route_event(&event).await;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    /// Deliver one event. Returns the number of connections reached.
    pub async fn route_event(&self, event: &PlatformEvent) -> usize {
        if !event.is_notification_created() {
            return 0;
        }
        let Some((tenant_id, user_id)) = event.recipient() else {
            return 0;
        };
        let Some(notification) = normalize_push_payload(&event.payload) else {
            tracing::debug!(tenant_id, user_id, "Push payload without a usable id not forwarded");
            return 0;
        };

        let text = match serde_json::to_string(&PushMessage {
            kind: WS_NOTIFICATION_NEW,
            payload: &notification,
        }) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode push message");
                return 0;
            }
        };

        let sent = self
            .ws_manager
            .send_to_user(tenant_id, user_id, Message::Text(text.into()))
            .await;
        tracing::debug!(
            tenant_id,
            user_id,
            notification_id = %notification.id,
            connections = sent,
            "Forwarded notification"
        );
        sent
    }
}
