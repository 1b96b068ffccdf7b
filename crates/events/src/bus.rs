//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared as `Arc<EventBus>`. Every subscriber receives every
//! published [`PlatformEvent`]; consumers filter on `event_type`.

use academia_core::notifications::EVENT_NOTIFICATION_CREATED;
use academia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// PlatformEvent
// ---------------------------------------------------------------------------

/// A domain event addressed to at most one user.
///
/// Built with [`PlatformEvent::new`] and the `with_*` methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformEvent {
    /// Dot-separated event name, e.g. `"notification.created"`.
    pub event_type: String,

    pub tenant_id: Option<DbId>,

    /// User the event is delivered to.
    pub recipient_user_id: Option<DbId>,

    /// User or service account that caused the event.
    pub actor_user_id: Option<DbId>,

    /// Event-specific JSON.
    pub payload: serde_json::Value,

    pub timestamp: Timestamp,
}

impl PlatformEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            tenant_id: None,
            recipient_user_id: None,
            actor_user_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: chrono::Utc::now(),
        }
    }

    /// A `notification.created` event for one user carrying the raw push
    /// payload.
    pub fn notification_created(
        tenant_id: DbId,
        recipient_user_id: DbId,
        payload: serde_json::Value,
    ) -> Self {
        Self::new(EVENT_NOTIFICATION_CREATED)
            .with_recipient(tenant_id, recipient_user_id)
            .with_payload(payload)
    }

    pub fn with_recipient(mut self, tenant_id: DbId, user_id: DbId) -> Self {
        self.tenant_id = Some(tenant_id);
        self.recipient_user_id = Some(user_id);
        self
    }

    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// `(tenant, user)` when both are set.
    pub fn recipient(&self) -> Option<(DbId, DbId)> {
        Some((self.tenant_id?, self.recipient_user_id?))
    }

    pub fn is_notification_created(&self) -> bool {
        self.event_type == EVENT_NOTIFICATION_CREATED
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

const DEFAULT_CAPACITY: usize = 1024;

pub struct EventBus {
    sender: broadcast::Sender<PlatformEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity. Receivers that fall
    /// more than `capacity` events behind observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers. Returns the number of receivers
    /// the event reached; zero receivers is not an error.
    pub fn publish(&self, event: PlatformEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlatformEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        let reached = bus.publish(
            PlatformEvent::notification_created(3, 11, serde_json::json!({"id": 1}))
                .with_actor(99),
        );
        assert_eq!(reached, 2);

        let e1 = rx1.recv().await.unwrap();
        let e2 = rx2.recv().await.unwrap();
        assert!(e1.is_notification_created());
        assert_eq!(e1.recipient(), Some((3, 11)));
        assert_eq!(e1.actor_user_id, Some(99));
        assert_eq!(e2.payload["id"], 1);
    }

    #[test]
    fn publish_without_subscribers_reaches_nobody() {
        let bus = EventBus::default();
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.publish(PlatformEvent::new("orphan.event")), 0);
    }

    #[test]
    fn bare_event_has_no_recipient() {
        let event = PlatformEvent::new("bare.event");
        assert!(event.recipient().is_none());
        assert!(!event.is_notification_created());
        assert!(event.payload.is_object());
    }
}
