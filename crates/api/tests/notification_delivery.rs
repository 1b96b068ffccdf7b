//! Tests for forwarding bus events to WebSocket connections.

use std::sync::Arc;

use academia_api::notifications::NotificationRouter;
use academia_api::ws::WsManager;
use academia_events::{EventBus, PlatformEvent};
use assert_matches::assert_matches;
use axum::extract::ws::Message;
use serde_json::json;
use tokio::sync::mpsc::error::TryRecvError;

fn text(message: Message) -> serde_json::Value {
    match message {
        Message::Text(text) => serde_json::from_str(text.as_str()).unwrap(),
        other => panic!("expected text frame, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Test: A push reaches every connection of the recipient only
// ---------------------------------------------------------------------------

#[tokio::test]
async fn push_reaches_recipient_connections() {
    let ws_manager = Arc::new(WsManager::new());
    let mut first = ws_manager.add("c1".into(), 1, 42).await;
    let mut second = ws_manager.add("c2".into(), 1, 42).await;
    let mut other = ws_manager.add("c3".into(), 1, 43).await;

    let router = NotificationRouter::new(Arc::clone(&ws_manager));
    let sent = router
        .route_event(&PlatformEvent::notification_created(
            1,
            42,
            json!({ "id": "n-9", "title": "Meeting moved", "level": "info" }),
        ))
        .await;
    assert_eq!(sent, 2);

    for rx in [&mut first, &mut second] {
        let message = text(rx.try_recv().unwrap());
        assert_eq!(message["type"], "notification:new");
        assert_eq!(message["payload"]["id"], "n-9");
        assert_eq!(message["payload"]["isRead"], false);
    }
    assert_matches!(other.try_recv(), Err(TryRecvError::Empty));
}

// ---------------------------------------------------------------------------
// Test: Same user id in another tenant is a different recipient
// ---------------------------------------------------------------------------

#[tokio::test]
async fn push_is_scoped_by_tenant() {
    let ws_manager = Arc::new(WsManager::new());
    let mut foreign = ws_manager.add("c1".into(), 2, 42).await;

    let router = NotificationRouter::new(Arc::clone(&ws_manager));
    let sent = router
        .route_event(&PlatformEvent::notification_created(1, 42, json!({ "id": 1 })))
        .await;
    assert_eq!(sent, 0);
    assert_matches!(foreign.try_recv(), Err(TryRecvError::Empty));
}

// ---------------------------------------------------------------------------
// Test: Non-notification and id-less events are not forwarded
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unusable_events_are_skipped() {
    let ws_manager = Arc::new(WsManager::new());
    let _rx = ws_manager.add("c1".into(), 1, 42).await;
    let router = NotificationRouter::new(Arc::clone(&ws_manager));

    let foreign = PlatformEvent::new("layout.saved").with_recipient(1, 42);
    assert_eq!(router.route_event(&foreign).await, 0);

    let no_id = PlatformEvent::notification_created(1, 42, json!({ "title": "?" }));
    assert_eq!(router.route_event(&no_id).await, 0);
}

// ---------------------------------------------------------------------------
// Test: The run loop forwards events and exits when the bus closes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn run_forwards_until_bus_closes() {
    let ws_manager = Arc::new(WsManager::new());
    let mut rx = ws_manager.add("c1".into(), 1, 42).await;
    let bus = EventBus::default();

    let task = tokio::spawn(NotificationRouter::new(Arc::clone(&ws_manager)).run(bus.subscribe()));
    bus.publish(PlatformEvent::notification_created(1, 42, json!({ "id": "a" })));
    drop(bus);
    task.await.unwrap();

    let message = text(rx.recv().await.unwrap());
    assert_eq!(message["payload"]["id"], "a");
}

// ---------------------------------------------------------------------------
// Test: Removing a connection stops delivery to it
// ---------------------------------------------------------------------------

#[tokio::test]
async fn removed_connection_is_not_counted() {
    let ws_manager = Arc::new(WsManager::new());
    let _rx = ws_manager.add("c1".into(), 1, 42).await;
    ws_manager.remove("c1").await;

    assert_eq!(ws_manager.connection_count().await, 0);
    assert!(ws_manager.get_by_user(1, 42).await.is_empty());
}

// ---------------------------------------------------------------------------
// Test: Connections whose receiver is dropped are pruned
// ---------------------------------------------------------------------------

#[tokio::test]
async fn prune_closed_drops_dead_connections() {
    let ws_manager = WsManager::new();
    let _live = ws_manager.add("live".into(), 1, 42).await;
    let dead = ws_manager.add("dead".into(), 1, 42).await;
    drop(dead);

    assert_eq!(ws_manager.prune_closed().await, 1);
    assert_eq!(ws_manager.get_by_user(1, 42).await, vec!["live".to_string()]);
}

// ---------------------------------------------------------------------------
// Test: The heartbeat task prunes dead connections and pings live ones
// ---------------------------------------------------------------------------

#[tokio::test]
async fn heartbeat_prunes_then_pings() {
    let ws_manager = Arc::new(WsManager::new());
    let mut live = ws_manager.add("live".into(), 1, 42).await;
    drop(ws_manager.add("dead".into(), 1, 42).await);

    let heartbeat = academia_api::ws::start_heartbeat(Arc::clone(&ws_manager));

    // The first tick fires immediately.
    let frame = tokio::time::timeout(std::time::Duration::from_secs(2), live.recv())
        .await
        .expect("heartbeat should ping within the first tick")
        .unwrap();
    assert_matches!(frame, Message::Ping(_));
    assert_eq!(ws_manager.connection_count().await, 1);

    heartbeat.abort();
    assert!(heartbeat.await.unwrap_err().is_cancelled());
}

// ---------------------------------------------------------------------------
// Test: Closing a user's last connection evicts their cached views
// ---------------------------------------------------------------------------

#[tokio::test]
async fn last_disconnect_evicts_cached_views() {
    use academia_api::ws::release_connection;
    use academia_events::NotificationCacheSync;

    let ws_manager = WsManager::new();
    let cache = NotificationCacheSync::new();
    let _first = ws_manager.add("c1".into(), 1, 42).await;
    let _second = ws_manager.add("c2".into(), 1, 42).await;
    cache.replace_unread_count((1, 42), 3).await;
    cache.replace_unread_count((1, 43), 1).await;

    assert!(!release_connection(&ws_manager, &cache, "c1", (1, 42)).await);
    assert_eq!(cache.cached_user_count().await, 2);

    assert!(release_connection(&ws_manager, &cache, "c2", (1, 42)).await);
    assert_eq!(cache.cached_user_count().await, 1);
    assert_eq!(ws_manager.connection_count().await, 0);
}
