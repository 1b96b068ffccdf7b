use std::collections::HashMap;

use academia_core::types::{DbId, Timestamp};
use axum::body::Bytes;
use axum::extract::ws::Message;
use tokio::sync::{mpsc, RwLock};

/// Sender half for pushing messages to one WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// One signed-in WebSocket connection.
pub struct WsConnection {
    pub tenant_id: DbId,
    pub user_id: DbId,
    pub sender: WsSender,
    pub connected_at: Timestamp,
}

/// Active WebSocket connections keyed by connection id.
///
/// A user may hold several connections (one per open tab); pushes go to
/// all of them.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsConnection>>,
}

impl WsManager {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a connection and return the receiver the socket's sender
    /// task drains.
    pub async fn add(
        &self,
        conn_id: String,
        tenant_id: DbId,
        user_id: DbId,
    ) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            tenant_id,
            user_id,
            sender: tx,
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    pub async fn remove(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
    }

    /// Connection ids held by one user.
    pub async fn get_by_user(&self, tenant_id: DbId, user_id: DbId) -> Vec<String> {
        self.connections
            .read()
            .await
            .iter()
            .filter(|(_, conn)| conn.tenant_id == tenant_id && conn.user_id == user_id)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Send to every connection of one user. Returns how many connections
    /// the message was queued on; closed channels are skipped and cleaned
    /// up by their own receive loop.
    pub async fn send_to_user(&self, tenant_id: DbId, user_id: DbId, message: Message) -> usize {
        let conns = self.connections.read().await;
        conns
            .values()
            .filter(|conn| conn.tenant_id == tenant_id && conn.user_id == user_id)
            .filter(|conn| conn.sender.send(message.clone()).is_ok())
            .count()
    }

    /// Forget connections whose receiver is gone. Returns how many.
    pub async fn prune_closed(&self) -> usize {
        let mut conns = self.connections.write().await;
        let before = conns.len();
        conns.retain(|_, conn| !conn.sender.is_closed());
        before - conns.len()
    }

    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Close frame to every connection, then forget them all.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }

    /// Send a Ping frame to every connection.
    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}
