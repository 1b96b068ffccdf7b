use std::sync::Arc;
use std::time::Duration;

use crate::ws::manager::WsManager;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// Every [`HEARTBEAT_INTERVAL`], forget connections whose socket task has
/// ended and ping the rest. `main` aborts the returned task on shutdown.
pub fn start_heartbeat(ws_manager: Arc<WsManager>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(HEARTBEAT_INTERVAL);
        loop {
            ticker.tick().await;
            let pruned = ws_manager.prune_closed().await;
            if pruned > 0 {
                tracing::info!(pruned, "Dropped closed WebSocket connections");
            }
            let count = ws_manager.connection_count().await;
            tracing::debug!(count, "WebSocket heartbeat ping");
            ws_manager.ping_all().await;
        }
    })
}
