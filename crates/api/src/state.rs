use std::sync::Arc;

use academia_core::layout::LayoutStore;
use academia_events::{EventBus, NotificationCacheSync};

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone: every field is an `Arc` or wraps one.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Dashboard layouts over the configured storage backend.
    pub layouts: LayoutStore,
    /// WebSocket connections of signed-in clients.
    pub ws_manager: Arc<WsManager>,
    pub event_bus: Arc<EventBus>,
    /// Per-user cached notification views.
    pub notification_cache: Arc<NotificationCacheSync>,
}
