use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use academia_core::layout::{FileLayoutStorage, LayoutStorage, LayoutStore};
use academia_events::{EventBus, NotificationCacheSync};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use academia_api::config::ServerConfig;
use academia_api::notifications::NotificationRouter;
use academia_api::router::build_app_router;
use academia_api::state::AppState;
use academia_api::ws;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "academia_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Layout storage ---
    let storage: Arc<dyn LayoutStorage> = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = academia_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            academia_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            academia_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database ready, migrations applied");
            Arc::new(academia_db::PgLayoutStorage::new(pool))
        }
        None => {
            tracing::info!(
                path = %config.layout_store_path.display(),
                "No DATABASE_URL, storing layouts in a JSON file"
            );
            Arc::new(FileLayoutStorage::new(config.layout_store_path.clone()))
        }
    };
    let layouts = LayoutStore::new(storage);
    layouts
        .health_check()
        .await
        .expect("Layout storage health check failed");
    tracing::info!(backend = layouts.backend_name(), "Layout store ready");

    // --- WebSocket manager ---
    let ws_manager = Arc::new(ws::WsManager::new());
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&ws_manager));

    // --- Event bus and consumers ---
    let event_bus = Arc::new(EventBus::default());
    let notification_cache = Arc::new(NotificationCacheSync::new());

    let mut cache_sync_handle = {
        let cache = Arc::clone(&notification_cache);
        let receiver = event_bus.subscribe();
        tokio::spawn(async move { cache.run(receiver).await })
    };
    let mut router_handle = tokio::spawn(
        NotificationRouter::new(Arc::clone(&ws_manager)).run(event_bus.subscribe()),
    );
    tracing::info!("Event services started (cache sync, notification router)");

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        layouts,
        ws_manager: Arc::clone(&ws_manager),
        event_bus: Arc::clone(&event_bus),
        notification_cache,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // The router's state held the other bus handles and is gone now; the
    // last sender closes the channel and both consumers exit.
    drop(event_bus);
    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    if tokio::time::timeout(drain, &mut cache_sync_handle).await.is_err() {
        tracing::warn!("Notification cache sync did not stop in time, aborting");
        cache_sync_handle.abort();
    }
    if tokio::time::timeout(drain, &mut router_handle).await.is_err() {
        tracing::warn!("Notification router did not stop in time, aborting");
        router_handle.abort();
    }
    tracing::info!("Event services shut down");

    let ws_count = ws_manager.connection_count().await;
    tracing::info!(ws_count, "Closing remaining WebSocket connections");
    ws_manager.shutdown_all().await;

    heartbeat_handle.abort();
    tracing::info!("Graceful shutdown complete");
}

/// Resolve on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT"),
        () = terminate => tracing::info!("Received SIGTERM"),
    }
}
