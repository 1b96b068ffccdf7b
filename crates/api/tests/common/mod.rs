#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use academia_api::auth::jwt::{generate_access_token, JwtConfig};
use academia_api::config::ServerConfig;
use academia_api::notifications::NotificationRouter;
use academia_api::router::build_app_router;
use academia_api::state::AppState;
use academia_api::ws::WsManager;
use academia_core::layout::{LayoutStore, MemoryLayoutStorage};
use academia_core::roles::Role;
use academia_core::types::DbId;
use academia_events::{EventBus, NotificationCacheSync};
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const INGEST_TOKEN: &str = "test-ingest-token";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        access_token_expiry_mins: 15,
    }
}

/// Build a test `ServerConfig` with safe defaults and ingest enabled.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: None,
        layout_store_path: PathBuf::from("unused.json"),
        ingest_token: Some(INGEST_TOKEN.to_string()),
        jwt: test_jwt_config(),
    }
}

/// The router plus the state behind it, for tests that inspect services.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

/// Build the full application over in-memory layout storage, with the
/// notification cache sync and router running on the bus.
pub fn build_test_app() -> TestApp {
    build_test_app_with(test_config())
}

pub fn build_test_app_with(config: ServerConfig) -> TestApp {
    let ws_manager = Arc::new(WsManager::new());
    let event_bus = Arc::new(EventBus::default());
    let notification_cache = Arc::new(NotificationCacheSync::new());

    {
        let cache = Arc::clone(&notification_cache);
        let receiver = event_bus.subscribe();
        tokio::spawn(async move { cache.run(receiver).await });
    }
    tokio::spawn(NotificationRouter::new(Arc::clone(&ws_manager)).run(event_bus.subscribe()));

    let state = AppState {
        config: Arc::new(config.clone()),
        layouts: LayoutStore::new(Arc::new(MemoryLayoutStorage::new())),
        ws_manager,
        event_bus,
        notification_cache,
    };

    TestApp {
        router: build_app_router(state.clone(), &config),
        state,
    }
}

/// Mint a bearer token for `user_id` in `tenant_id` acting as `role`.
pub fn token_for(role: Role, user_id: DbId, tenant_id: DbId) -> String {
    generate_access_token(user_id, tenant_id, role, Some("approved"), &test_jwt_config())
        .expect("token generation should succeed")
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Send a JSON body with an optional bearer token.
pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

/// POST to an ingest endpoint with the shared secret.
pub async fn post_ingest(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-ingest-token", INGEST_TOKEN)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Poll `check` until it holds, yielding to background tasks in between.
pub async fn eventually<F, Fut>(mut check: F)
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..100 {
        if check().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not met within 1s");
}
