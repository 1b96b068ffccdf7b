//! Layouts survive a restart when stored in the JSON file backend.

mod common;

use std::sync::Arc;

use academia_api::router::build_app_router;
use academia_core::layout::{FileLayoutStorage, LayoutStore};
use academia_core::roles::Role;
use axum::http::{Method, StatusCode};
use common::{body_json, get, get_auth, send_json, token_for};
use serde_json::json;

/// The in-memory test app with its layout store swapped for a file.
fn file_backed_app(path: &std::path::Path) -> axum::Router {
    let config = common::test_config();
    let mut state = common::build_test_app_with(config.clone()).state;
    state.layouts = LayoutStore::new(Arc::new(FileLayoutStorage::new(path)));
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Test: A saved layout is read back by a fresh app over the same file
// ---------------------------------------------------------------------------

#[tokio::test]
async fn saved_layout_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layouts.json");
    let token = token_for(Role::Advisor, 7, 3);

    let app = file_backed_app(&path);
    let response = send_json(
        &app,
        Method::PUT,
        "/api/v1/dashboard/layout",
        Some(&token),
        json!({ "enabledWidgetIds": ["calendar", "my-projects"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(path.exists());

    let restarted = file_backed_app(&path);
    let json = body_json(get_auth(&restarted, "/api/v1/dashboard/layout", &token).await).await;
    assert_eq!(json["data"]["enabledWidgetIds"], json!(["calendar", "my-projects"]));
}

// ---------------------------------------------------------------------------
// Test: Health reports the file backend
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_file_backend() {
    let dir = tempfile::tempdir().unwrap();
    let app = file_backed_app(&dir.path().join("layouts.json"));

    let json = body_json(get(&app, "/health").await).await;
    assert_eq!(json["layout_backend"], "file");
    assert_eq!(json["status"], "ok");
}
