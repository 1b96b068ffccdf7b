//! Integration tests for the dashboard layout API.

mod common;

use academia_core::roles::Role;
use axum::http::{Method, StatusCode};
use common::{body_json, get, get_auth, send_json, token_for};
use serde_json::json;

const LAYOUT: &str = "/api/v1/dashboard/layout";

fn ids(layout: &serde_json::Value) -> Vec<String> {
    layout["enabledWidgetIds"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

fn placement<'a>(layout: &'a serde_json::Value, bp: &str, id: &str) -> Option<&'a serde_json::Value> {
    layout["layouts"][bp]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == id)
}

// ---------------------------------------------------------------------------
// Test: First read creates the role default
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_layout_creates_role_default() {
    let app = common::build_test_app();
    let token = token_for(Role::Student, 42, 1);

    let response = get_auth(&app.router, LAYOUT, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let layout = &json["data"];
    assert_eq!(layout["role"], "student");
    assert_eq!(layout["version"], 1);
    assert_eq!(
        ids(layout),
        vec![
            "welcome-banner",
            "upcoming-defenses",
            "notifications",
            "calendar",
            "project-milestones",
            "submission-status",
            "announcements",
        ]
    );
    for id in ids(layout) {
        assert!(placement(layout, "lg", &id).is_some(), "{id} placed on lg");
    }
}

// ---------------------------------------------------------------------------
// Test: Save sanitizes, and the saved layout is what later reads return
// ---------------------------------------------------------------------------

#[tokio::test]
async fn save_sanitizes_and_persists() {
    let app = common::build_test_app();
    let token = token_for(Role::Student, 42, 1);

    let body = json!({
        "enabledWidgetIds": ["notifications", "faculty-load", "notifications", "calendar"],
        "layouts": {
            "lg": [
                { "id": "notifications", "x": 10, "y": 0, "w": 6, "h": 4 },
                { "id": "faculty-load", "x": 0, "y": 0, "w": 4, "h": 4 }
            ]
        },
        "widgetSettings": { "calendar": { "view": "week" }, "faculty-load": {} }
    });
    let response = send_json(&app.router, Method::PUT, LAYOUT, Some(&token), body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let saved = body_json(response).await["data"].clone();
    assert_eq!(ids(&saved), vec!["notifications", "calendar"]);
    assert!(placement(&saved, "lg", "faculty-load").is_none());
    let notifications = placement(&saved, "lg", "notifications").unwrap();
    assert_eq!((notifications["x"].as_u64(), notifications["w"].as_u64()), (Some(6), Some(6)));
    assert_eq!(saved["widgetSettings"], json!({ "calendar": { "view": "week" } }));

    let reread = body_json(get_auth(&app.router, LAYOUT, &token).await).await;
    assert_eq!(reread["data"], saved);
}

// ---------------------------------------------------------------------------
// Test: Layouts are isolated per role for the same user
// ---------------------------------------------------------------------------

#[tokio::test]
async fn layouts_are_keyed_by_role() {
    let app = common::build_test_app();
    let as_student = token_for(Role::Student, 42, 1);
    let as_advisor = token_for(Role::Advisor, 42, 1);

    let body = json!({ "enabledWidgetIds": ["calendar"] });
    let response = send_json(&app.router, Method::PUT, LAYOUT, Some(&as_student), body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let advisor = body_json(get_auth(&app.router, LAYOUT, &as_advisor).await).await;
    assert_eq!(advisor["data"]["role"], "advisor");
    assert!(ids(&advisor["data"]).contains(&"my-projects".to_string()));
}

// ---------------------------------------------------------------------------
// Test: Reset restores the role default
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reset_restores_default() {
    let app = common::build_test_app();
    let token = token_for(Role::Coordinator, 5, 2);

    let default = body_json(get_auth(&app.router, LAYOUT, &token).await).await["data"].clone();
    send_json(
        &app.router,
        Method::PUT,
        LAYOUT,
        Some(&token),
        json!({ "enabledWidgetIds": ["calendar"] }),
    )
    .await;

    let response = send_json(
        &app.router,
        Method::POST,
        "/api/v1/dashboard/layout/reset",
        Some(&token),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let reset = body_json(response).await["data"].clone();
    assert_eq!(ids(&reset), ids(&default));
    assert_eq!(reset["layouts"], default["layouts"]);
}

// ---------------------------------------------------------------------------
// Test: Toggling a widget appends it, toggling again removes it
// ---------------------------------------------------------------------------

#[tokio::test]
async fn toggle_widget_round_trip() {
    let app = common::build_test_app();
    let token = token_for(Role::Student, 42, 1);
    let uri = "/api/v1/dashboard/layout/widgets/quick-actions/toggle";

    let response = send_json(&app.router, Method::POST, uri, Some(&token), json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["widget_id"], "quick-actions");
    assert_eq!(json["data"]["enabled"], true);
    let layout = &json["data"]["layout"];
    assert_eq!(ids(layout).last().map(String::as_str), Some("quick-actions"));
    for bp in ["lg", "md", "sm", "xs"] {
        assert!(placement(layout, bp, "quick-actions").is_some(), "placed on {bp}");
    }

    let json = body_json(send_json(&app.router, Method::POST, uri, Some(&token), json!({})).await).await;
    assert_eq!(json["data"]["enabled"], false);
    assert!(!ids(&json["data"]["layout"]).contains(&"quick-actions".to_string()));
}

// ---------------------------------------------------------------------------
// Test: Extreme coordinates are clamped on save and later toggles still work
// ---------------------------------------------------------------------------

#[tokio::test]
async fn extreme_coordinates_are_clamped() {
    let app = common::build_test_app();
    let token = token_for(Role::Student, 42, 1);

    let body = json!({
        "enabledWidgetIds": ["notifications", "calendar"],
        "layouts": {
            "lg": [
                { "id": "notifications", "x": 4294967295u64, "y": 0, "w": 6, "h": 4 },
                { "id": "calendar", "x": 0, "y": 4294967295u64, "w": 4, "h": 4294967295u64 }
            ]
        }
    });
    let response = send_json(&app.router, Method::PUT, LAYOUT, Some(&token), body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let saved = body_json(response).await["data"].clone();
    let notifications = placement(&saved, "lg", "notifications").unwrap();
    assert_eq!(notifications["x"], 6);
    let calendar = placement(&saved, "lg", "calendar").unwrap();
    assert_eq!(calendar["y"], academia_core::layout::MAX_GRID_ROW);
    assert_eq!(calendar["h"], academia_core::layout::MAX_PLACEMENT_HEIGHT);

    let response = send_json(
        &app.router,
        Method::POST,
        "/api/v1/dashboard/layout/widgets/quick-actions/toggle",
        Some(&token),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let layout = body_json(response).await["data"]["layout"].clone();
    assert!(placement(&layout, "lg", "quick-actions").is_some());

    let response = send_json(
        &app.router,
        Method::PUT,
        "/api/v1/dashboard/layout/breakpoints/xs",
        Some(&token),
        json!([{ "id": "calendar", "x": 4294967295u64, "y": 4294967295u64, "w": 1, "h": 1 }]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let layout = body_json(response).await["data"].clone();
    let calendar = placement(&layout, "xs", "calendar").unwrap();
    assert_eq!(calendar["x"], 3);
    assert_eq!(calendar["y"], academia_core::layout::MAX_GRID_ROW);
}

// ---------------------------------------------------------------------------
// Test: Toggling a widget outside the role's catalog is rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn toggle_disallowed_widget_returns_400() {
    let app = common::build_test_app();
    let token = token_for(Role::Student, 42, 1);

    let response = send_json(
        &app.router,
        Method::POST,
        "/api/v1/dashboard/layout/widgets/faculty-load/toggle",
        Some(&token),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn toggle_unknown_widget_returns_404() {
    let app = common::build_test_app();
    let token = token_for(Role::Student, 42, 1);

    let response = send_json(
        &app.router,
        Method::POST,
        "/api/v1/dashboard/layout/widgets/weather/toggle",
        Some(&token),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: Widget settings are replaced for enabled widgets
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_widget_settings_persists() {
    let app = common::build_test_app();
    let token = token_for(Role::Student, 42, 1);

    let response = send_json(
        &app.router,
        Method::PUT,
        "/api/v1/dashboard/layout/widgets/calendar/settings",
        Some(&token),
        json!({ "view": "month" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let reread = body_json(get_auth(&app.router, LAYOUT, &token).await).await;
    assert_eq!(reread["data"]["widgetSettings"]["calendar"], json!({ "view": "month" }));
}

// ---------------------------------------------------------------------------
// Test: Breakpoint updates keep only enabled widgets
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_breakpoint_filters_placements() {
    let app = common::build_test_app();
    let token = token_for(Role::Student, 42, 1);

    let placements = json!([
        { "id": "notifications", "x": 0, "y": 20, "w": 4, "h": 3 },
        { "id": "faculty-load", "x": 4, "y": 0, "w": 4, "h": 3 },
        { "id": "notifications", "x": 8, "y": 0, "w": 4, "h": 3 }
    ]);
    let response = send_json(
        &app.router,
        Method::PUT,
        "/api/v1/dashboard/layout/breakpoints/lg",
        Some(&token),
        placements,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let layout = body_json(response).await["data"].clone();
    let lg = layout["layouts"]["lg"].as_array().unwrap();
    assert_eq!(lg.len(), 1);
    assert_eq!(lg[0]["id"], "notifications");
    assert_eq!(lg[0]["y"], 20);
    assert!(!layout["layouts"]["md"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_breakpoint_returns_400() {
    let app = common::build_test_app();
    let token = token_for(Role::Student, 42, 1);

    let response = send_json(
        &app.router,
        Method::PUT,
        "/api/v1/dashboard/layout/breakpoints/xl",
        Some(&token),
        json!([]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Test: Widget catalog follows the role and marks defaults
// ---------------------------------------------------------------------------

#[tokio::test]
async fn widget_catalog_for_role() {
    let app = common::build_test_app();
    let token = token_for(Role::Student, 42, 1);

    let json = body_json(get_auth(&app.router, "/api/v1/dashboard/widgets", &token).await).await;
    let widgets = json["data"].as_array().unwrap();
    assert!(widgets.iter().all(|w| w["id"] != "faculty-load"));

    let contact = widgets.iter().find(|w| w["id"] == "advisor-contact").unwrap();
    assert_eq!(contact["default_enabled"], false);
    let milestones = widgets.iter().find(|w| w["id"] == "project-milestones").unwrap();
    assert_eq!(milestones["default_enabled"], true);
}

// ---------------------------------------------------------------------------
// Test: Layout endpoints require a token
// ---------------------------------------------------------------------------

#[tokio::test]
async fn layout_requires_auth() {
    let app = common::build_test_app();
    let response = get(&app.router, LAYOUT).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
