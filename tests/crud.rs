//! Catalog, queue, gallery tag and activity log round trips through the
//! router.

#![allow(clippy::panic)]

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{TestApp, send, test_app};
use washbay_admin::domain::{AdminView, ChangeKind};

async fn create_service(app: &TestApp, body: serde_json::Value) -> String {
    let response = send(app, Method::POST, "/api/v1/services", Some(&app.admin_token), Some(body)).await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    let Some(id) = response.body["id"].as_str() else {
        panic!("missing id in {}", response.body);
    };
    id.to_string()
}

#[tokio::test]
async fn service_create_applies_defaults_and_lists() {
    let app = test_app().await;
    let id = create_service(&app, json!({ "name": "  Express wash ", "description": "   " })).await;

    let response = send(&app, Method::GET, "/api/v1/services", Some(&app.admin_token), None).await;
    let Some(first) = response.body["data"].get(0) else {
        panic!("empty list: {}", response.body);
    };
    assert_eq!(first["id"], id);
    assert_eq!(first["name"], "Express wash");
    assert_eq!(first["category"], "car");
    assert_eq!(first["price"], 0.0);
    assert_eq!(first["duration_minutes"], 0);
    assert_eq!(first["is_active"], true);
    assert!(first["description"].is_null());
}

#[tokio::test]
async fn service_validation_is_a_bad_request() {
    let app = test_app().await;
    let response = send(
        &app,
        Method::POST,
        "/api/v1/services",
        Some(&app.admin_token),
        Some(json!({ "name": "   " })),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["code"], 1001);
}

#[tokio::test]
async fn oversized_duration_is_rejected_by_memory_store() {
    let app = test_app().await;
    let response = send(
        &app,
        Method::POST,
        "/api/v1/services",
        Some(&app.admin_token),
        Some(json!({ "name": "Marathon", "duration_minutes": u32::MAX })),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", response.body);
    assert_eq!(response.body["error"]["code"], 1001);

    let listed = send(&app, Method::GET, "/api/v1/services", Some(&app.admin_token), None).await;
    assert_eq!(listed.body["data"], json!([]));
}

#[tokio::test]
async fn unparseable_input_uses_the_error_body() {
    let app = test_app().await;
    let id = create_service(&app, json!({ "name": "Rinse" })).await;

    let wrong_type = send(
        &app,
        Method::POST,
        &format!("/api/v1/services/{id}/toggle"),
        Some(&app.admin_token),
        Some(json!({ "current_is_active": "yes" })),
    )
    .await;
    let bad_id = send(
        &app,
        Method::DELETE,
        "/api/v1/services/not-a-uuid",
        Some(&app.admin_token),
        None,
    )
    .await;
    let bad_limit = send(
        &app,
        Method::GET,
        "/api/v1/logs?limit=lots",
        Some(&app.superadmin_token),
        None,
    )
    .await;

    for response in [wrong_type, bad_id, bad_limit] {
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", response.body);
        assert_eq!(response.body["error"]["code"], 1001);
    }
}

#[tokio::test]
async fn toggle_writes_negation_and_hides_from_active_list() {
    let app = test_app().await;
    let id = create_service(&app, json!({ "name": "Ceramic coat", "category": "car" })).await;

    let response = send(
        &app,
        Method::POST,
        &format!("/api/v1/services/{id}/toggle"),
        Some(&app.admin_token),
        Some(json!({ "current_is_active": true })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["value"], false);

    let active = send(&app, Method::GET, "/api/v1/services/active", Some(&app.admin_token), None).await;
    assert_eq!(active.body["data"], json!([]));
}

#[tokio::test]
async fn queue_lifecycle() {
    let app = test_app().await;
    let service_id = create_service(&app, json!({ "name": "Bike rinse", "category": "bike" })).await;
    let mut events = app.state.event_bus.subscribe();

    let created = send(
        &app,
        Method::POST,
        "/api/v1/queues",
        Some(&app.admin_token),
        Some(json!({ "service_id": service_id, "customer_name": "Tono", "vehicle_plate": "AB 12 C" })),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["status"], "waiting");
    let Some(item_id) = created.body["id"].as_str().map(str::to_string) else {
        panic!("missing id");
    };

    let listed = send(&app, Method::GET, "/api/v1/queues", Some(&app.admin_token), None).await;
    let Some(entry) = listed.body["data"].get(0) else {
        panic!("empty queue");
    };
    assert_eq!(entry["service"]["name"], "Bike rinse");
    assert_eq!(entry["service"]["category"], "bike");

    let bad = send(
        &app,
        Method::PUT,
        &format!("/api/v1/queues/{item_id}/status"),
        Some(&app.admin_token),
        Some(json!({ "status": "parked" })),
    )
    .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);

    let updated = send(
        &app,
        Method::PUT,
        &format!("/api/v1/queues/{item_id}/status"),
        Some(&app.admin_token),
        Some(json!({ "status": "in_progress" })),
    )
    .await;
    assert_eq!(updated.status, StatusCode::NO_CONTENT);

    // The service is still referenced.
    let blocked = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/services/{service_id}"),
        Some(&app.admin_token),
        None,
    )
    .await;
    assert_eq!(blocked.status, StatusCode::CONFLICT);

    let deleted = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/queues/{item_id}"),
        Some(&app.admin_token),
        None,
    )
    .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let listed = send(&app, Method::GET, "/api/v1/queues", Some(&app.admin_token), None).await;
    assert_eq!(listed.body["data"], json!([]));

    let kinds: Vec<(AdminView, ChangeKind)> = std::iter::from_fn(|| events.try_recv().ok())
        .map(|e| (e.view, e.change))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (AdminView::Queues, ChangeKind::Created),
            (AdminView::Queues, ChangeKind::Updated),
            (AdminView::Queues, ChangeKind::Deleted),
        ]
    );
}

#[tokio::test]
async fn queue_requires_every_field() {
    let app = test_app().await;
    let response = send(
        &app,
        Method::POST,
        "/api/v1/queues",
        Some(&app.admin_token),
        Some(json!({ "customer_name": "Tono", "vehicle_plate": "AB 12 C" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["message"], "invalid request: service_id is required");
}

#[tokio::test]
async fn tags_are_unique_and_renamable() {
    let app = test_app().await;
    let created = send(
        &app,
        Method::POST,
        "/api/v1/gallery/tags",
        Some(&app.admin_token),
        Some(json!({ "name": "interior" })),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let Some(tag_id) = created.body["id"].as_str().map(str::to_string) else {
        panic!("missing id");
    };

    let duplicate = send(
        &app,
        Method::POST,
        "/api/v1/gallery/tags",
        Some(&app.admin_token),
        Some(json!({ "name": "interior" })),
    )
    .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let renamed = send(
        &app,
        Method::PUT,
        &format!("/api/v1/gallery/tags/{tag_id}"),
        Some(&app.admin_token),
        Some(json!({ "name": "cabin" })),
    )
    .await;
    assert_eq!(renamed.status, StatusCode::NO_CONTENT);

    let listed = send(&app, Method::GET, "/api/v1/gallery/tags", Some(&app.admin_token), None).await;
    assert_eq!(listed.body["data"][0]["name"], "cabin");

    let missing = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/gallery/tags/{}", uuid::Uuid::new_v4()),
        Some(&app.admin_token),
        None,
    )
    .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["error"]["code"], 2001);
}

#[tokio::test]
async fn superadmin_reads_activity_newest_first() {
    let app = test_app().await;
    let id = create_service(&app, json!({ "name": "Underbody" })).await;
    let _ = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/services/{id}"),
        Some(&app.admin_token),
        None,
    )
    .await;

    let response = send(
        &app,
        Method::GET,
        "/api/v1/logs?limit=500",
        Some(&app.superadmin_token),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["limit"], 100);
    let actions: Vec<&str> = response.body["data"]
        .as_array()
        .map(|rows| rows.iter().filter_map(|r| r["action"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(actions, vec!["delete", "create"]);
    assert_eq!(response.body["data"][0]["actor_id"], app.admin.to_string());
    assert_eq!(response.body["data"][0]["record_id"], id);
}
