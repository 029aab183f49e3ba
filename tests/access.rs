//! Role gate behaviour over the HTTP surface.

#![allow(clippy::panic)]

mod common;

use axum::http::{Method, StatusCode};
use common::{send, test_app};

#[tokio::test]
async fn health_is_public() {
    let app = test_app().await;
    let response = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
}

#[tokio::test]
async fn missing_token_redirects_to_login() {
    let app = test_app().await;
    let response = send(&app, Method::GET, "/api/v1/services", None, None).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/auth/login"));
    assert_eq!(response.body["error"]["code"], 2101);
}

#[tokio::test]
async fn forged_token_counts_as_anonymous() {
    let app = test_app().await;
    let forged = washbay_admin::auth::TokenVerifier::new("someone-else");
    let token = tokio_test::assert_ok!(forged.issue(app.admin, 60));
    let response = send(&app, Method::GET, "/api/v1/me", Some(&token), None).await;
    assert_eq!(response.location(), Some("/auth/login"));
}

#[tokio::test]
async fn user_without_role_is_sent_to_protected_page() {
    let app = test_app().await;
    let response = send(&app, Method::GET, "/api/v1/queues", Some(&app.visitor_token), None).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/protected"));
    assert_eq!(response.body["error"]["code"], 2102);
}

#[tokio::test]
async fn me_reports_role() {
    let app = test_app().await;
    let response = send(&app, Method::GET, "/api/v1/me", Some(&app.admin_token), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user_id"], app.admin.to_string());
    assert_eq!(response.body["role"], "admin");
    assert_eq!(response.body["is_superadmin"], false);
}

#[tokio::test]
async fn dashboard_shows_logs_to_superadmin_only() {
    let app = test_app().await;
    let keys = |body: &serde_json::Value| -> Vec<String> {
        body["sections"]
            .as_array()
            .map(|s| {
                s.iter()
                    .filter_map(|x| x["key"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    };

    let admin = send(&app, Method::GET, "/api/v1/dashboard", Some(&app.admin_token), None).await;
    assert_eq!(keys(&admin.body), vec!["services", "queues", "gallery"]);

    let superadmin = send(
        &app,
        Method::GET,
        "/api/v1/dashboard",
        Some(&app.superadmin_token),
        None,
    )
    .await;
    assert_eq!(keys(&superadmin.body), vec!["services", "queues", "gallery", "logs"]);
}

#[tokio::test]
async fn logs_redirect_admins_away() {
    let app = test_app().await;
    let response = send(&app, Method::GET, "/api/v1/logs", Some(&app.admin_token), None).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/protected"));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = test_app().await;
    let response = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["paths"]["/api/v1/gallery"].is_object());
}
