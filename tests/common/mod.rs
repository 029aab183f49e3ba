//! Shared fixtures: an in-memory app with one user per role.

#![allow(dead_code, clippy::panic)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use tower::ServiceExt;

use washbay_admin::app_state::AppState;
use washbay_admin::config::AdminConfig;
use washbay_admin::domain::{AdminRole, UserId};
use washbay_admin::persistence::{AdminStore, MemoryStore};
use washbay_admin::server::build_app;
use washbay_admin::storage::{MemoryObjectStorage, ObjectStorage};

pub const SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub storage: Arc<MemoryObjectStorage>,
    pub admin: UserId,
    pub admin_token: String,
    pub superadmin: UserId,
    pub superadmin_token: String,
    /// Signed in, but without any role row.
    pub visitor_token: String,
}

pub async fn test_app() -> TestApp {
    let config = AdminConfig::for_memory(SECRET, std::env::temp_dir().join("washbay-admin-tests"));
    let store = Arc::new(MemoryStore::new());
    let storage = Arc::new(MemoryObjectStorage::new(
        "http://localhost:3000/storage/gallery",
    ));
    let state = AppState::new(
        &config,
        Arc::clone(&store) as Arc<dyn AdminStore>,
        Arc::clone(&storage) as Arc<dyn ObjectStorage>,
    );

    let admin = UserId::new();
    let superadmin = UserId::new();
    let visitor = UserId::new();
    for (user, role) in [(admin, AdminRole::Admin), (superadmin, AdminRole::Superadmin)] {
        if state.access.grant(user, role).await.is_err() {
            panic!("seeding roles failed");
        }
    }

    let token = |user| {
        let Ok(token) = state.tokens.issue(user, 3_600) else {
            panic!("token signing failed");
        };
        token
    };
    let admin_token = token(admin);
    let superadmin_token = token(superadmin);
    let visitor_token = token(visitor);

    TestApp {
        router: build_app(state.clone(), &config),
        state,
        store,
        storage,
        admin,
        admin_token,
        superadmin,
        superadmin_token,
        visitor_token,
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

pub async fn send(
    app: &TestApp,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    };
    let Ok(request) = request else {
        panic!("invalid request for {uri}");
    };
    let Ok(response) = app.router.clone().oneshot(request).await else {
        panic!("router failed for {uri}");
    };
    let status = response.status();
    let headers = response.headers().clone();
    let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
        panic!("unreadable body for {uri}");
    };
    TestResponse {
        status,
        headers,
        body: serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null),
    }
}
