//! Router assembly: REST API, WebSocket endpoint, stored files and the
//! HTTP middleware stack.

use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::AppState;
use crate::config::AdminConfig;
use crate::ws::handler::ws_handler;

/// Room left in the body limit for the non-file multipart fields.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Builds the full application router.
///
/// Files under `config.storage_root` are served read-only at `/storage`,
/// matching the public URLs produced by
/// [`crate::storage::LocalObjectStorage`].
pub fn build_app(state: AppState, config: &AdminConfig) -> Router {
    Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .nest_service("/storage", ServeDir::new(&config.storage_root))
        .layer(DefaultBodyLimit::max(
            config.max_upload_bytes.saturating_add(FORM_OVERHEAD_BYTES),
        ))
        .layer(request_timeout(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Answers `408 Request Timeout` when a request outlives `timeout`.
fn request_timeout(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}
