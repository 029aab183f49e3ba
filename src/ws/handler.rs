//! Axum WebSocket upgrade handler.

use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::response::IntoResponse;

use super::connection::run_connection;
use crate::app_state::AppState;
use crate::auth::AdminSession;

/// `GET /ws` — Upgrade an admin session to a notification socket.
///
/// Browsers cannot set headers on the upgrade request, so the session
/// token may also be passed as `?access_token=`.
pub async fn ws_handler(
    AdminSession(identity): AdminSession,
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let event_rx = state.event_bus.subscribe();
    tracing::debug!(user_id = %identity.user_id, "ws session opened");
    ws.on_upgrade(move |socket| run_connection(socket, event_rx, identity))
}
