//! Activity log viewer (superadmin only).

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{AuditLogPage, LimitParams};
use crate::api::extract::AppQuery;
use crate::app_state::AppState;
use crate::auth::SuperadminSession;
use crate::error::{AdminError, ErrorResponse};

/// `GET /logs` — Most recent audit rows.
///
/// # Errors
///
/// Returns [`AdminError`] if the store read fails.
#[utoipa::path(
    get,
    path = "/api/v1/logs",
    tag = "Logs",
    summary = "Recent activity",
    description = "Newest first. `limit` defaults to the configured maximum and is clamped to `1..=max`. Admins without the superadmin role are redirected.",
    params(LimitParams),
    responses(
        (status = 200, description = "Audit rows", body = AuditLogPage),
        (status = 303, description = "Redirect to login or forbidden page", body = ErrorResponse),
    )
)]
pub async fn recent_logs(
    _session: SuperadminSession,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<LimitParams>,
) -> Result<impl IntoResponse, AdminError> {
    let limit = state.activity.clamp_limit(params.limit);
    let data = state.activity.recent(Some(limit)).await?;
    Ok(Json(AuditLogPage { data, limit }))
}

/// Activity log routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/logs", get(recent_logs))
}
